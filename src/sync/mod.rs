// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Step-clock synchronization.
//!
//! Group animations stay visually coherent only if every node's step clock
//! advances at the same effective rate. One node acts as the master and
//! periodically reports its step counter; every other node runs a
//! [`ClockCatchUp`] controller that steers the local timer's tick interval
//! so the local counter converges on the master's.
//!
//! The controller is a bounded first-order feedback loop: per beat it
//! accumulates the step offset against the master, derives a steering
//! factor clamped to `[0.5, 1.5]`, and smooths it exponentially so jitter
//! in beat delivery does not whipsaw the timer.

use tracing::trace;

/// Lower clamp of the per-beat steering factor.
const STEERING_MIN: f32 = 0.5;
/// Upper clamp of the per-beat steering factor.
const STEERING_MAX: f32 = 1.5;
/// Exponential smoothing factor applied to the steering value.
const STEERING_ALPHA: f32 = 0.5;

/// Signed forward distance between two fixed-width step counter samples.
///
/// Both counters are monotonically increasing with wraparound at the
/// 32-bit modulus, so the distance is the modular difference reinterpreted
/// as signed. Naive subtraction breaks at the wrap point.
///
/// # Examples
///
/// ```
/// use rgbww_node::sync::step_delta;
///
/// assert_eq!(step_delta(100, 250), 150);
/// // Same true distance across the wrap point.
/// assert_eq!(step_delta(u32::MAX - 49, 100), 150);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub const fn step_delta(previous: u32, current: u32) -> i32 {
    current.wrapping_sub(previous) as i32
}

/// Steers the local step clock toward a master clock.
///
/// Feed every received master beat to [`on_master_clock`] and run the
/// local timer at the interval it returns. The first beat after
/// construction or [`reset`] only records the counter pair; correction
/// starts with the second beat.
///
/// State mutation has no internal synchronization: beats must be
/// processed one at a time per device.
///
/// [`on_master_clock`]: ClockCatchUp::on_master_clock
/// [`reset`]: ClockCatchUp::reset
///
/// # Examples
///
/// ```
/// use rgbww_node::sync::ClockCatchUp;
///
/// let mut clock = ClockCatchUp::new(1000);
///
/// // First beat: no correction possible yet.
/// assert_eq!(clock.on_master_clock(0, 0), 1000);
///
/// // Local advanced 100 steps while the master advanced 100: in step.
/// assert_eq!(clock.on_master_clock(100, 100), 1000);
/// assert_eq!(clock.catchup_offset(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ClockCatchUp {
    base_interval: u32,
    first_sync: bool,
    last_local: u32,
    last_master: u32,
    catchup_offset: i32,
    steering: f32,
}

impl ClockCatchUp {
    /// Creates a controller for a timer with the given base tick interval.
    #[must_use]
    pub const fn new(base_interval: u32) -> Self {
        Self {
            base_interval,
            first_sync: true,
            last_local: 0,
            last_master: 0,
            catchup_offset: 0,
            steering: 1.0,
        }
    }

    /// Drops all synchronization state and returns the unmodified base
    /// interval.
    ///
    /// The next [`on_master_clock`](Self::on_master_clock) call behaves
    /// like the very first one, regardless of prior steering history.
    /// Intended for an external "lost master" detector; without a reset
    /// the timer keeps running at the last corrected interval.
    pub const fn reset(&mut self) -> u32 {
        self.first_sync = true;
        self.catchup_offset = 0;
        self.steering = 1.0;
        self.base_interval
    }

    /// Processes one master beat and returns the corrected tick interval
    /// the local timer should use until the next beat.
    ///
    /// `local_steps` is this device's step counter at beat receipt,
    /// `master_steps` the counter the master reported. Both wrap at the
    /// 32-bit modulus.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn on_master_clock(&mut self, local_steps: u32, master_steps: u32) -> u32 {
        let mut next_interval = self.base_interval;

        if !self.first_sync {
            let local_delta = step_delta(self.last_local, local_steps);
            let master_delta = step_delta(self.last_master, master_steps);

            // Positive: local is behind the master.
            let offset = master_delta - local_delta;
            self.catchup_offset += offset;

            // A beat with no master progress carries no rate information;
            // keep the previous steering instead of dividing by zero.
            if master_delta != 0 {
                let instant = 1.0 - self.catchup_offset as f32 / master_delta as f32;
                let instant = instant.clamp(STEERING_MIN, STEERING_MAX);
                self.steering =
                    (1.0 - STEERING_ALPHA) * self.steering + STEERING_ALPHA * instant;
            }
            next_interval = (self.base_interval as f32 * self.steering).round() as u32;

            trace!(
                local_delta,
                master_delta,
                offset,
                catchup_offset = self.catchup_offset,
                steering = self.steering,
                next_interval,
                "master beat processed"
            );
        }

        self.last_local = local_steps;
        self.last_master = master_steps;
        self.first_sync = false;

        next_interval
    }

    /// Returns the accumulated step offset against the master, for
    /// diagnostics. Positive means the local clock is behind.
    #[must_use]
    pub const fn catchup_offset(&self) -> i32 {
        self.catchup_offset
    }

    /// Returns the configured base tick interval.
    #[must_use]
    pub const fn base_interval(&self) -> u32 {
        self.base_interval
    }
}
