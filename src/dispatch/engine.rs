// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits of the command dispatcher.
//!
//! The dispatcher owns no rendering and no transport. It drives an
//! [`AnimationEngine`] (the node's color/animation subsystem) and a
//! [`CommandRelay`] (the side channel that re-broadcasts accepted commands
//! to peer devices), both injected at construction.

use serde::Serialize;
use serde_json::Value;

use crate::request::{HsvTarget, RawTarget};
use crate::types::{ChannelMask, QueuePolicy, Ramp};

/// Current HSV-mode output, in display units (hue in degrees, saturation
/// and value in percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HsvSnapshot {
    /// Hue in degrees (0-360).
    pub h: f32,
    /// Saturation in percent.
    pub s: f32,
    /// Value/brightness in percent.
    pub v: f32,
    /// Color temperature.
    pub ct: u32,
}

/// Current raw-mode output, one value per PWM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawSnapshot {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
    /// Warm white channel.
    pub ww: u16,
    /// Cold white channel.
    pub cw: u16,
}

/// The engine's current output, tagged with the active color mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputSnapshot {
    /// The engine is rendering in HSV mode.
    Hsv(HsvSnapshot),
    /// The engine is rendering in raw mode.
    Raw(RawSnapshot),
}

/// The animation engine a node's commands are applied to.
///
/// All calls are non-blocking and queue-bounded: the admission-returning
/// methods answer `false` when the queue declines the command. Relative
/// target values are resolved against the current output by the engine at
/// apply time.
pub trait AnimationEngine {
    /// Queues a fade to the HSV target. Returns whether it was admitted.
    fn fade_hsv(
        &mut self,
        target: &HsvTarget,
        ramp: &Ramp,
        direction: u8,
        queue: QueuePolicy,
        requeue: bool,
        name: &str,
    ) -> bool;

    /// Queues an absolute HSV set after `time` ramp units. Returns whether
    /// it was admitted.
    fn set_hsv(
        &mut self,
        target: &HsvTarget,
        time: f64,
        queue: QueuePolicy,
        requeue: bool,
        name: &str,
    ) -> bool;

    /// Queues a two-endpoint HSV fade from `from` to `to`.
    fn fade_hsv_from(
        &mut self,
        from: &HsvTarget,
        to: &HsvTarget,
        ramp: &Ramp,
        direction: u8,
        queue: QueuePolicy,
    );

    /// Queues a fade to the raw target. Returns whether it was admitted.
    fn fade_raw(
        &mut self,
        target: &RawTarget,
        ramp: &Ramp,
        direction: u8,
        queue: QueuePolicy,
        requeue: bool,
        name: &str,
    ) -> bool;

    /// Queues an absolute raw set after `time` ramp units. Returns whether
    /// it was admitted.
    fn set_raw(
        &mut self,
        target: &RawTarget,
        time: f64,
        queue: QueuePolicy,
        requeue: bool,
        name: &str,
    ) -> bool;

    /// Queues a two-endpoint raw fade from `from` to `to`.
    fn fade_raw_from(
        &mut self,
        from: &RawTarget,
        to: &RawTarget,
        ramp: &Ramp,
        direction: u8,
        queue: QueuePolicy,
    );

    /// Applies an HSV target immediately, bypassing the queue.
    fn direct_hsv(&mut self, target: &HsvTarget);

    /// Applies a raw target immediately, bypassing the queue.
    fn direct_raw(&mut self, target: &RawTarget);

    /// Clears queued animations for the masked channels.
    fn clear_queue(&mut self, channels: ChannelMask);

    /// Skips past the currently running animation on the masked channels.
    fn skip_current(&mut self, channels: ChannelMask);

    /// Suspends queue processing for the masked channels.
    fn pause(&mut self, channels: ChannelMask);

    /// Resumes queue processing for the masked channels.
    fn resume(&mut self, channels: ChannelMask);

    /// Queues a blink animation with the given period. Returns whether it
    /// was admitted.
    fn blink(
        &mut self,
        channels: ChannelMask,
        period: f64,
        queue: QueuePolicy,
        requeue: bool,
        name: &str,
    ) -> bool;

    /// Reads the current output, used when building relay payloads.
    fn current_output(&self) -> OutputSnapshot;
}

/// Side channel that re-broadcasts commands to peer devices/observers.
///
/// Delivery is fire-and-forget, best effort.
pub trait CommandRelay {
    /// Broadcasts a command name and its payload record.
    fn relay(&mut self, command: &str, payload: Value);
}
