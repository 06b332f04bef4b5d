// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ramp timing for color transitions.

/// How a ramp value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RampKind {
    /// The value is a duration. Zero means "apply immediately".
    #[default]
    Time,
    /// The value is a rate. Zero is invalid (it is a divisor downstream).
    Speed,
}

/// Transition timing for a fade or set operation.
///
/// # Examples
///
/// ```
/// use rgbww_node::types::{Ramp, RampKind};
///
/// let timed = Ramp::time(2000.0);
/// assert_eq!(timed.kind, RampKind::Time);
///
/// let rated = Ramp::speed(30.0);
/// assert_eq!(rated.kind, RampKind::Speed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ramp {
    /// The duration or rate, depending on `kind`.
    pub value: f64,
    /// How `value` is interpreted.
    pub kind: RampKind,
}

impl Ramp {
    /// Creates a duration-based ramp.
    #[must_use]
    pub const fn time(value: f64) -> Self {
        Self {
            value,
            kind: RampKind::Time,
        }
    }

    /// Creates a rate-based ramp.
    #[must_use]
    pub const fn speed(value: f64) -> Self {
        Self {
            value,
            kind: RampKind::Speed,
        }
    }
}
