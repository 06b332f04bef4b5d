// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The pure request validator.
//!
//! Run once per request, immediately before admission. No side effects;
//! checks run in a fixed order and the first failure is reported.

use crate::error::ValidationError;
use crate::request::{ColorIntent, RequestParameters};
use crate::types::{QueuePolicy, RampKind};

/// Lower bound of the mired-scale color temperature range.
const CT_MIRED_MIN: f64 = 100.0;
/// Upper bound of the mired-scale color temperature range.
const CT_MIRED_MAX: f64 = 500.0;
/// Lower bound of the Kelvin-scale color temperature range.
const CT_KELVIN_MIN: f64 = 2000.0;
/// Upper bound of the Kelvin-scale color temperature range.
const CT_KELVIN_MAX: f64 = 10000.0;

impl RequestParameters {
    /// Checks whether this request is admissible.
    ///
    /// # Errors
    ///
    /// Returns the first failing check:
    ///
    /// - HSV: a non-zero `ct` outside `[100, 500]` and `[2000, 10000]`;
    ///   or no component present at all
    /// - Raw: no channel present at all
    /// - An unrecognized queue policy token
    /// - A `cmd` other than `"fade"` or `"solid"`
    /// - A direction other than `0` or `1`
    /// - A speed-type ramp with value `0`
    /// - No color object where one is required (including the reserved
    ///   kelvin intent)
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.intent {
            ColorIntent::Hsv { target, .. } => {
                if let Some(ct) = &target.ct {
                    let m = ct.magnitude();
                    if m != 0.0 && !ct_in_range(m) {
                        return Err(ValidationError::BadColorTemp(m));
                    }
                }
                if target.is_empty() {
                    return Err(ValidationError::MissingHsvComponent);
                }
            }
            ColorIntent::Raw { target, .. } => {
                if target.is_empty() {
                    return Err(ValidationError::MissingRawComponent);
                }
            }
            ColorIntent::None | ColorIntent::Kelvin => {}
        }

        if self.queue == QueuePolicy::Invalid {
            return Err(ValidationError::InvalidQueuePolicy);
        }

        if self.cmd != "fade" && self.cmd != "solid" {
            return Err(ValidationError::InvalidCommandKind(self.cmd.clone()));
        }

        if !(0..=1).contains(&self.direction) {
            return Err(ValidationError::InvalidDirection(self.direction));
        }

        if self.ramp.kind == RampKind::Speed && self.ramp.value == 0.0 {
            return Err(ValidationError::ZeroSpeed);
        }

        if !matches!(
            self.intent,
            ColorIntent::Hsv { .. } | ColorIntent::Raw { .. }
        ) {
            return Err(ValidationError::NoColorObject);
        }

        Ok(())
    }
}

/// Accepts mired-scale (100-500) and Kelvin-scale (2000-10000) values; the
/// gap in between matches neither scale and is rejected.
fn ct_in_range(value: f64) -> bool {
    (CT_MIRED_MIN..=CT_MIRED_MAX).contains(&value)
        || (CT_KELVIN_MIN..=CT_KELVIN_MAX).contains(&value)
}
