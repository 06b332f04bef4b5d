// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Absolute-or-relative field values.
//!
//! Request fields like `hsv.h` accept either an absolute value (`"180"`,
//! `120`) that replaces the current component, or a signed relative delta
//! (`"+10"`, `"-25"`) that is added to the current value at apply time.
//! Parsing is deliberately tolerant: absent or malformed input decodes to
//! "no value" (`None`), and the validator decides whether that matters.

use std::fmt;

use serde_json::Value;

/// The range/wrap class of a parsed value.
///
/// The class travels with the value so downstream checks (and the engine's
/// relative-apply logic) know which range and wrap behavior applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueClass {
    /// A plain percentage-style component (saturation, value).
    #[default]
    Generic,
    /// Hue, wrapping on the color wheel.
    Hue,
    /// Color temperature, accepted on the mired or Kelvin scale.
    ColorTemperature,
    /// A raw PWM channel value.
    RawChannel,
}

/// One parsed request field: an absolute value or a signed relative delta.
///
/// # Examples
///
/// ```
/// use rgbww_node::types::{AbsOrRelValue, ValueClass};
///
/// let abs = AbsOrRelValue::parse("180", ValueClass::Hue).unwrap();
/// assert!(!abs.is_relative());
/// assert_eq!(abs.magnitude(), 180.0);
///
/// let rel = AbsOrRelValue::parse("-25", ValueClass::Generic).unwrap();
/// assert!(rel.is_relative());
/// assert_eq!(rel.magnitude(), -25.0);
///
/// // Malformed input is "no value", not an error.
/// assert!(AbsOrRelValue::parse("bright", ValueClass::Generic).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsOrRelValue {
    relative: bool,
    magnitude: f64,
    class: ValueClass,
}

impl AbsOrRelValue {
    /// Creates an absolute value.
    #[must_use]
    pub const fn absolute(magnitude: f64, class: ValueClass) -> Self {
        Self {
            relative: false,
            magnitude,
            class,
        }
    }

    /// Creates a relative delta.
    #[must_use]
    pub const fn relative(magnitude: f64, class: ValueClass) -> Self {
        Self {
            relative: true,
            magnitude,
            class,
        }
    }

    /// Parses one textual field.
    ///
    /// A leading `+` or `-` marks the value as relative; any other
    /// parseable numeric token is absolute. Empty or malformed tokens
    /// yield `None`.
    #[must_use]
    pub fn parse(token: &str, class: ValueClass) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        let relative = token.starts_with('+') || token.starts_with('-');
        let magnitude: f64 = token.parse().ok()?;
        Some(Self {
            relative,
            magnitude,
            class,
        })
    }

    /// Decodes one field of an already-deserialized request record.
    ///
    /// JSON numbers are absolute; strings go through [`Self::parse`] so the
    /// `+`/`-` relative prefix is honored. Anything else is "no value".
    #[must_use]
    pub fn from_json(value: &Value, class: ValueClass) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(|m| Self::absolute(m, class)),
            Value::String(s) => Self::parse(s, class),
            _ => None,
        }
    }

    /// Returns true if this value is a relative delta.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.relative
    }

    /// Returns the (signed, for relative values) magnitude.
    #[must_use]
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the value's range/wrap class.
    #[must_use]
    pub const fn class(&self) -> ValueClass {
        self.class
    }
}

impl fmt::Display for AbsOrRelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.relative && self.magnitude >= 0.0 {
            write!(f, "+{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}
