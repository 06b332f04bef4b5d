// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request model construction.
//!
//! [`RequestParameters`] is the strongly typed representation of one
//! animation command, decoded from a loosely typed request record
//! (an already-deserialized [`serde_json::Value`]).
//!
//! Decoding is tolerant by design: missing, malformed, or wrong-typed
//! fields become absent values and nothing is range-checked here. The
//! separate [validator](RequestParameters::validate) decides whether the
//! populated model is admissible.

mod validate;

use serde_json::Value;

use crate::types::{AbsOrRelValue, Channel, ChannelMask, QueuePolicy, Ramp, ValueClass};

/// Target components of an HSV-mode command.
///
/// Every field is independently optional; an absent field must not touch
/// the corresponding component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvTarget {
    /// Hue component.
    pub h: Option<AbsOrRelValue>,
    /// Saturation component.
    pub s: Option<AbsOrRelValue>,
    /// Value/brightness component.
    pub v: Option<AbsOrRelValue>,
    /// Color temperature component.
    pub ct: Option<AbsOrRelValue>,
}

impl HsvTarget {
    /// Returns true if no component is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.h.is_none() && self.s.is_none() && self.v.is_none() && self.ct.is_none()
    }

    /// Overwrites every component for which `other` has a value.
    fn supersede_with(&mut self, other: &Self) {
        if other.h.is_some() {
            self.h = other.h;
        }
        if other.s.is_some() {
            self.s = other.s;
        }
        if other.v.is_some() {
            self.v = other.v;
        }
        if other.ct.is_some() {
            self.ct = other.ct;
        }
    }
}

/// Target components of a raw-mode command.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawTarget {
    /// Red channel.
    pub r: Option<AbsOrRelValue>,
    /// Green channel.
    pub g: Option<AbsOrRelValue>,
    /// Blue channel.
    pub b: Option<AbsOrRelValue>,
    /// Warm white channel.
    pub ww: Option<AbsOrRelValue>,
    /// Cold white channel.
    pub cw: Option<AbsOrRelValue>,
}

impl RawTarget {
    /// Returns true if no channel is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.r.is_none()
            && self.g.is_none()
            && self.b.is_none()
            && self.ww.is_none()
            && self.cw.is_none()
    }

    fn supersede_with(&mut self, other: &Self) {
        if other.r.is_some() {
            self.r = other.r;
        }
        if other.g.is_some() {
            self.g = other.g;
        }
        if other.b.is_some() {
            self.b = other.b;
        }
        if other.ww.is_some() {
            self.ww = other.ww;
        }
        if other.cw.is_some() {
            self.cw = other.cw;
        }
    }
}

/// The color intent of a request: at most one variant is active.
///
/// A `from` endpoint forces a two-endpoint fade regardless of the `cmd`
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorIntent {
    /// No color object was supplied.
    #[default]
    None,
    /// HSV-mode target, with an optional fade-from endpoint.
    Hsv {
        /// The destination components.
        target: HsvTarget,
        /// Optional starting endpoint of a two-endpoint fade.
        from: Option<HsvTarget>,
    },
    /// Raw-mode target, with an optional fade-from endpoint.
    Raw {
        /// The destination channels.
        target: RawTarget,
        /// Optional starting endpoint of a two-endpoint fade.
        from: Option<RawTarget>,
    },
    /// Kelvin request. Reserved; not yet wired to an engine call.
    Kelvin,
}

/// The validated, strongly typed representation of one animation command.
///
/// Created fresh per incoming request, consumed by the dispatcher, then
/// discarded.
///
/// # Examples
///
/// ```
/// use rgbww_node::request::{ColorIntent, RequestParameters};
/// use serde_json::json;
///
/// let params = RequestParameters::from_value(&json!({
///     "hsv": { "h": "120", "v": 50 },
///     "t": 2000,
///     "q": "front",
/// }));
///
/// assert!(matches!(params.intent, ColorIntent::Hsv { .. }));
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameters {
    /// Color intent decoded from `hsv`/`raw`/`kelvin`.
    pub intent: ColorIntent,
    /// Ramp timing from `t` (time) or top-level `s` (speed).
    pub ramp: Ramp,
    /// Fade direction from `d`; raw integer, range-checked by the
    /// validator.
    pub direction: i64,
    /// Queue policy from `q`.
    pub queue: QueuePolicy,
    /// Requeue flag from top-level `r` (`1` means true).
    pub requeue: bool,
    /// Channel scope from `channels`.
    pub channels: ChannelMask,
    /// Free-text animation name from `name`.
    pub name: String,
    /// Command kind from `cmd`; `"fade"` or `"solid"` are admissible.
    pub cmd: String,
    /// Kelvin value from `kelvin`.
    pub kelvin: i64,
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            intent: ColorIntent::None,
            ramp: Ramp::default(),
            direction: 0,
            queue: QueuePolicy::Back,
            requeue: false,
            channels: ChannelMask::new(),
            name: String::new(),
            cmd: "fade".to_string(),
            kelvin: 0,
        }
    }
}

impl RequestParameters {
    /// Decodes a request record into a fresh parameter set.
    #[must_use]
    pub fn from_value(root: &Value) -> Self {
        let mut params = Self::default();
        params.merge(root);
        params
    }

    /// Decodes a request record into `self`, overwriting only the fields
    /// the record carries. Lets callers pre-seed defaults (the blink
    /// command seeds its 500-unit ramp this way).
    pub fn merge(&mut self, root: &Value) {
        if let Some(hsv) = root.get("hsv") {
            let mut target = parse_hsv_target(hsv);
            let from = hsv.get("from").map(|from| {
                let endpoint = parse_hsv_target(from);
                target.supersede_with(&endpoint);
                endpoint
            });
            self.intent = ColorIntent::Hsv { target, from };
        } else if let Some(raw) = root.get("raw") {
            let mut target = parse_raw_target(raw);
            let from = raw.get("from").map(|from| {
                let endpoint = parse_raw_target(from);
                target.supersede_with(&endpoint);
                endpoint
            });
            self.intent = ColorIntent::Raw { target, from };
        }

        // A sibling kelvin key overrides whatever color object was parsed.
        if let Some(kelvin) = root.get("kelvin") {
            self.intent = ColorIntent::Kelvin;
            self.kelvin = kelvin.as_i64().unwrap_or(0);
        }

        if let Some(t) = root.get("t").and_then(json_number) {
            self.ramp = Ramp::time(t);
        }

        // Evaluated after `t`, so speed wins when both are given.
        if let Some(s) = root.get("s").and_then(json_number) {
            self.ramp = Ramp::speed(s);
        }

        if let Some(r) = root.get("r").and_then(Value::as_i64) {
            self.requeue = r == 1;
        }

        if let Some(d) = root.get("d").and_then(Value::as_i64) {
            self.direction = d;
        }

        if let Some(name) = root.get("name").and_then(Value::as_str) {
            self.name = name.to_string();
        }

        if let Some(cmd) = root.get("cmd").and_then(Value::as_str) {
            self.cmd = cmd.to_string();
        }

        if let Some(q) = root.get("q").and_then(Value::as_str) {
            self.queue = QueuePolicy::from_token(q);
        }

        if let Some(channels) = root.get("channels").and_then(Value::as_array) {
            for token in channels {
                if let Some(ch) = token.as_str().and_then(Channel::from_token) {
                    self.channels.insert(ch);
                }
            }
        }
    }
}

fn parse_hsv_target(obj: &Value) -> HsvTarget {
    HsvTarget {
        h: field(obj, "h", ValueClass::Hue),
        s: field(obj, "s", ValueClass::Generic),
        v: field(obj, "v", ValueClass::Generic),
        ct: field(obj, "ct", ValueClass::ColorTemperature),
    }
}

fn parse_raw_target(obj: &Value) -> RawTarget {
    RawTarget {
        r: field(obj, "r", ValueClass::RawChannel),
        g: field(obj, "g", ValueClass::RawChannel),
        b: field(obj, "b", ValueClass::RawChannel),
        ww: field(obj, "ww", ValueClass::RawChannel),
        cw: field(obj, "cw", ValueClass::RawChannel),
    }
}

fn field(obj: &Value, key: &str, class: ValueClass) -> Option<AbsOrRelValue> {
    obj.get(key)
        .and_then(|value| AbsOrRelValue::from_json(value, class))
}

/// Reads a numeric field that may arrive as a JSON number or a numeric
/// string.
fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::RampKind;

    #[test]
    fn defaults_are_admissible_shape() {
        let params = RequestParameters::default();
        assert_eq!(params.intent, ColorIntent::None);
        assert_eq!(params.queue, QueuePolicy::Back);
        assert_eq!(params.cmd, "fade");
        assert_eq!(params.direction, 0);
        assert!(!params.requeue);
        assert!(params.channels.is_empty());
    }

    #[test]
    fn parses_hsv_object() {
        let params = RequestParameters::from_value(&json!({
            "hsv": { "h": "180", "s": "+5", "v": 50 }
        }));
        let ColorIntent::Hsv { target, from } = params.intent else {
            panic!("expected hsv intent");
        };
        assert!(from.is_none());
        assert_eq!(target.h.unwrap().magnitude(), 180.0);
        assert!(target.s.unwrap().is_relative());
        assert_eq!(target.v.unwrap().magnitude(), 50.0);
        assert!(target.ct.is_none());
    }

    #[test]
    fn hsv_value_classes() {
        let params = RequestParameters::from_value(&json!({
            "hsv": { "h": "1", "s": "2", "v": "3", "ct": "400" }
        }));
        let ColorIntent::Hsv { target, .. } = params.intent else {
            panic!("expected hsv intent");
        };
        assert_eq!(target.h.unwrap().class(), ValueClass::Hue);
        assert_eq!(target.s.unwrap().class(), ValueClass::Generic);
        assert_eq!(target.v.unwrap().class(), ValueClass::Generic);
        assert_eq!(target.ct.unwrap().class(), ValueClass::ColorTemperature);
    }

    #[test]
    fn malformed_hsv_field_is_absent() {
        let params = RequestParameters::from_value(&json!({
            "hsv": { "h": "not-a-number", "v": 10 }
        }));
        let ColorIntent::Hsv { target, .. } = params.intent else {
            panic!("expected hsv intent");
        };
        assert!(target.h.is_none());
        assert_eq!(target.v.unwrap().magnitude(), 10.0);
    }

    #[test]
    fn hsv_from_supersedes_top_level_fields() {
        let params = RequestParameters::from_value(&json!({
            "hsv": { "h": 10, "v": 20, "from": { "h": 200 } }
        }));
        let ColorIntent::Hsv { target, from } = params.intent else {
            panic!("expected hsv intent");
        };
        let from = from.expect("from endpoint");
        // from.h overwrites the top-level h; v only exists top-level.
        assert_eq!(target.h.unwrap().magnitude(), 200.0);
        assert_eq!(target.v.unwrap().magnitude(), 20.0);
        assert_eq!(from.h.unwrap().magnitude(), 200.0);
        assert!(from.v.is_none());
    }

    #[test]
    fn parses_raw_object_with_from() {
        let params = RequestParameters::from_value(&json!({
            "raw": { "r": 1023, "ww": "512", "from": { "r": 0 } }
        }));
        let ColorIntent::Raw { target, from } = params.intent else {
            panic!("expected raw intent");
        };
        let from = from.expect("from endpoint");
        assert_eq!(target.r.unwrap().magnitude(), 0.0);
        assert_eq!(target.ww.unwrap().magnitude(), 512.0);
        assert_eq!(from.r.unwrap().magnitude(), 0.0);
        assert_eq!(target.r.unwrap().class(), ValueClass::RawChannel);
    }

    #[test]
    fn hsv_takes_precedence_over_raw() {
        let params = RequestParameters::from_value(&json!({
            "hsv": { "v": 10 },
            "raw": { "r": 20 }
        }));
        assert!(matches!(params.intent, ColorIntent::Hsv { .. }));
    }

    #[test]
    fn kelvin_overrides_parsed_color_object() {
        let params = RequestParameters::from_value(&json!({
            "hsv": { "v": 10 },
            "kelvin": 4000
        }));
        assert_eq!(params.intent, ColorIntent::Kelvin);
        assert_eq!(params.kelvin, 4000);
    }

    #[test]
    fn time_then_speed_later_wins() {
        let params = RequestParameters::from_value(&json!({ "t": 2000, "s": 30 }));
        assert_eq!(params.ramp.kind, RampKind::Speed);
        assert_eq!(params.ramp.value, 30.0);

        let only_time = RequestParameters::from_value(&json!({ "t": 2000 }));
        assert_eq!(only_time.ramp.kind, RampKind::Time);
        assert_eq!(only_time.ramp.value, 2000.0);
    }

    #[test]
    fn requeue_flag_requires_one() {
        assert!(RequestParameters::from_value(&json!({ "r": 1 })).requeue);
        assert!(!RequestParameters::from_value(&json!({ "r": 0 })).requeue);
        assert!(!RequestParameters::from_value(&json!({})).requeue);
    }

    #[test]
    fn copies_name_cmd_direction() {
        let params = RequestParameters::from_value(&json!({
            "name": "sunrise",
            "cmd": "solid",
            "d": 1
        }));
        assert_eq!(params.name, "sunrise");
        assert_eq!(params.cmd, "solid");
        assert_eq!(params.direction, 1);
    }

    #[test]
    fn queue_token_mapping() {
        let params = RequestParameters::from_value(&json!({ "q": "single" }));
        assert_eq!(params.queue, QueuePolicy::Single);

        let bogus = RequestParameters::from_value(&json!({ "q": "bogus" }));
        assert_eq!(bogus.queue, QueuePolicy::Invalid);

        let absent = RequestParameters::from_value(&json!({}));
        assert_eq!(absent.queue, QueuePolicy::Back);
    }

    #[test]
    fn channel_tokens_unknown_dropped() {
        let params = RequestParameters::from_value(&json!({
            "channels": ["h", "ct", "nope", 7]
        }));
        assert_eq!(params.channels.len(), 2);
        assert!(params.channels.contains(Channel::Hue));
        assert!(params.channels.contains(Channel::ColorTemp));
    }

    #[test]
    fn merge_keeps_preseeded_defaults() {
        let mut params = RequestParameters {
            ramp: Ramp::time(500.0),
            ..RequestParameters::default()
        };
        params.merge(&json!({ "name": "alert" }));
        assert_eq!(params.ramp.value, 500.0);
        assert_eq!(params.name, "alert");
    }
}
