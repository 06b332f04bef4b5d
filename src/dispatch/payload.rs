// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relay payload construction.
//!
//! `stop`, `skip` and `pause` relay the resulting channel state along with
//! the original request so observers see where the node landed. The
//! builder is a pure function over an immutable output snapshot; the
//! original request record is never mutated in place.

use serde_json::{Map, Value, json};

use crate::dispatch::engine::OutputSnapshot;
use crate::types::{Channel, ChannelMask};

/// Returns a copy of the request record with the current channel state of
/// the active color mode appended.
///
/// State fields are filtered to the channels the request touched; an empty
/// mask includes every field of the active mode.
#[must_use]
pub fn with_channel_state(root: &Value, output: &OutputSnapshot, channels: ChannelMask) -> Value {
    let mut payload = root.clone();

    let (key, state) = match output {
        OutputSnapshot::Hsv(c) => {
            let mut state = Map::new();
            if channels.covers(Channel::Hue) {
                state.insert("h".to_string(), json!(c.h));
            }
            if channels.covers(Channel::Sat) {
                state.insert("s".to_string(), json!(c.s));
            }
            if channels.covers(Channel::Val) {
                state.insert("v".to_string(), json!(c.v));
            }
            if channels.covers(Channel::ColorTemp) {
                state.insert("ct".to_string(), json!(c.ct));
            }
            ("hsv", state)
        }
        OutputSnapshot::Raw(c) => {
            let mut state = Map::new();
            if channels.covers(Channel::Red) {
                state.insert("r".to_string(), json!(c.r));
            }
            if channels.covers(Channel::Green) {
                state.insert("g".to_string(), json!(c.g));
            }
            if channels.covers(Channel::Blue) {
                state.insert("b".to_string(), json!(c.b));
            }
            if channels.covers(Channel::WarmWhite) {
                state.insert("ww".to_string(), json!(c.ww));
            }
            if channels.covers(Channel::ColdWhite) {
                state.insert("cw".to_string(), json!(c.cw));
            }
            ("raw", state)
        }
    };

    if let Some(map) = payload.as_object_mut() {
        map.insert(key.to_string(), Value::Object(state));
    }

    payload
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::dispatch::engine::{HsvSnapshot, RawSnapshot};

    fn hsv_output() -> OutputSnapshot {
        OutputSnapshot::Hsv(HsvSnapshot {
            h: 120.0,
            s: 100.0,
            v: 50.0,
            ct: 2700,
        })
    }

    #[test]
    fn empty_mask_includes_all_fields() {
        let payload = with_channel_state(&json!({ "q": "back" }), &hsv_output(), ChannelMask::new());
        assert_eq!(payload["q"], "back");
        assert_eq!(payload["hsv"]["h"], 120.0);
        assert_eq!(payload["hsv"]["s"], 100.0);
        assert_eq!(payload["hsv"]["v"], 50.0);
        assert_eq!(payload["hsv"]["ct"], 2700);
    }

    #[test]
    fn mask_filters_state_fields() {
        let mask = ChannelMask::new().with(Channel::Val);
        let payload = with_channel_state(&json!({}), &hsv_output(), mask);
        let state = payload["hsv"].as_object().unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state["v"], 50.0);
    }

    #[test]
    fn raw_output_renders_raw_object() {
        let output = OutputSnapshot::Raw(RawSnapshot {
            r: 1023,
            g: 0,
            b: 512,
            ww: 0,
            cw: 0,
        });
        let payload = with_channel_state(&json!({}), &output, ChannelMask::new());
        assert_eq!(payload["raw"]["r"], 1023);
        assert_eq!(payload["raw"]["cw"], 0);
        assert!(payload.get("hsv").is_none());
    }

    #[test]
    fn original_request_is_untouched() {
        let root = json!({ "channels": ["v"] });
        let before = root.clone();
        let _ = with_channel_state(&root, &hsv_output(), ChannelMask::new());
        assert_eq!(root, before);
    }
}
