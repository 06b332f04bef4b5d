// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `rgbww-node` - command admission and step-clock synchronization for one
//! node in a fleet of networked RGBWW lighting controllers.
//!
//! The crate covers two concerns:
//!
//! - **Command pipeline**: loosely typed request records are decoded into
//!   a strongly typed [`RequestParameters`] model, checked by a pure
//!   validator, and dispatched by a [`CommandProcessor`] onto an injected
//!   animation engine, with optional relay to peer devices.
//! - **Clock synchronization**: a [`ClockCatchUp`] controller steers the
//!   local step timer's tick interval so group animations stay coherent
//!   with a designated master device despite drifting local timers.
//!
//! Transport, persistence, and the color-rendering engine itself are
//! external collaborators; the engine and relay are abstracted behind the
//! [`AnimationEngine`] and [`CommandRelay`] traits.
//!
//! # Command pipeline
//!
//! ```no_run
//! use rgbww_node::CommandProcessor;
//! use serde_json::json;
//!
//! # fn demo(engine: impl rgbww_node::AnimationEngine,
//! #         relay: impl rgbww_node::CommandRelay) {
//! let mut processor = CommandProcessor::new(engine, relay);
//!
//! // Fade hue to 120 degrees over 2000 ramp units, relay to peers.
//! let result = processor.on_color(
//!     &json!({ "hsv": { "h": 120 }, "t": 2000, "cmd": "fade" }),
//!     true,
//! );
//! # let _ = result;
//! # }
//! ```
//!
//! # Clock synchronization
//!
//! ```
//! use rgbww_node::ClockCatchUp;
//!
//! let mut clock = ClockCatchUp::new(1000);
//!
//! // Each received master beat yields the next tick interval.
//! let interval = clock.on_master_clock(0, 0);
//! assert_eq!(interval, 1000);
//! ```

pub mod dispatch;
pub mod error;
pub mod request;
pub mod sync;
pub mod types;

pub use dispatch::{
    AnimationEngine, CommandProcessor, CommandRelay, HsvSnapshot, OutputSnapshot, RawSnapshot,
};
pub use error::{BatchItemError, CommandError, Result, ValidationError};
pub use request::{ColorIntent, HsvTarget, RawTarget, RequestParameters};
pub use sync::{ClockCatchUp, step_delta};
pub use types::{AbsOrRelValue, Channel, ChannelMask, QueuePolicy, Ramp, RampKind, ValueClass};
