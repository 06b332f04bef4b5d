// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the command pipeline.
//!
//! This module provides the typed building blocks a raw request is decoded
//! into before validation:
//!
//! - [`AbsOrRelValue`] - A single field value, absolute or relative
//! - [`ValueClass`] - The range/wrap class a value belongs to
//! - [`Ramp`] - Transition timing, as a duration or a rate
//! - [`QueuePolicy`] - Animation queue admission/replacement policy
//! - [`Channel`] / [`ChannelMask`] - Logical channel addressing

mod channel;
mod queue;
mod ramp;
mod value;

pub use channel::{Channel, ChannelMask};
pub use queue::QueuePolicy;
pub use ramp::{Ramp, RampKind};
pub use value::{AbsOrRelValue, ValueClass};
