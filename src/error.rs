// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `rgbww-node` command pipeline.
//!
//! Two layers: [`ValidationError`] covers rejections produced by the pure
//! request validator, [`CommandError`] covers everything a dispatched
//! command can report back to its caller (validation, admission, batch
//! aggregation, unknown command names).
//!
//! A missing or malformed request field is never an error by itself. It
//! decodes to an absent value and only surfaces here if a validator check
//! requires the field.

use thiserror::Error;

/// A rejection produced by [`RequestParameters::validate`].
///
/// Each variant corresponds to exactly one validator check. Validation
/// short-circuits, so a rejected request reports the first failing check.
///
/// [`RequestParameters::validate`]: crate::request::RequestParameters::validate
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A color temperature is outside `[100, 500]` and `[2000, 10000]`.
    ///
    /// The gap between the mired-scale range and the Kelvin-scale range is
    /// deliberate: values in `(500, 2000)` match neither scale.
    #[error("bad param for ct: {0}")]
    BadColorTemp(f64),

    /// An HSV request carried none of `h`, `s`, `v`, `ct`.
    #[error("need at least one HSVCT component")]
    MissingHsvComponent,

    /// A raw request carried none of `r`, `g`, `b`, `ww`, `cw`.
    #[error("need at least one RAW component")]
    MissingRawComponent,

    /// The `q` field held a token that maps to no queue policy.
    #[error("invalid queue policy")]
    InvalidQueuePolicy,

    /// The `cmd` field was neither `"fade"` nor `"solid"`.
    #[error("invalid cmd: {0}")]
    InvalidCommandKind(String),

    /// The `d` field was neither `0` nor `1`.
    #[error("invalid direction: {0}")]
    InvalidDirection(i64),

    /// A speed-type ramp with a value of zero. Speed is a divisor
    /// downstream; a zero-duration time ramp is legal, a zero rate is not.
    #[error("speed cannot be 0")]
    ZeroSpeed,

    /// The request carried no usable color intent (neither `hsv` nor
    /// `raw`) where a color command requires one.
    #[error("no color object")]
    NoColorObject,
}

/// One failed item of a batch color command.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("cmd {index}: {reason}")]
pub struct BatchItemError {
    /// Zero-based position of the item in the `cmds` array.
    pub index: usize,
    /// Why the item failed.
    pub reason: Box<CommandError>,
}

/// The result of a rejected or partially failed command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    /// The request failed validation before reaching the engine.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The engine declined to admit a validated command.
    #[error("queue full")]
    QueueFull,

    /// One or more items of a batch color command failed. Every item is
    /// still attempted; the list holds one entry per failed item.
    #[error("{}", join_batch(.0))]
    Batch(Vec<BatchItemError>),

    /// No handler matched the dispatched command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Renders batch failures as the pipe-joined reason list reported to
/// external callers.
fn join_batch(items: &[BatchItemError]) -> String {
    let mut out = String::new();
    for item in items {
        if !out.is_empty() {
            out.push('|');
        }
        out.push_str(&item.to_string());
    }
    out
}

/// A specialized Result type for command operations.
pub type Result<T> = std::result::Result<T, CommandError>;
