// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command dispatch.
//!
//! [`CommandProcessor`] turns validated requests into animation engine
//! calls. One operation per externally named command kind: `color`,
//! `stop`, `skip`, `pause`, `continue`, `blink`, `direct`. Each operation
//! takes an already-deserialized request record plus a relay flag and
//! reports its outcome synchronously.

mod engine;
mod payload;

pub use engine::{AnimationEngine, CommandRelay, HsvSnapshot, OutputSnapshot, RawSnapshot};
pub use payload::with_channel_state;

use serde_json::Value;
use tracing::debug;

use crate::error::{BatchItemError, CommandError, Result};
use crate::request::{ColorIntent, RequestParameters};
use crate::types::Ramp;

/// Blink period used when the request does not specify a ramp.
const BLINK_DEFAULT_PERIOD: f64 = 500.0;

/// Maps validated requests onto an animation engine and optionally relays
/// them to peer devices.
///
/// Collaborators are injected at construction; the processor holds no
/// other state and assumes an externally serialized call sequence.
///
/// # Examples
///
/// ```no_run
/// use rgbww_node::dispatch::CommandProcessor;
/// use serde_json::json;
///
/// # fn demo(engine: impl rgbww_node::dispatch::AnimationEngine,
/// #         relay: impl rgbww_node::dispatch::CommandRelay) {
/// let mut processor = CommandProcessor::new(engine, relay);
/// let outcome = processor.dispatch("color", &json!({ "hsv": { "v": 40 } }), true);
/// # let _ = outcome;
/// # }
/// ```
#[derive(Debug)]
pub struct CommandProcessor<E, R> {
    engine: E,
    relay: R,
}

impl<E: AnimationEngine, R: CommandRelay> CommandProcessor<E, R> {
    /// Creates a processor driving the given engine and relay.
    pub const fn new(engine: E, relay: R) -> Self {
        Self { engine, relay }
    }

    /// Returns a reference to the animation engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Consumes the processor and returns its collaborators.
    pub fn into_parts(self) -> (E, R) {
        (self.engine, self.relay)
    }

    /// Dispatches a command by its external name.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnknownCommand`] when no handler matches, otherwise
    /// whatever the matched operation reports.
    pub fn dispatch(&mut self, method: &str, root: &Value, relay: bool) -> Result<()> {
        debug!(method, relay, "dispatching command");
        match method {
            "color" => self.on_color(root, relay),
            "stop" => self.on_stop(root, relay),
            "skip" => self.on_skip(root, relay),
            "pause" => self.on_pause(root, relay),
            "continue" => self.on_continue(root, relay),
            "blink" => self.on_blink(root, relay),
            "direct" => self.on_direct(root, relay),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Handles a `color` command: a single request or a batch carried in a
    /// `cmds` array.
    ///
    /// Batch items are attempted independently with no early abort, since
    /// each may target different channels; the result aggregates every
    /// failed item.
    ///
    /// # Errors
    ///
    /// A validation rejection or [`CommandError::QueueFull`] for a single
    /// request; [`CommandError::Batch`] when any batch item failed.
    pub fn on_color(&mut self, root: &Value, relay: bool) -> Result<()> {
        let result = if let Some(cmds) = root.get("cmds").and_then(Value::as_array) {
            let mut failures = Vec::new();
            for (index, cmd) in cmds.iter().enumerate() {
                if let Err(reason) = self.single_color(cmd) {
                    failures.push(BatchItemError {
                        index,
                        reason: Box::new(reason),
                    });
                }
            }
            if failures.is_empty() {
                Ok(())
            } else {
                Err(CommandError::Batch(failures))
            }
        } else {
            self.single_color(root)
        };

        if relay {
            self.relay.relay("color", root.clone());
        }

        result
    }

    /// Handles a `stop` command: clears the queue and aborts the running
    /// animation for the masked channels, then direct-applies any color
    /// fields carried in the same request.
    ///
    /// # Errors
    ///
    /// None currently; kept fallible for a uniform operation signature.
    pub fn on_stop(&mut self, root: &Value, relay: bool) -> Result<()> {
        let params = RequestParameters::from_value(root);
        self.engine.clear_queue(params.channels);
        self.engine.skip_current(params.channels);
        self.apply_direct(&params);

        if relay {
            self.relay_with_state("stop", root, &params);
        }
        Ok(())
    }

    /// Handles a `skip` command: advances past the running animation
    /// without clearing the rest of the queue, then direct-applies any
    /// color fields.
    ///
    /// # Errors
    ///
    /// None currently; kept fallible for a uniform operation signature.
    pub fn on_skip(&mut self, root: &Value, relay: bool) -> Result<()> {
        let params = RequestParameters::from_value(root);
        self.engine.skip_current(params.channels);
        self.apply_direct(&params);

        if relay {
            self.relay_with_state("skip", root, &params);
        }
        Ok(())
    }

    /// Handles a `pause` command: suspends queue processing, then
    /// direct-applies any color fields.
    ///
    /// # Errors
    ///
    /// None currently; kept fallible for a uniform operation signature.
    pub fn on_pause(&mut self, root: &Value, relay: bool) -> Result<()> {
        let params = RequestParameters::from_value(root);
        self.engine.pause(params.channels);
        self.apply_direct(&params);

        if relay {
            self.relay_with_state("pause", root, &params);
        }
        Ok(())
    }

    /// Handles a `continue` command: resumes queue processing for the
    /// masked channels.
    ///
    /// # Errors
    ///
    /// None currently; kept fallible for a uniform operation signature.
    pub fn on_continue(&mut self, root: &Value, relay: bool) -> Result<()> {
        let params = RequestParameters::from_value(root);
        self.engine.resume(params.channels);

        if relay {
            self.relay.relay("continue", root.clone());
        }
        Ok(())
    }

    /// Handles a `blink` command. The period defaults to 500 ramp units
    /// when the request does not carry one.
    ///
    /// # Errors
    ///
    /// [`CommandError::QueueFull`] when the engine declines the blink.
    pub fn on_blink(&mut self, root: &Value, relay: bool) -> Result<()> {
        let mut params = RequestParameters {
            ramp: Ramp::time(BLINK_DEFAULT_PERIOD),
            ..RequestParameters::default()
        };
        params.merge(root);

        let admitted = self.engine.blink(
            params.channels,
            params.ramp.value,
            params.queue,
            params.requeue,
            &params.name,
        );

        if relay {
            self.relay.relay("blink", root.clone());
        }

        if admitted {
            Ok(())
        } else {
            Err(CommandError::QueueFull)
        }
    }

    /// Handles a `direct` command: applies color fields immediately,
    /// bypassing both the queue and validation. Tolerates a fully absent
    /// color intent, for preview-without-commit use.
    ///
    /// # Errors
    ///
    /// None currently; kept fallible for a uniform operation signature.
    pub fn on_direct(&mut self, root: &Value, relay: bool) -> Result<()> {
        let params = RequestParameters::from_value(root);
        self.apply_direct(&params);

        if relay {
            self.relay.relay("direct", root.clone());
        }
        Ok(())
    }

    /// Runs the full parse/validate/admit pipeline for one color request.
    fn single_color(&mut self, root: &Value) -> Result<()> {
        let params = RequestParameters::from_value(root);
        params.validate()?;

        let direction = u8::try_from(params.direction).unwrap_or_default();
        let admitted = match &params.intent {
            ColorIntent::Hsv { target, from } => {
                if let Some(from) = from {
                    // Two-endpoint fades are not wired to report queue
                    // pressure.
                    self.engine
                        .fade_hsv_from(from, target, &params.ramp, direction, params.queue);
                    true
                } else if params.cmd == "fade" {
                    self.engine.fade_hsv(
                        target,
                        &params.ramp,
                        direction,
                        params.queue,
                        params.requeue,
                        &params.name,
                    )
                } else {
                    self.engine.set_hsv(
                        target,
                        params.ramp.value,
                        params.queue,
                        params.requeue,
                        &params.name,
                    )
                }
            }
            ColorIntent::Raw { target, from } => {
                if let Some(from) = from {
                    self.engine
                        .fade_raw_from(from, target, &params.ramp, direction, params.queue);
                    true
                } else if params.cmd == "fade" {
                    self.engine.fade_raw(
                        target,
                        &params.ramp,
                        direction,
                        params.queue,
                        params.requeue,
                        &params.name,
                    )
                } else {
                    self.engine.set_raw(
                        target,
                        params.ramp.value,
                        params.queue,
                        params.requeue,
                        &params.name,
                    )
                }
            }
            // Unreachable after validation; kept explicit for exhaustiveness.
            ColorIntent::Kelvin | ColorIntent::None => {
                return Err(crate::error::ValidationError::NoColorObject.into());
            }
        };

        if admitted {
            Ok(())
        } else {
            Err(CommandError::QueueFull)
        }
    }

    /// Applies any color fields of the request immediately, without
    /// validation. Absent intent is tolerated; kelvin is a pass-through
    /// stub until the engine grows a kelvin entry point.
    fn apply_direct(&mut self, params: &RequestParameters) {
        match &params.intent {
            ColorIntent::Hsv { target, .. } => self.engine.direct_hsv(target),
            ColorIntent::Raw { target, .. } => self.engine.direct_raw(target),
            ColorIntent::Kelvin => {}
            ColorIntent::None => debug!("direct apply without color object"),
        }
    }

    fn relay_with_state(&mut self, command: &str, root: &Value, params: &RequestParameters) {
        let snapshot = self.engine.current_output();
        let payload = payload::with_channel_state(root, &snapshot, params.channels);
        self.relay.relay(command, payload);
    }
}
