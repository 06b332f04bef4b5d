// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Animation queue admission policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The replacement rule applied when a new animation targets a channel that
/// already has queued or running animations.
///
/// An unrecognized policy token decodes to [`QueuePolicy::Invalid`], which
/// must fail validation. It is a sentinel, never silently coerced to a
/// default; a request that *omits* the policy gets [`QueuePolicy::Back`].
///
/// # Examples
///
/// ```
/// use rgbww_node::types::QueuePolicy;
///
/// assert_eq!(QueuePolicy::from_token("front_reset"), QueuePolicy::FrontReset);
/// assert_eq!(QueuePolicy::from_token("bogus"), QueuePolicy::Invalid);
/// assert_eq!(QueuePolicy::default(), QueuePolicy::Back);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePolicy {
    /// Append to the end of the queue.
    #[default]
    Back,
    /// Pre-empt the running animation; it resumes afterwards.
    Front,
    /// Pre-empt and restart the interrupted animation from its beginning.
    FrontReset,
    /// Reject the command if an animation is queued or running.
    Single,
    /// Sentinel for an unrecognized policy token.
    Invalid,
}

impl QueuePolicy {
    /// Maps a request token to a policy.
    ///
    /// Anything but the four known tokens yields [`QueuePolicy::Invalid`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "back" => Self::Back,
            "front" => Self::Front,
            "front_reset" => Self::FrontReset,
            "single" => Self::Single,
            _ => Self::Invalid,
        }
    }

    /// Returns the wire token for this policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Front => "front",
            Self::FrontReset => "front_reset",
            Self::Single => "single",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for QueuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
