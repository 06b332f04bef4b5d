// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical channel addressing.
//!
//! Commands can be scoped to a subset of a node's logical channels via a
//! [`ChannelMask`]. An empty mask means "all channels of the active color
//! mode" - both the engine contract and the relay payload builder treat it
//! that way.

use serde::{Deserialize, Serialize};

/// One logical channel of an RGBWW node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Hue component (HSV mode).
    #[serde(rename = "h")]
    Hue,
    /// Saturation component (HSV mode).
    #[serde(rename = "s")]
    Sat,
    /// Value/brightness component (HSV mode).
    #[serde(rename = "v")]
    Val,
    /// Color temperature component (HSV mode).
    #[serde(rename = "ct")]
    ColorTemp,
    /// Red output channel (raw mode).
    #[serde(rename = "r")]
    Red,
    /// Green output channel (raw mode).
    #[serde(rename = "g")]
    Green,
    /// Blue output channel (raw mode).
    #[serde(rename = "b")]
    Blue,
    /// Warm white output channel (raw mode).
    #[serde(rename = "ww")]
    WarmWhite,
    /// Cold white output channel (raw mode).
    #[serde(rename = "cw")]
    ColdWhite,
}

impl Channel {
    const ALL: [Self; 9] = [
        Self::Hue,
        Self::Sat,
        Self::Val,
        Self::ColorTemp,
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::WarmWhite,
        Self::ColdWhite,
    ];

    /// Maps a request token to a channel.
    ///
    /// Only the HSV-mode tokens are addressable from requests; anything
    /// else yields `None` and is silently dropped by the request decoder.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "h" => Some(Self::Hue),
            "s" => Some(Self::Sat),
            "v" => Some(Self::Val),
            "ct" => Some(Self::ColorTemp),
            _ => None,
        }
    }

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// A set of logical channels, stored as a small bitset.
///
/// # Examples
///
/// ```
/// use rgbww_node::types::{Channel, ChannelMask};
///
/// let mut mask = ChannelMask::new();
/// assert!(mask.is_empty());
///
/// mask.insert(Channel::Hue);
/// mask.insert(Channel::Val);
/// assert!(mask.contains(Channel::Hue));
/// assert!(!mask.contains(Channel::Sat));
///
/// // An empty mask covers everything.
/// assert!(ChannelMask::new().covers(Channel::Sat));
/// assert!(!mask.covers(Channel::Sat));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ChannelMask(u16);

impl ChannelMask {
    /// Creates an empty mask.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Adds a channel to the mask.
    pub const fn insert(&mut self, channel: Channel) {
        self.0 |= channel.bit();
    }

    /// Returns a copy of the mask with the channel added.
    #[must_use]
    pub const fn with(mut self, channel: Channel) -> Self {
        self.insert(channel);
        self
    }

    /// Returns true if the channel is explicitly in the mask.
    #[must_use]
    pub const fn contains(&self, channel: Channel) -> bool {
        self.0 & channel.bit() != 0
    }

    /// Returns true if the mask addresses the channel: either explicitly,
    /// or implicitly because the mask is empty (empty means "all").
    #[must_use]
    pub const fn covers(&self, channel: Channel) -> bool {
        self.is_empty() || self.contains(channel)
    }

    /// Returns true if no channel is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the number of channels in the mask.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the channels in the mask.
    pub fn iter(&self) -> impl Iterator<Item = Channel> {
        let mask = *self;
        Channel::ALL.into_iter().filter(move |ch| mask.contains(*ch))
    }
}

impl FromIterator<Channel> for ChannelMask {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut mask = Self::new();
        for ch in iter {
            mask.insert(ch);
        }
        mask
    }
}
