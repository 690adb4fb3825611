// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Raffles compiled into the crate.

use std::ops::RangeInclusive;

use crate::draw::DrawRequest;
use crate::error::{RaffleError, RaffleResult};
use crate::hash::HashScheme;
use crate::pool::{ExclusionSet, PoolRange};

/// Placeholder seed of the CBOX giveaway. The real value is read from the
/// CBOXRandomSeedGenerator contract at
/// https://etherscan.io/address/0xaf8BFFf3962E49afaEA9e49BbaFAb57F4daa77E0#readContract
pub const CBOX_SEED_PLACEHOLDER: &str = "GET_SEED_FROM_CBOXRandomSeedGenerator_CONTRACT";

/// Highest CBOX id.
pub const CBOX_MAX_ID: u32 = 6302;

/// CBOXes owned by the team or investors. They never win.
pub const CBOX_EXCLUSIONS: &[RangeInclusive<u32>] = &[
    0..=0,
    678..=679,
    742..=742,
    2478..=2479,
    2654..=2654,
    3217..=3217,
    3637..=3637,
    3826..=3826,
    3972..=3973,
    4037..=4037,
    5046..=5046,
    5174..=5174,
    5217..=5217,
    5285..=5285,
    5476..=5574,
    5599..=5636,
    5642..=5648,
    5714..=5714,
    5745..=5745,
    5926..=5926,
    6104..=6117,
    6120..=6120,
    6124..=6164,
    6277..=6277,
];

pub const CBOX_SHUFFLE_SEED: &str =
    "63477085376221734204645267060198448640767645553793835987915088287774969511994";

/// A named raffle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub seed: &'static str,
    pub min: u32,
    pub max: u32,
    pub winners: usize,
    pub exclusions: &'static [RangeInclusive<u32>],
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "cbox",
        description: "3 CBOX winners out of 0-6302, team and investor boxes excluded",
        seed: CBOX_SEED_PLACEHOLDER,
        min: 0,
        max: CBOX_MAX_ID,
        winners: 3,
        exclusions: CBOX_EXCLUSIONS,
    },
    Preset {
        name: "cbox-shuffle",
        description: "ordering of all 14 slots 0-13",
        seed: CBOX_SHUFFLE_SEED,
        min: 0,
        max: 13,
        winners: 14,
        exclusions: &[],
    },
];

impl Preset {
    pub fn find(name: &str) -> RaffleResult<&'static Preset> {
        PRESETS
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| RaffleError::UnknownPreset(name.to_string()))
    }

    pub fn request(&self) -> RaffleResult<DrawRequest> {
        Ok(
            DrawRequest::new(self.seed, PoolRange::new(self.min, self.max)?, self.winners)
                .with_exclusions(ExclusionSet::from_ranges(self.exclusions))
                .with_hash(HashScheme::Md5),
        )
    }
}
