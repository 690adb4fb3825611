// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::draw::DrawRequest;
use crate::error::{RaffleError, RaffleResult};
use crate::hash::HashScheme;
use crate::pool::{ExclusionSet, PoolRange};
use crate::seed::Seed;

/// A raffle described in JSON.
///
/// ```json
/// {
///   "seed": "1234",
///   "pool": { "min": 0, "max": 6302 },
///   "winners": 3,
///   "exclusions": "0,678-679",
///   "hash": "md5"
/// }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaffleConfig {
    pub seed: Seed,
    pub pool: PoolRange,
    pub winners: usize,
    #[serde(default)]
    pub exclusions: ExclusionSet,
    #[serde(default)]
    pub hash: HashScheme,
}

impl RaffleConfig {
    pub fn from_json(json: &str) -> RaffleResult<Self> {
        serde_json::from_str(json).map_err(|e| RaffleError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> RaffleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RaffleError::Config(e.to_string()))
    }

    pub fn into_request(self) -> DrawRequest {
        DrawRequest::new(self.seed, self.pool, self.winners)
            .with_exclusions(self.exclusions)
            .with_hash(self.hash)
    }
}
