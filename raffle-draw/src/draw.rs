// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The deterministic draw.
//!
//! A [DrawRequest] names a seed, a pool, how many winners to pick and which ids may never win.
//! [draw] hashes the seed, seeds a fresh [DrawRng] with the 64-bit digest prefix and keeps
//! drawing ids from the pool until enough distinct, non-excluded winners have been collected.
//! Anyone holding the same request can [verify] a published result.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::error::{RaffleError, RaffleResult};
use crate::hash::HashScheme;
use crate::pool::{ExclusionSet, PoolRange};
use crate::rng::{uniform_inclusive, AllowedRng, DrawRng};
use crate::seed::{DerivedSeed, Seed};

/// Everything that determines the outcome of a draw.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrawRequest {
    pub seed: Seed,
    pub pool: PoolRange,
    pub target_count: usize,
    pub exclusions: ExclusionSet,
    pub hash: HashScheme,
}

impl DrawRequest {
    /// A request with no exclusions using the default hash scheme.
    pub fn new(seed: impl Into<Seed>, pool: PoolRange, target_count: usize) -> Self {
        DrawRequest {
            seed: seed.into(),
            pool,
            target_count,
            exclusions: ExclusionSet::new(),
            hash: HashScheme::default(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_hash(mut self, hash: HashScheme) -> Self {
        self.hash = hash;
        self
    }

    /// Number of ids that can win.
    pub fn eligible(&self) -> u64 {
        self.exclusions.eligible_in(&self.pool)
    }

    /// Fails with [RaffleError::Infeasible] if the pool cannot supply enough winners.
    pub fn check_feasible(&self) -> RaffleResult<()> {
        check_feasible(&self.pool, self.target_count, &self.exclusions)
    }

    pub fn derived_seed(&self) -> RaffleResult<DerivedSeed> {
        self.seed.derive(self.hash)
    }
}

/// Winners in the order they were drawn.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WinnerList(Vec<u32>);

impl WinnerList {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for WinnerList {
    fn from(winners: Vec<u32>) -> Self {
        WinnerList(winners)
    }
}

impl fmt::Display for WinnerList {
    /// Comma separated, no brackets or whitespace, e.g. `42,1337,7`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for WinnerList {
    type Err = RaffleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(WinnerList::default());
        }
        s.split(',')
            .map(|id| {
                id.trim()
                    .parse::<u32>()
                    .map_err(|_| RaffleError::InvalidWinnerList(id.to_string()))
            })
            .collect::<RaffleResult<Vec<_>>>()
            .map(WinnerList)
    }
}

/// A draw result together with the inputs needed to replay it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawReceipt {
    pub seed: Seed,
    pub hash: HashScheme,
    pub derived_seed: DerivedSeed,
    pub pool: PoolRange,
    pub winners: WinnerList,
}

/// Upper bound on the winner slots reserved before drawing. Larger draws grow as they go.
const MAX_PREALLOCATED_WINNERS: usize = 4096;

fn preallocated(target_count: usize) -> usize {
    target_count.min(MAX_PREALLOCATED_WINNERS)
}

fn check_feasible(
    pool: &PoolRange,
    target_count: usize,
    exclusions: &ExclusionSet,
) -> RaffleResult<()> {
    let eligible = exclusions.eligible_in(pool);
    if target_count as u64 > eligible {
        return Err(RaffleError::Infeasible {
            requested: target_count,
            eligible,
        });
    }
    Ok(())
}

/// Run the draw described by `request`.
pub fn draw(request: &DrawRequest) -> RaffleResult<WinnerList> {
    Ok(draw_receipt(request)?.winners)
}

/// Run the draw described by `request` and keep the derived seed alongside the winners.
pub fn draw_receipt(request: &DrawRequest) -> RaffleResult<DrawReceipt> {
    request.check_feasible()?;
    let derived_seed = request.derived_seed()?;
    let mut rng = DrawRng::from_seed(derived_seed);
    let winners = draw_with(
        &mut rng,
        &request.pool,
        request.target_count,
        &request.exclusions,
    )?;
    info!(
        seed = %request.seed,
        pool = %request.pool,
        winners = %winners,
        "draw complete"
    );
    Ok(DrawReceipt {
        seed: request.seed.clone(),
        hash: request.hash,
        derived_seed,
        pool: request.pool,
        winners,
    })
}

/// Draw `target_count` distinct winners from `pool` with the given generator.
///
/// Candidates that are excluded or already drawn are skipped. The request is checked up front,
/// so an infeasible one returns [RaffleError::Infeasible] rather than spinning forever.
pub fn draw_with<R: AllowedRng>(
    rng: &mut R,
    pool: &PoolRange,
    target_count: usize,
    exclusions: &ExclusionSet,
) -> RaffleResult<WinnerList> {
    check_feasible(pool, target_count, exclusions)?;

    let capacity = preallocated(target_count);
    let mut winners = Vec::with_capacity(capacity);
    let mut drawn = HashSet::with_capacity(capacity);
    let mut draws: u64 = 0;
    while winners.len() < target_count {
        let candidate = uniform_inclusive(rng, pool);
        draws += 1;
        if exclusions.contains(candidate) {
            trace!(candidate, "excluded");
            continue;
        }
        if !drawn.insert(candidate) {
            trace!(candidate, "already drawn");
            continue;
        }
        debug!(candidate, position = winners.len(), "winner drawn");
        winners.push(candidate);
    }
    debug!(draws, winners = winners.len(), "draw loop finished");
    Ok(WinnerList(winners))
}

/// Replay `request` and check that it produces exactly `claimed`, in order.
pub fn verify(request: &DrawRequest, claimed: &WinnerList) -> RaffleResult<()> {
    let expected = draw(request)?;
    if &expected != claimed {
        return Err(RaffleError::WinnerMismatch {
            expected: expected.to_string(),
            claimed: claimed.to_string(),
        });
    }
    Ok(())
}
