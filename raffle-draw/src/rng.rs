// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The seeded generator behind every draw.
//!
//! Draws use ChaCha20 seeded through [SeedableRng::seed_from_u64] and map its 64-bit outputs
//! onto a range with [uniform_inclusive]. Both steps are fixed here rather than delegated to
//! `rand`'s range sampling so a draw replays identically on any implementation that follows
//! the same two steps.

use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::pool::PoolRange;
use crate::seed::DerivedSeed;

/// Trait for random number generators that a draw accepts.
pub trait AllowedRng: CryptoRng + RngCore {}

impl<T: CryptoRng + RngCore> AllowedRng for T {}

/// Locally owned generator for a single draw.
#[derive(Clone, Debug)]
pub struct DrawRng(ChaCha20Rng);

impl DrawRng {
    pub fn from_seed(seed: DerivedSeed) -> Self {
        DrawRng(ChaCha20Rng::seed_from_u64(seed.value()))
    }
}

impl RngCore for DrawRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for DrawRng {}

/// Draw an id uniformly from `pool`.
///
/// Outputs of `next_u64` at or above the largest multiple of the pool size are rejected, so no
/// id is favoured by modulo bias.
pub fn uniform_inclusive<R: RngCore + ?Sized>(rng: &mut R, pool: &PoolRange) -> u32 {
    let span = pool.size();
    let limit = u64::MAX - (u64::MAX % span);
    loop {
        let x = rng.next_u64();
        if x < limit {
            // x % span < span <= 2^32, so the sum stays within the pool.
            return pool.min() + (x % span) as u32;
        }
    }
}
