// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RaffleError, RaffleResult};
use crate::hash::HashScheme;

/// Number of digest bytes read into the derived seed.
pub const SEED_PREFIX_LEN: usize = 8;

/// An opaque seed string, usually a decimal numeral read from a seed generator contract.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(String);

impl Seed {
    pub fn new(seed: impl Into<String>) -> Self {
        Seed(seed.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash this seed with `scheme` and derive the generator seed from the digest.
    pub fn derive(&self, scheme: HashScheme) -> RaffleResult<DerivedSeed> {
        let digest = scheme.digest(self.as_bytes());
        let derived = DerivedSeed::from_digest(&digest)?;
        debug!(%scheme, digest = %hex::encode(&digest), derived = derived.0, "derived seed");
        Ok(derived)
    }
}

impl From<&str> for Seed {
    fn from(seed: &str) -> Self {
        Seed::new(seed)
    }
}

impl From<String> for Seed {
    fn from(seed: String) -> Self {
        Seed(seed)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The 64-bit integer that initializes the draw generator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedSeed(u64);

impl DerivedSeed {
    /// Read the big-endian 64-bit prefix of `digest`.
    pub fn from_digest(digest: &[u8]) -> RaffleResult<Self> {
        let prefix: [u8; SEED_PREFIX_LEN] = digest
            .get(..SEED_PREFIX_LEN)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(RaffleError::InvalidDigest(digest.len()))?;
        Ok(DerivedSeed(u64::from_be_bytes(prefix)))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for DerivedSeed {
    fn from(value: u64) -> Self {
        DerivedSeed(value)
    }
}

impl fmt::Display for DerivedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
