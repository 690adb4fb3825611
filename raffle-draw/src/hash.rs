// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hash functions used to turn a raffle seed into generator state.
//!
//! Every function is exposed through the [HashFunction] trait, and [HashScheme] selects one
//! at runtime from its name (`md5`, `sha256`, `sha3-256`, `blake2b-256`).

use std::fmt;
use std::str::FromStr;

use digest::consts::U32;
use serde::{Deserialize, Serialize};

use crate::error::RaffleError;

/// The output of a hash function, `DIGEST_LEN` bytes long.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Digest<const DIGEST_LEN: usize> {
    pub digest: [u8; DIGEST_LEN],
}

impl<const DIGEST_LEN: usize> Digest<DIGEST_LEN> {
    pub fn to_vec(&self) -> Vec<u8> {
        self.digest.to_vec()
    }
}

impl<const DIGEST_LEN: usize> AsRef<[u8]> for Digest<DIGEST_LEN> {
    fn as_ref(&self) -> &[u8] {
        &self.digest
    }
}

impl<const DIGEST_LEN: usize> fmt::Display for Digest<DIGEST_LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.digest))
    }
}

/// Trait implemented by hash functions providing an output of fixed length.
pub trait HashFunction<const DIGEST_LEN: usize>: Default {
    /// Process the given data, and update the internal state of the hash function.
    fn update<Data: AsRef<[u8]>>(&mut self, data: Data);

    /// Retrieve the result and consume the hash function.
    fn finalize(self) -> Digest<DIGEST_LEN>;

    /// Compute the digest of the given data and consume the hash function.
    fn digest<Data: AsRef<[u8]>>(data: Data) -> Digest<DIGEST_LEN> {
        let mut h = Self::default();
        h.update(data);
        h.finalize()
    }
}

/// Wraps any RustCrypto [digest::Digest] whose output is `DIGEST_LEN` bytes.
#[derive(Default, Clone)]
pub struct HashFunctionWrapper<Variant, const DIGEST_LEN: usize>(Variant);

impl<Variant: digest::Digest + Default, const DIGEST_LEN: usize> HashFunction<DIGEST_LEN>
    for HashFunctionWrapper<Variant, DIGEST_LEN>
{
    fn update<Data: AsRef<[u8]>>(&mut self, data: Data) {
        digest::Digest::update(&mut self.0, data);
    }

    fn finalize(self) -> Digest<DIGEST_LEN> {
        let mut output = [0u8; DIGEST_LEN];
        output.copy_from_slice(&digest::Digest::finalize(self.0));
        Digest { digest: output }
    }
}

/// MD5. Not collision resistant, kept because the historical CBOX draws were seeded with it.
pub type Md5 = HashFunctionWrapper<md5::Md5, 16>;

/// SHA-2 with 256 bit output.
pub type Sha256 = HashFunctionWrapper<sha2::Sha256, 32>;

/// SHA-3 with 256 bit output.
pub type Sha3_256 = HashFunctionWrapper<sha3::Sha3_256, 32>;

/// BLAKE2b truncated to 256 bits.
pub type Blake2b256 = HashFunctionWrapper<blake2::Blake2b<U32>, 32>;

/// Runtime choice of the hash function applied to a seed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum HashScheme {
    #[default]
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha3-256")]
    Sha3_256,
    #[serde(rename = "blake2b-256")]
    Blake2b256,
}

impl HashScheme {
    pub const ALL: [HashScheme; 4] = [
        HashScheme::Md5,
        HashScheme::Sha256,
        HashScheme::Sha3_256,
        HashScheme::Blake2b256,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HashScheme::Md5 => "md5",
            HashScheme::Sha256 => "sha256",
            HashScheme::Sha3_256 => "sha3-256",
            HashScheme::Blake2b256 => "blake2b-256",
        }
    }

    /// Hash `data` with this scheme.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            HashScheme::Md5 => Md5::digest(data).to_vec(),
            HashScheme::Sha256 => Sha256::digest(data).to_vec(),
            HashScheme::Sha3_256 => Sha3_256::digest(data).to_vec(),
            HashScheme::Blake2b256 => Blake2b256::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashScheme {
    type Err = RaffleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashScheme::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RaffleError::UnknownHashScheme(s.to_string()))
    }
}
