// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Collection of errors to be used in raffle-draw.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum RaffleError {
    /// The pool upper bound lies below its lower bound.
    #[error("Invalid pool range [{min}, {max}]")]
    InvalidPool { min: u32, max: u32 },

    /// More winners requested than the pool can supply once exclusions are removed.
    #[error("Infeasible draw: {requested} winners requested but only {eligible} ids are eligible")]
    Infeasible { requested: usize, eligible: u64 },

    /// A digest too short to carry a 64-bit seed prefix.
    #[error("Digest of {0} bytes is too short to derive a seed")]
    InvalidDigest(usize),

    #[error("Invalid winner list: {0}")]
    InvalidWinnerList(String),

    #[error("Invalid exclusion list: {0}")]
    InvalidExclusions(String),

    #[error("Unknown hash scheme '{0}'")]
    UnknownHashScheme(String),

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    /// The claimed winners do not match a replay of the draw.
    #[error("Winners do not match: expected {expected}, got {claimed}")]
    WinnerMismatch { expected: String, claimed: String },

    #[error("Invalid raffle config: {0}")]
    Config(String),
}

pub type RaffleResult<T> = Result<T, RaffleError>;
