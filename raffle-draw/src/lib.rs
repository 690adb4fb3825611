// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Deterministic, publicly verifiable winner draws.
//!
//! A raffle publishes a seed (typically read from an on-chain seed generator), a pool of ids,
//! a list of ids that may never win and the number of winners. Hashing the seed, seeding a
//! ChaCha20 generator with the digest prefix and drawing until enough distinct eligible ids
//! have been collected gives a result anyone can replay.
//!
//! ```
//! use raffle_draw::{draw, DrawRequest, PoolRange};
//!
//! let request = DrawRequest::new("1234", PoolRange::new(1, 100).unwrap(), 5);
//! assert_eq!(draw(&request).unwrap().to_string(), "34,24,36,87,55");
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod hash;
pub mod pool;
pub mod presets;
pub mod rng;
pub mod seed;

pub use config::RaffleConfig;
pub use draw::{draw, draw_receipt, draw_with, verify, DrawReceipt, DrawRequest, WinnerList};
pub use error::{RaffleError, RaffleResult};
pub use hash::HashScheme;
pub use pool::{ExclusionSet, PoolRange};
pub use presets::{Preset, PRESETS};
pub use seed::{DerivedSeed, Seed};
