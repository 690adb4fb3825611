// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use proptest::prelude::*;
use raffle_draw::{
    draw, verify, DrawRequest, ExclusionSet, HashScheme, PoolRange, RaffleError, WinnerList,
};

fn arb_scheme() -> impl Strategy<Value = HashScheme> {
    prop::sample::select(HashScheme::ALL.to_vec())
}

/// A pool of at most 200 ids, some exclusions (possibly outside the pool) and a feasible count.
fn arb_request() -> impl Strategy<Value = DrawRequest> {
    (
        ".*",
        0u32..10_000,
        0u32..200,
        prop::collection::btree_set(0u32..10_300, 0..64),
        arb_scheme(),
    )
        .prop_flat_map(|(seed, min, width, excluded, hash)| {
            let pool = PoolRange::new(min, min + width).unwrap();
            let exclusions: ExclusionSet = excluded.into_iter().collect();
            let eligible = exclusions.eligible_in(&pool) as usize;
            (0..=eligible).prop_map(move |count| {
                DrawRequest::new(seed.clone(), pool, count)
                    .with_exclusions(exclusions.clone())
                    .with_hash(hash)
            })
        })
}

proptest! {
    #[test]
    fn winners_are_distinct_in_range_and_eligible(request in arb_request()) {
        let winners = draw(&request).unwrap();
        prop_assert_eq!(winners.len(), request.target_count);

        let distinct: HashSet<u32> = winners.iter().collect();
        prop_assert_eq!(distinct.len(), winners.len());

        for id in winners.iter() {
            prop_assert!(request.pool.contains(id));
            prop_assert!(!request.exclusions.contains(id));
        }
    }

    #[test]
    fn draws_replay_identically(request in arb_request()) {
        let first = draw(&request).unwrap();
        prop_assert_eq!(&first, &draw(&request.clone()).unwrap());
        prop_assert!(verify(&request, &first).is_ok());
    }

    #[test]
    fn text_form_round_trips(request in arb_request()) {
        let winners = draw(&request).unwrap();
        let text = winners.to_string();
        prop_assert!(!text.contains(' ') && !text.contains('['));
        prop_assert_eq!(text.parse::<WinnerList>().unwrap(), winners);
    }

    #[test]
    fn shorter_draws_are_prefixes(request in arb_request()) {
        // Candidates are consumed in the same order whatever the target count.
        let full = draw(&request).unwrap();
        let mut shorter = request.clone();
        shorter.target_count = request.target_count / 2;
        let prefix = draw(&shorter).unwrap();
        prop_assert_eq!(prefix.as_slice(), &full.as_slice()[..shorter.target_count]);
    }

    #[test]
    fn oversized_requests_are_rejected(seed in ".*", width in 0u32..50, extra in 1usize..10) {
        let pool = PoolRange::new(0, width).unwrap();
        let requested = width as usize + 1 + extra;
        let request = DrawRequest::new(seed, pool, requested);
        prop_assert_eq!(
            draw(&request),
            Err(RaffleError::Infeasible { requested, eligible: u64::from(width) + 1 })
        );
    }
}

#[test]
fn full_pool_draw_is_a_permutation() {
    let pool = PoolRange::new(100, 163).unwrap();
    let winners = draw(&DrawRequest::new("permutation", pool, 64)).unwrap();
    let mut sorted = winners.into_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (100..=163).collect::<Vec<_>>());
}
