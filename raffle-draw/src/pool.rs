// Copyright (c) 2022, Mangekyou Network, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RaffleError, RaffleResult};

/// Inclusive range of candidate ids.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPool", into = "RawPool")]
pub struct PoolRange {
    min: u32,
    max: u32,
}

impl PoolRange {
    pub fn new(min: u32, max: u32) -> RaffleResult<Self> {
        if max < min {
            return Err(RaffleError::InvalidPool { min, max });
        }
        Ok(PoolRange { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of ids in the pool. Never zero.
    pub fn size(&self) -> u64 {
        u64::from(self.max - self.min) + 1
    }

    pub fn contains(&self, id: u32) -> bool {
        (self.min..=self.max).contains(&id)
    }

    pub fn as_range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl fmt::Display for PoolRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPool {
    #[serde(default)]
    min: u32,
    max: u32,
}

impl TryFrom<RawPool> for PoolRange {
    type Error = RaffleError;

    fn try_from(raw: RawPool) -> Result<Self, Self::Error> {
        PoolRange::new(raw.min, raw.max)
    }
}

impl From<PoolRange> for RawPool {
    fn from(pool: PoolRange) -> Self {
        RawPool {
            min: pool.min,
            max: pool.max,
        }
    }
}

/// Ids that may never win.
///
/// Stored as sorted, disjoint inclusive intervals with adjacent ones merged, so a wide range
/// costs as much as a single id. The textual form is a comma separated list of ids and
/// inclusive ranges, e.g. `0,678-679,742`. Whitespace around items is ignored.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExclusionSet {
    ranges: Vec<(u32, u32)>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ranges(ranges: &[RangeInclusive<u32>]) -> Self {
        let mut set = ExclusionSet::new();
        for range in ranges {
            set.insert_range(range.clone());
        }
        set
    }

    /// Returns `true` if `id` was not excluded before.
    pub fn insert(&mut self, id: u32) -> bool {
        let added = !self.contains(id);
        self.insert_range(id..=id);
        added
    }

    /// Exclude every id in `range`. An empty range is a no-op.
    pub fn insert_range(&mut self, range: RangeInclusive<u32>) {
        let (mut start, mut end) = range.into_inner();
        if end < start {
            return;
        }
        // Intervals in lo..hi overlap or touch [start, end] and are folded into it.
        let lo = self
            .ranges
            .partition_point(|&(_, e)| u64::from(e) + 1 < u64::from(start));
        let hi = self
            .ranges
            .partition_point(|&(s, _)| u64::from(s) <= u64::from(end) + 1);
        if lo < hi {
            start = start.min(self.ranges[lo].0);
            end = end.max(self.ranges[hi - 1].1);
        }
        self.ranges.splice(lo..hi, [(start, end)]);
    }

    pub fn contains(&self, id: u32) -> bool {
        let idx = self.ranges.partition_point(|&(_, e)| e < id);
        self.ranges.get(idx).map_or(false, |&(s, _)| s <= id)
    }

    /// Number of excluded ids.
    pub fn len(&self) -> u64 {
        self.ranges
            .iter()
            .map(|&(s, e)| u64::from(e - s) + 1)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The merged intervals in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_ {
        self.ranges.iter().map(|&(s, e)| s..=e)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges().flatten()
    }

    /// Number of excluded ids that fall inside `pool`.
    pub fn count_within(&self, pool: &PoolRange) -> u64 {
        self.ranges
            .iter()
            .filter_map(|&(s, e)| {
                let (lo, hi) = (s.max(pool.min()), e.min(pool.max()));
                (lo <= hi).then(|| u64::from(hi - lo) + 1)
            })
            .sum()
    }

    /// Number of ids in `pool` that can still win.
    pub fn eligible_in(&self, pool: &PoolRange) -> u64 {
        pool.size() - self.count_within(pool)
    }
}

impl FromIterator<u32> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = ExclusionSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl FromStr for ExclusionSet {
    type Err = RaffleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = ExclusionSet::new();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let parse = |id: &str| {
                id.trim()
                    .parse::<u32>()
                    .map_err(|_| RaffleError::InvalidExclusions(item.to_string()))
            };
            match item.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse(start)?, parse(end)?);
                    if end < start {
                        return Err(RaffleError::InvalidExclusions(item.to_string()));
                    }
                    set.insert_range(start..=end);
                }
                None => {
                    set.insert(parse(item)?);
                }
            }
        }
        Ok(set)
    }
}

impl fmt::Display for ExclusionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(start, end)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if start == end {
                write!(f, "{}", start)?;
            } else {
                write!(f, "{}-{}", start, end)?;
            }
        }
        Ok(())
    }
}

impl Serialize for ExclusionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Either the textual form or a plain list of ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExclusions {
    Text(String),
    Ids(Vec<u32>),
}

impl<'de> Deserialize<'de> for ExclusionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawExclusions::deserialize(deserializer)? {
            RawExclusions::Text(text) => text.parse().map_err(serde::de::Error::custom),
            RawExclusions::Ids(ids) => Ok(ids.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_pool_is_rejected() {
        assert_eq!(
            PoolRange::new(10, 9),
            Err(RaffleError::InvalidPool { min: 10, max: 9 })
        );
        assert_eq!(PoolRange::new(7, 7).unwrap().size(), 1);
    }

    #[test]
    fn test_full_pool_len() {
        assert_eq!(PoolRange::new(0, u32::MAX).unwrap().size(), 1 << 32);
    }

    #[test]
    fn test_parse_ids_and_ranges() {
        let set: ExclusionSet = "0, 678-680 ,742".parse().unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 678, 679, 680, 742]);
        assert!("".parse::<ExclusionSet>().unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "1,x".parse::<ExclusionSet>(),
            Err(RaffleError::InvalidExclusions("x".to_string()))
        );
        assert_eq!(
            "9-3".parse::<ExclusionSet>(),
            Err(RaffleError::InvalidExclusions("9-3".to_string()))
        );
        assert!("-4".parse::<ExclusionSet>().is_err());
    }

    #[test]
    fn test_display_collapses_runs() {
        let set: ExclusionSet = [5, 1, 2, 3, 9, 10].into_iter().collect();
        assert_eq!(set.to_string(), "1-3,5,9-10");
        assert_eq!(set.to_string().parse::<ExclusionSet>().unwrap(), set);
    }

    #[test]
    fn test_eligible_ignores_ids_outside_pool() {
        let pool = PoolRange::new(10, 19).unwrap();
        let set: ExclusionSet = [1, 10, 15, 19, 20, 400].into_iter().collect();
        assert_eq!(set.count_within(&pool), 3);
        assert_eq!(set.eligible_in(&pool), 7);
    }

    #[test]
    fn test_overlapping_and_adjacent_ranges_merge() {
        let set: ExclusionSet = "20-30,5-9,1-3,4,25-40,42".parse().unwrap();
        assert_eq!(set.ranges().collect::<Vec<_>>(), vec![1..=9, 20..=40, 42..=42]);
        assert_eq!(set.to_string(), "1-9,20-40,42");
        assert_eq!(set.len(), 31);

        let mut set = ExclusionSet::from_ranges(&[10..=12, 14..=16]);
        assert!(set.insert(13));
        assert!(!set.insert(13));
        assert_eq!(set.ranges().collect::<Vec<_>>(), vec![10..=16]);
    }

    #[test]
    fn test_contains_at_interval_edges() {
        let set: ExclusionSet = "0,10-20,4294967295".parse().unwrap();
        for id in [0, 10, 15, 20, u32::MAX] {
            assert!(set.contains(id), "{id}");
        }
        for id in [1, 9, 21, u32::MAX - 1] {
            assert!(!set.contains(id), "{id}");
        }
        assert!(!ExclusionSet::new().contains(0));
    }

    #[test]
    fn test_full_u32_exclusion_is_compact() {
        let set: ExclusionSet = "0-4294967295".parse().unwrap();
        assert_eq!(set.len(), 1 << 32);
        assert_eq!(set.ranges().count(), 1);
        assert_eq!(set.eligible_in(&PoolRange::new(0, u32::MAX).unwrap()), 0);

        let wide: ExclusionSet = "100-4000000000".parse().unwrap();
        let pool = PoolRange::new(0, u32::MAX).unwrap();
        assert_eq!(wide.eligible_in(&pool), 100 + u64::from(u32::MAX - 4_000_000_000));
        assert_eq!(wide.to_string(), "100-4000000000");
    }

    #[test]
    fn test_exclusions_serialize_as_text() {
        let set: ExclusionSet = "3,7-9".parse().unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), r#""3,7-9""#);
        let ids: ExclusionSet = serde_json::from_str("[9, 3, 8, 7]").unwrap();
        assert_eq!(ids, set);
        assert!(serde_json::from_str::<ExclusionSet>(r#""7-""#).is_err());
    }

    #[test]
    fn test_pool_serde_defaults_min() {
        let pool: PoolRange = serde_json::from_str(r#"{"max": 13}"#).unwrap();
        assert_eq!(pool, PoolRange::new(0, 13).unwrap());
        assert!(serde_json::from_str::<PoolRange>(r#"{"min": 5, "max": 1}"#).is_err());
    }
}
