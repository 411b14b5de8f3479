//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check ordering, capacity and expiry behaviour over
//! generated operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{Cache, ClearTarget, EntryOptions, ManualClock};
use crate::config::CacheConfig;

// == Test Configuration ==
const START_MS: u64 = 1_000_000;

fn new_cache(capacity: usize) -> (Cache<String, ManualClock>, ManualClock) {
    let clock = ManualClock::new(START_MS);
    let cache = Cache::with_clock(CacheConfig::new("prop", capacity), clock.clone()).unwrap();
    (cache, clock)
}

// == Strategies ==
/// Generates short keys so that sequences revisit the same keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e][0-9]{0,1}".prop_map(|s| s)
}

/// Generates unique-ish keys for eviction order tests
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-z ]{1,32}".prop_map(|s| s)
}

/// A cache operation, including clock movement
#[derive(Debug, Clone)]
enum CacheOp {
    Set {
        key: String,
        value: String,
        idle: i64,
        live: i64,
    },
    Get {
        key: String,
    },
    Clear {
        key: String,
    },
    ClearPattern {
        needle: String,
    },
    Limit {
        n: usize,
    },
    Length,
    Advance {
        ms: u64,
    },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy(), -5i64..50, -5i64..50)
            .prop_map(|(key, value, idle, live)| CacheOp::Set { key, value, idle, live }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => key_strategy().prop_map(|key| CacheOp::Clear { key }),
        1 => "[a-e]".prop_map(|needle| CacheOp::ClearPattern { needle }),
        1 => (0usize..10).prop_map(|n| CacheOp::Limit { n }),
        1 => Just(CacheOp::Length),
        2 => (0u64..30).prop_map(|ms| CacheOp::Advance { ms }),
    ]
}

fn apply(cache: &mut Cache<String, ManualClock>, clock: &ManualClock, op: CacheOp) {
    match op {
        CacheOp::Set {
            key,
            value,
            idle,
            live,
        } => cache.set(
            key,
            value,
            EntryOptions::new()
                .with_idle_timeout_ms(idle)
                .with_live_timeout_ms(live),
        ),
        CacheOp::Get { key } => {
            cache.get(&key);
        }
        CacheOp::Clear { key } => {
            cache.clear(key);
        }
        CacheOp::ClearPattern { needle } => {
            cache.clear(ClearTarget::Pattern(needle));
        }
        CacheOp::Limit { n } => {
            cache.limit(n);
        }
        CacheOp::Length => {
            cache.length();
        }
        CacheOp::Advance { ms } => clock.advance(ms),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // The number of live keys never exceeds the current capacity, and the
    // index and list always agree.
    #[test]
    fn prop_capacity_and_structure_hold(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let (mut cache, clock) = new_cache(3);

        for op in ops {
            apply(&mut cache, &clock, op);

            let members = cache.list().len();
            prop_assert!(members <= cache.capacity(), "{} members over capacity {}", members, cache.capacity());
            prop_assert_eq!(cache.keys().len(), members, "index and list disagree");
            cache.list().debug_validate_invariants();
        }
    }

    // Storing V1 then V2 under the same key reads back V2 without growing.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let (mut cache, _) = new_cache(5);

        cache.set(key.clone(), value1, EntryOptions::new());
        let before = cache.length();
        cache.set(key.clone(), value2.clone(), EntryOptions::new());

        prop_assert_eq!(cache.length(), before);
        prop_assert_eq!(cache.get(&key), Some(value2));
    }

    // Filling to capacity and adding one more evicts the earliest never-read key.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::vec(valid_key_strategy(), 2..10),
        new_key in valid_key_strategy()
    ) {
        let mut seen = HashSet::new();
        let unique_keys: Vec<String> = initial_keys
            .into_iter()
            .filter(|key| seen.insert(key.clone()))
            .collect();
        prop_assume!(unique_keys.len() >= 2);
        prop_assume!(!unique_keys.contains(&new_key));

        let (mut cache, _) = new_cache(unique_keys.len());
        for key in &unique_keys {
            cache.set(key.clone(), format!("value_{}", key), EntryOptions::new());
        }
        prop_assert!(cache.is_least(&unique_keys[0]));

        cache.set(new_key.clone(), "new".to_string(), EntryOptions::new());

        prop_assert_eq!(cache.length(), unique_keys.len());
        prop_assert!(!cache.has_key(&unique_keys[0]));
        prop_assert!(cache.is_recent(&new_key));
        for key in unique_keys.iter().skip(1) {
            prop_assert!(cache.has_key(key), "key '{}' should survive", key);
        }
    }

    // A read moves the key away from the eviction end.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::vec(valid_key_strategy(), 3..8),
        new_key in valid_key_strategy()
    ) {
        let mut seen = HashSet::new();
        let unique_keys: Vec<String> = keys
            .into_iter()
            .filter(|key| seen.insert(key.clone()))
            .collect();
        prop_assume!(unique_keys.len() >= 3);
        prop_assume!(!unique_keys.contains(&new_key));

        let (mut cache, _) = new_cache(unique_keys.len());
        for key in &unique_keys {
            cache.set(key.clone(), key.clone(), EntryOptions::new());
        }

        let accessed = unique_keys[0].clone();
        prop_assert!(cache.get(&accessed).is_some());
        prop_assert!(cache.is_recent(&accessed));
        prop_assert!(cache.is_least(&unique_keys[1]));

        cache.set(new_key, "new".to_string(), EntryOptions::new());
        prop_assert!(cache.has_key(&accessed));
        prop_assert!(!cache.has_key(&unique_keys[1]));
    }

    // Head and tail coincide only in a one-entry cache.
    #[test]
    fn prop_least_and_recent_exclusive(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (mut cache, clock) = new_cache(4);
        for op in ops {
            apply(&mut cache, &clock, op);
        }

        let keys = cache.keys();
        for key in &keys {
            let both = cache.is_least(key) && cache.is_recent(key);
            prop_assert_eq!(both, keys.len() == 1, "key '{}' of {}", key, keys.len());
        }
    }

    // limit(n) applies only when n is above the current entry count.
    #[test]
    fn prop_limit_never_shrinks_below_length(fill in 1usize..6, n in 0usize..10) {
        let (mut cache, _) = new_cache(5);
        for i in 0..fill {
            cache.set(format!("k{}", i), "v".to_string(), EntryOptions::new());
        }

        let len = cache.length();
        let applied = cache.limit(n);

        prop_assert_eq!(applied, n > len);
        prop_assert_eq!(cache.capacity(), if n > len { n } else { 5 });
        prop_assert_eq!(cache.length(), len);
    }
}

// Expiry properties drive the manual clock, so no sleeping is needed
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // An idle entry is readable up to T after the last touch and gone after.
    #[test]
    fn prop_idle_timeout_boundary(timeout in 1i64..10_000, over in 1u64..1_000) {
        let (mut cache, clock) = new_cache(5);
        cache.set("k", "v".to_string(), EntryOptions::new().with_idle_timeout_ms(timeout));

        clock.advance(timeout as u64);
        prop_assert_eq!(cache.get("k"), Some("v".to_string()));

        clock.advance(timeout as u64 + over);
        prop_assert_eq!(cache.get("k"), None);
        prop_assert!(!cache.has_key("k"));
    }

    // A live entry dies T after creation however often it is read.
    #[test]
    fn prop_live_timeout_ignores_reads(timeout in 2u64..5_000, reads in 1usize..10) {
        let (mut cache, clock) = new_cache(5);
        cache.set("k", "v".to_string(), EntryOptions::new().with_live_timeout_ms(timeout as i64));

        let step = timeout / (reads as u64 + 1);
        for _ in 0..reads {
            clock.advance(step);
            prop_assert_eq!(cache.get("k"), Some("v".to_string()));
        }

        clock.set(START_MS + timeout + 1);
        prop_assert_eq!(cache.length(), 0);
        prop_assert_eq!(cache.get("k"), None);
    }
}
