//! # Aging Counter Tests
//!
//! Properties of `age` and `evict` over arbitrary counter vectors, plus the
//! saturated-cache corner.

use coopcache_core::Block;
use coopcache_core::cache::{AgingCache, Eviction};
use coopcache_core::common::{AGING_MAX, AGING_MIN};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A warm cache holding `b0 .. bN` with the given counters.
fn staged(counters: &[u8]) -> AgingCache {
    let blocks: Vec<Block> = (0..counters.len())
        .map(|i| Block::new(format!("b{i}")))
        .collect();
    let mut cache = AgingCache::new(counters.len());
    cache
        .warm_up(&blocks, &mut StdRng::seed_from_u64(0))
        .unwrap();
    for (slot, &value) in counters.iter().enumerate() {
        cache.set_counter(slot, value);
    }
    cache
}

fn counters() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0..=AGING_MAX, 1..16)
}

proptest! {
    #[test]
    fn age_keeps_counters_in_range(start in counters(), hit in prop::option::of(0usize..16)) {
        let mut cache = staged(&start);
        let referenced = hit.filter(|&slot| slot < start.len());
        cache.age(referenced);
        for (slot, (&before, &after)) in start.iter().zip(cache.counters()).enumerate() {
            prop_assert!(after <= AGING_MAX);
            if Some(slot) == referenced {
                prop_assert_eq!(after, (before + 1).min(AGING_MAX));
            } else {
                prop_assert_eq!(after, before.saturating_sub(1));
            }
        }
    }

    #[test]
    fn evict_replaces_first_minimum(start in counters(), seed in any::<u64>()) {
        let mut cache = staged(&start);
        let min = *start.iter().min().unwrap();
        let outcome = cache.evict(Block::new("incoming"), &mut StdRng::seed_from_u64(seed));

        if min == AGING_MAX {
            prop_assert_eq!(outcome, Eviction::Dropped);
            prop_assert_eq!(cache.counters(), &start[..]);
        } else {
            let victim = start.iter().position(|&c| c == min).unwrap();
            match outcome {
                Eviction::Replaced { slot, evicted } => {
                    prop_assert_eq!(slot, victim);
                    prop_assert_eq!(evicted.map(|b| b.data().to_owned()), Some(format!("b{victim}")));
                }
                Eviction::Dropped => prop_assert!(false, "insert dropped below saturation"),
            }
            prop_assert_eq!(cache.get_block(victim).map(Block::data), Some("incoming"));
            prop_assert!((AGING_MIN..=AGING_MAX).contains(&cache.counters()[victim]));
            for (slot, (&before, &after)) in start.iter().zip(cache.counters()).enumerate() {
                if slot != victim {
                    prop_assert_eq!(after, before);
                }
            }
        }
    }
}

#[test]
fn age_on_miss_decays_every_slot() {
    let mut cache = staged(&[0, 1, 10]);
    cache.age(None);
    assert_eq!(cache.counters(), &[0, 0, 9]);
}

#[test]
fn age_on_hit_caps_at_max() {
    let mut cache = staged(&[10, 4]);
    cache.age(Some(0));
    assert_eq!(cache.counters(), &[10, 3]);
}

#[test]
fn touch_leaves_other_slots_alone() {
    let mut cache = staged(&[3, 7]);
    cache.touch(0);
    assert_eq!(cache.counters(), &[4, 7]);
}

#[test]
fn saturated_cache_drops_insert() {
    let mut cache = staged(&[10, 10]);
    let outcome = cache.evict(Block::new("late"), &mut StdRng::seed_from_u64(3));
    assert_eq!(outcome, Eviction::Dropped);
    assert_eq!(cache.counters(), &[10, 10]);
    let held: Vec<&str> = cache.blocks().map(Block::data).collect();
    assert_eq!(held, vec!["b0", "b1"]);
}

#[test]
fn evict_fills_empty_slot_without_displacing() {
    let mut cache = AgingCache::new(2);
    cache
        .warm_up(&[Block::new("only")], &mut StdRng::seed_from_u64(9))
        .unwrap();
    cache.set_counter(0, 10);
    cache.set_counter(1, 2);
    let outcome = cache.evict(Block::new("second"), &mut StdRng::seed_from_u64(9));
    assert_eq!(
        outcome,
        Eviction::Replaced {
            slot: 1,
            evicted: None
        }
    );
}
