//! Hierarchy Property Tests.
//!
//! Random reference streams over random small geometries, checking the
//! invariants that must hold after every reference: counter monotonicity,
//! `misses <= references`, latency bounds, and the inclusion property.

use crate::common::builder::HierarchyBuilder;
use cachesim_core::{AccessType, CacheHierarchy, CacheStats, HierarchyStats};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Reference {
    Hierarchy(AccessType, u64),
    L2(u64),
}

fn access_type() -> impl Strategy<Value = AccessType> {
    prop_oneof![
        Just(AccessType::Fetch),
        Just(AccessType::Read),
        Just(AccessType::Write),
    ]
}

/// Addresses confined to 64 lines so conflicts are frequent.
fn reference() -> impl Strategy<Value = Reference> {
    let addr = 0u64..(64 * 64);
    prop_oneof![
        6 => (access_type(), addr.clone()).prop_map(|(kind, a)| Reference::Hierarchy(kind, a)),
        1 => addr.prop_map(Reference::L2),
    ]
}

/// (sets, ways, hit time) with sets in {0, 1, 2, 4, 8}.
fn geometry() -> impl Strategy<Value = (u64, usize, u64)> {
    (prop_oneof![Just(0u64), Just(1), Just(2), Just(4), Just(8)], 0usize..4, 0u64..12)
}

fn hierarchy(
    i: (u64, usize, u64),
    d: (u64, usize, u64),
    l2: (u64, usize, u64),
    memory: u64,
    inclusive: bool,
) -> CacheHierarchy {
    HierarchyBuilder::new()
        .icache(i.0, i.1, i.2)
        .dcache(d.0, d.1, d.2)
        .l2(l2.0, l2.1, l2.2)
        .memory(memory)
        .inclusive(inclusive)
        .build()
}

fn issue(h: &mut CacheHierarchy, reference: Reference) -> u64 {
    match reference {
        Reference::Hierarchy(kind, addr) => h.access(kind, addr),
        Reference::L2(addr) => h.l2_access(addr),
    }
}

fn non_decreasing(before: &CacheStats, after: &CacheStats) -> bool {
    after.references >= before.references
        && after.misses >= before.misses
        && after.penalty_cycles >= before.penalty_cycles
}

fn levels(stats: &HierarchyStats) -> [CacheStats; 3] {
    [stats.icache, stats.dcache, stats.l2]
}

proptest! {
    #[test]
    fn counters_are_monotonic_and_consistent(
        i in geometry(),
        d in geometry(),
        l2 in geometry(),
        memory in 0u64..200,
        inclusive in any::<bool>(),
        refs in proptest::collection::vec(reference(), 1..150),
    ) {
        let mut h = hierarchy(i, d, l2, memory, inclusive);
        let mut before = h.stats();
        for reference in refs {
            let _ = issue(&mut h, reference);
            let after = h.stats();
            for (old, new) in levels(&before).iter().zip(levels(&after).iter()) {
                prop_assert!(non_decreasing(old, new));
                prop_assert!(new.misses <= new.references);
            }
            prop_assert_eq!(after.references, before.references + 1);
            before = after;
        }
    }

    /// Every reference costs at least memory latency or the first enabled
    /// level's hit time, and at most the sum along the whole path.
    #[test]
    fn latency_is_bounded_by_path(
        d in geometry(),
        l2 in geometry(),
        memory in 0u64..200,
        addrs in proptest::collection::vec(0u64..(64 * 64), 1..100),
    ) {
        let mut h = hierarchy((0, 0, 0), d, l2, memory, false);
        let d_time = if d.0 == 0 { 0 } else { d.2 };
        let l2_time = if l2.0 == 0 { 0 } else { l2.2 };
        let floor = if d.0 != 0 { d.2 } else if l2.0 != 0 { l2.2 } else { memory };
        for addr in addrs {
            let cycles = h.data_access(addr);
            prop_assert!(cycles >= floor);
            prop_assert!(cycles <= d_time + l2_time + memory);
        }
    }

    /// The sum of latencies returned equals the recorded total.
    #[test]
    fn total_cycles_match_returned_latencies(
        l2 in geometry(),
        refs in proptest::collection::vec(reference(), 0..100),
    ) {
        let mut h = hierarchy((2, 1, 1), (2, 2, 1), l2, 100, true);
        let mut sum = 0;
        for reference in &refs {
            sum += issue(&mut h, *reference);
        }
        prop_assert_eq!(h.stats().total_cycles, sum);
        prop_assert_eq!(h.stats().references, refs.len() as u64);
    }

    /// With inclusion on and an enabled L2, every L1 line is also in L2.
    #[test]
    fn inclusive_l1_is_subset_of_l2(
        i in (1u64..3, 1usize..4),
        d in (1u64..3, 1usize..4),
        l2_ways in 0usize..4,
        refs in proptest::collection::vec(reference(), 1..200),
    ) {
        let mut h = hierarchy(
            (1 << i.0, i.1, 1),
            (1 << d.0, d.1, 1),
            (2, l2_ways, 10),
            100,
            true,
        );
        for reference in refs {
            let _ = issue(&mut h, reference);
            for line in (0..64u64).map(|n| n * 64) {
                if h.icache().contains(line) || h.dcache().contains(line) {
                    prop_assert!(h.l2().contains(line), "L1 holds {:#x} but L2 does not", line);
                }
            }
        }
    }

    /// Re-referencing the line just accessed always hits the first enabled L1.
    #[test]
    fn immediate_rereference_hits(
        d_sets in prop_oneof![Just(1u64), Just(2), Just(4)],
        d_ways in 1usize..4,
        addrs in proptest::collection::vec(0u64..(1 << 20), 1..60),
    ) {
        let mut h = hierarchy((0, 0, 0), (d_sets, d_ways, 3), (4, 2, 10), 100, true);
        for addr in addrs {
            let _ = h.data_access(addr);
            prop_assert_eq!(h.data_access(addr), 3);
        }
    }
}
