// file: src/geo/postal.rs
// description: deterministic proxy distance between two six digit postal codes
// reference: sector = leading two digits; a ranking heuristic, not a geodesic distance

use lazy_static::lazy_static;
use std::collections::HashMap;

const SECTOR_SPAN: u32 = 10_000;

lazy_static! {
    /// Hop counts between sectors known to be neighbours. Keys are (low, high).
    static ref SECTOR_HOPS: HashMap<(u32, u32), u32> = {
        let entries: &[((u32, u32), u32)] = &[
            // central
            ((1, 2), 1), ((1, 3), 2), ((1, 4), 3), ((1, 5), 4), ((1, 6), 5),
            ((1, 7), 6), ((1, 8), 7), ((1, 9), 8), ((1, 10), 9),
            // north
            ((75, 76), 1), ((75, 77), 2), ((75, 78), 3), ((75, 79), 4),
            ((79, 80), 1), ((80, 81), 1), ((81, 82), 1),
            // south
            ((10, 11), 1), ((11, 12), 1), ((12, 13), 1), ((13, 14), 1),
            ((14, 15), 1), ((15, 16), 1),
            // east
            ((46, 47), 1), ((47, 48), 1), ((48, 49), 1), ((49, 50), 1),
            ((50, 51), 1), ((51, 52), 1),
            // west
            ((60, 61), 1), ((61, 62), 1), ((62, 63), 1), ((63, 64), 1),
            ((64, 65), 1), ((65, 66), 1), ((66, 67), 1), ((67, 68), 1),
            ((68, 69), 1),
            // north-east
            ((53, 54), 1), ((54, 55), 1), ((55, 56), 1), ((56, 57), 1),
            ((57, 58), 1), ((58, 59), 1),
        ];
        entries.iter().copied().collect()
    };
}

pub fn sector(postal: u32) -> u32 {
    postal / SECTOR_SPAN
}

/// Hop count for an unordered sector pair, if the pair is tabulated.
pub fn sector_hops(a: u32, b: u32) -> Option<u32> {
    SECTOR_HOPS.get(&(a.min(b), a.max(b))).copied()
}

/// Proxy distance between two postal codes.
///
/// Same sector: the raw numeric difference. Across sectors: tabulated hops
/// (or the sector gap) scaled by 10000, plus the intra-sector offset
/// difference divided by 100. Symmetric in its arguments.
pub fn postal_distance(p1: u32, p2: u32) -> f64 {
    let (s1, s2) = (sector(p1), sector(p2));

    if s1 == s2 {
        return f64::from(p1.abs_diff(p2));
    }

    let hops = sector_hops(s1, s2).unwrap_or_else(|| s1.abs_diff(s2));
    let base = f64::from(hops) * f64::from(SECTOR_SPAN);
    let offset = f64::from((p1 % SECTOR_SPAN).abs_diff(p2 % SECTOR_SPAN)) / 100.0;

    base + offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_sector_is_raw_difference() {
        assert_eq!(postal_distance(640526, 640652), 126.0);
        assert_eq!(postal_distance(641652, 641651), 1.0);
        assert_eq!(postal_distance(641652, 640526), 1126.0);
    }

    #[test]
    fn test_tabulated_neighbours() {
        // sectors 64 and 65 are one hop apart
        assert_eq!(postal_distance(640100, 650300), 10_000.0 + 2.0);
        // sectors 1 and 5 are four hops apart
        assert_eq!(postal_distance(10000, 50000), 40_000.0);
    }

    #[test]
    fn test_untabulated_uses_sector_gap() {
        // 46 and 64 are not tabulated: gap of 18 sectors
        assert_eq!(postal_distance(460000, 640050), 180_000.0 + 0.5);
    }

    #[test]
    fn test_identity() {
        assert_eq!(postal_distance(520123, 520123), 0.0);
    }

    fn postal() -> impl Strategy<Value = u32> {
        10_000u32..1_000_000
    }

    proptest! {
        #[test]
        fn prop_symmetric(a in postal(), b in postal()) {
            prop_assert_eq!(postal_distance(a, b), postal_distance(b, a));
        }

        #[test]
        fn prop_non_negative(a in postal(), b in postal()) {
            prop_assert!(postal_distance(a, b) >= 0.0);
        }

        #[test]
        fn prop_same_sector_identity(s in 1u32..100, x in 0u32..10_000, y in 0u32..10_000) {
            let (a, b) = (s * 10_000 + x, s * 10_000 + y);
            prop_assert_eq!(postal_distance(a, b), f64::from(a.abs_diff(b)));
        }

        #[test]
        fn prop_fallback_monotone_in_gap(
            origin in 20u32..40,
            near_gap in 1u32..30,
            extra in 1u32..30,
            x in 0u32..10_000,
            y in 0u32..10_000,
            z in 0u32..10_000,
        ) {
            let near = origin + near_gap;
            let far = near + extra;
            prop_assume!(sector_hops(origin, near).is_none());
            prop_assume!(sector_hops(origin, far).is_none());

            let p = origin * 10_000 + x;
            let q_near = near * 10_000 + y;
            let q_far = far * 10_000 + z;
            prop_assert!(postal_distance(p, q_near) < postal_distance(p, q_far));
        }
    }
}
