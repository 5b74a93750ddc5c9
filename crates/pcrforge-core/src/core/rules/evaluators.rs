use crate::core::dna::{self, BASES};

/// `(cost, detail)`; `detail` is appended to the rule note on violation.
type Evaluation = (f64, Option<String>);

const REPEATED_MOTIF_PENALTY: f64 = 2.0;

fn midpoint(low: f64, high: f64) -> f64 {
    (low + high) / 2.0
}

/// GC percentage outside `[min_pct, max_pct]` costs its distance from the window midpoint.
///
/// Degenerate windows encode single-base requirements: `[99, 101]` on one base
/// demands G/C (cost 100 otherwise), `[-1, 1]` forbids it (cost 100 if present).
pub fn gc_content_cost(seq: &[u8], min_pct: f64, max_pct: f64) -> Evaluation {
    if seq.is_empty() {
        return (0.0, None);
    }
    let gc = dna::gc_percent(seq);
    if gc < min_pct || gc > max_pct {
        let cost = (gc - midpoint(min_pct, max_pct)).abs();
        (cost, Some(format!("GC_Content: {:.1}%", gc)))
    } else {
        (0.0, None)
    }
}

/// Each base with a run of `max_len + 1` anywhere in `seq` adds `max_len`.
pub fn long_runs_cost(seq: &[u8], max_len: usize) -> Evaluation {
    if seq.is_empty() {
        return (0.0, None);
    }
    let mut cost = 0.0;
    let mut found = Vec::new();
    for base in BASES {
        let run = vec![base; max_len + 1];
        if dna::contains(seq, &run) {
            cost += max_len as f64;
            found.push(format!("Found run of {}", dna::to_string(&run)));
        }
    }
    let detail = (!found.is_empty()).then(|| found.join(" "));
    (cost, detail)
}

pub fn melting_range_cost(seq: &[u8], min_temp: f64, max_temp: f64) -> Evaluation {
    if seq.is_empty() {
        return (0.0, None);
    }
    let tm = dna::melting_temperature(seq);
    if tm < min_temp || tm > max_temp {
        let cost = (tm - midpoint(min_temp, max_temp)).abs();
        (cost, Some(format!("Tm: {:.1}°C", tm)))
    } else {
        (0.0, None)
    }
}

/// Flat penalty when `pattern` occurs more than once (overlaps included).
pub fn single_match_only_cost(haystack: &[u8], pattern: &[u8]) -> Evaluation {
    if haystack.is_empty() || pattern.is_empty() {
        return (0.0, None);
    }
    let count = dna::count_overlapping(haystack, pattern);
    if count > 1 {
        (
            REPEATED_MOTIF_PENALTY,
            Some(format!(
                "Pattern '{}' found {} times",
                dna::to_string(pattern),
                count
            )),
        )
    } else {
        (0.0, None)
    }
}

/// One point per window whose complement, and one per window whose reverse
/// complement, occurs anywhere in `seq`.
///
/// Windows start at `0..len - max_len`; the final window is not scanned.
pub fn secondary_limit_cost(seq: &[u8], max_len: usize) -> Evaluation {
    if seq.is_empty() {
        return (0.0, None);
    }
    let mut cost = 0.0;
    for start in 0..seq.len().saturating_sub(max_len) {
        let window = &seq[start..start + max_len];
        if dna::contains(seq, &dna::complement(window)) {
            cost += 1.0;
        }
        if dna::contains(seq, &dna::reverse_complement(window)) {
            cost += 1.0;
        }
    }
    let detail = (cost > 0.0).then(|| "Secondary structures detected".to_string());
    (cost, detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn gc_content_inside_window_is_free_including_bounds() {
        assert_eq!(gc_content_cost(b"ATGC", 50.0, 60.0).0, 0.0);
        assert_eq!(gc_content_cost(b"ATGC", 40.0, 50.0).0, 0.0);
        assert_eq!(gc_content_cost(b"ATGC", 0.0, 100.0).0, 0.0);
    }

    #[test]
    fn gc_content_outside_window_costs_distance_from_midpoint() {
        let (cost, detail) = gc_content_cost(b"GGGC", 49.0, 51.0);
        assert_eq!(cost, 50.0);
        assert_eq!(detail.as_deref(), Some("GC_Content: 100.0%"));

        let (cost, _) = gc_content_cost(b"ATAT", 55.0, 79.0);
        assert_eq!(cost, 67.0);
    }

    #[test]
    fn gc_content_degenerate_windows_encode_single_base_requirements() {
        assert_eq!(gc_content_cost(b"G", 99.0, 101.0).0, 0.0);
        assert_eq!(gc_content_cost(b"A", 99.0, 101.0).0, 100.0);
        assert_eq!(gc_content_cost(b"T", -1.0, 1.0).0, 0.0);
        assert_eq!(gc_content_cost(b"C", -1.0, 1.0).0, 100.0);
        assert_eq!(gc_content_cost(b"AC", -1.0, 1.0).0, 50.0);
    }

    #[test]
    fn gc_content_cost_is_zero_iff_within_window_on_random_input() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let seq = dna::random_sequence(20, &mut rng);
            let gc = dna::gc_percent(&seq);
            let (cost, _) = gc_content_cost(&seq, 45.0, 55.0);
            if (45.0..=55.0).contains(&gc) {
                assert_eq!(cost, 0.0);
            } else {
                assert!((cost - (gc - 50.0).abs()).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn long_runs_penalises_each_offending_base_once() {
        assert_eq!(long_runs_cost(b"ACGTACGT", 3).0, 0.0);
        assert_eq!(long_runs_cost(b"AAAACGT", 3).0, 3.0);
        assert_eq!(long_runs_cost(b"AAAACAAAAAAT", 3).0, 3.0);
        let (cost, detail) = long_runs_cost(b"AAAAGGGGTC", 3);
        assert_eq!(cost, 6.0);
        assert_eq!(
            detail.as_deref(),
            Some("Found run of AAAA Found run of GGGG")
        );
    }

    #[test]
    fn long_runs_cost_is_a_multiple_of_threshold() {
        let mut rng = StdRng::seed_from_u64(11);
        for max_len in 1..5 {
            for _ in 0..50 {
                let seq = dna::random_sequence(40, &mut rng);
                let (cost, _) = long_runs_cost(&seq, max_len);
                let multiple = cost / max_len as f64;
                assert_eq!(multiple.fract(), 0.0);
                assert!((0.0..=4.0).contains(&multiple));
                let has_run = BASES
                    .iter()
                    .any(|&b| dna::contains(&seq, &vec![b; max_len + 1]));
                assert_eq!(cost == 0.0, !has_run);
            }
        }
    }

    #[test]
    fn melting_range_costs_distance_from_midpoint_when_outside() {
        let seq = b"ACGTACGTACGTACGTACGTAC";
        let tm = dna::melting_temperature(seq);
        assert_eq!(melting_range_cost(seq, tm - 0.5, tm + 0.5).0, 0.0);

        let (cost, detail) = melting_range_cost(seq, tm + 1.0, tm + 3.0);
        assert!((cost - 2.0).abs() < 1e-9);
        assert!(detail.unwrap().starts_with("Tm: "));
    }

    #[test]
    fn single_match_only_is_binary() {
        assert_eq!(single_match_only_cost(b"ACGTTT", b"ACGT").0, 0.0);
        assert_eq!(single_match_only_cost(b"ACGTACGT", b"ACGT").0, 2.0);
        assert_eq!(single_match_only_cost(b"AAAAAAAA", b"AA").0, 2.0);
        assert_eq!(single_match_only_cost(b"TTTT", b"ACGT").0, 0.0);
    }

    #[test]
    fn single_match_only_counts_overlapping_occurrences() {
        let (cost, detail) = single_match_only_cost(b"AAAC", b"AA");
        assert_eq!(cost, 2.0);
        assert_eq!(detail.as_deref(), Some("Pattern 'AA' found 2 times"));
    }

    #[test]
    fn single_match_only_cost_takes_only_two_values() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let haystack = dna::random_sequence(30, &mut rng);
            let pattern = dna::random_sequence(3, &mut rng);
            let (cost, _) = single_match_only_cost(&haystack, &pattern);
            assert!(cost == 0.0 || cost == 2.0);
        }
    }

    #[test]
    fn secondary_limit_counts_complement_and_reverse_complement_hits() {
        // Windows of 2 over "AATT": "AA" and "AT" (the final "TT" is not scanned).
        // "AA": complement "TT" present, reverse complement "TT" present.
        // "AT": complement "TA" absent, reverse complement "AT" present.
        let (cost, detail) = secondary_limit_cost(b"AATT", 2);
        assert_eq!(cost, 3.0);
        assert_eq!(detail.as_deref(), Some("Secondary structures detected"));
    }

    #[test]
    fn secondary_limit_is_free_without_self_complementarity() {
        assert_eq!(secondary_limit_cost(b"AAAAAAAA", 4).0, 0.0);
        assert!(secondary_limit_cost(b"AAAAAAAA", 4).1.is_none());
    }

    #[test]
    fn secondary_limit_with_window_longer_than_sequence_scans_nothing() {
        assert_eq!(secondary_limit_cost(b"ACGT", 4).0, 0.0);
        assert_eq!(secondary_limit_cost(b"ACGT", 10).0, 0.0);
    }
}
