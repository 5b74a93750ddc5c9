//! Nearest-neighbour duplex melting temperature.
//!
//! Uses the unified DNA/DNA stack parameters of Allawi & SantaLucia (1997) with
//! terminal-pair initiation, 25 nM of each strand, 50 mM Na+ and the
//! length-scaled entropy salt correction. Values agree with the common
//! reference implementation to within floating point rounding.

use phf::{Map, phf_map};

// (ΔH in kcal/mol, ΔS in cal/(mol·K)), keyed "top/bottom" with the bottom strand 3'->5'.
static NN_STACKS: Map<&'static str, (f64, f64)> = phf_map! {
    "AA/TT" => (-7.9, -22.2),
    "AT/TA" => (-7.2, -20.4),
    "TA/AT" => (-7.2, -21.3),
    "CA/GT" => (-8.5, -22.7),
    "GT/CA" => (-8.4, -22.4),
    "CT/GA" => (-7.8, -21.0),
    "GA/CT" => (-8.2, -22.2),
    "CG/GC" => (-10.6, -27.2),
    "GC/CG" => (-9.8, -24.4),
    "GG/CC" => (-8.0, -19.9),
};

const INIT_TERMINAL_AT: (f64, f64) = (2.3, 4.1);
const INIT_TERMINAL_GC: (f64, f64) = (0.1, -2.8);

const GAS_CONSTANT: f64 = 1.987; // cal/(mol·K)
const STRAND_CONCENTRATION_NM: f64 = 25.0;
const COMPLEMENT_CONCENTRATION_NM: f64 = 25.0;
const SODIUM_MM: f64 = 50.0;
const KELVIN_OFFSET: f64 = 273.15;

/// Melting temperature in °C of `seq` paired with its exact complement.
///
/// Total over all inputs: terms for symbols outside the canonical alphabet are
/// skipped rather than rejected.
pub fn melting_temperature(seq: &[u8]) -> f64 {
    let seq: Vec<u8> = seq.iter().map(u8::to_ascii_uppercase).collect();
    let mut delta_h = 0.0;
    let mut delta_s = 0.0;

    if let (Some(&first), Some(&last)) = (seq.first(), seq.last()) {
        for end in [first, last] {
            let (h, s) = match end {
                b'A' | b'T' => INIT_TERMINAL_AT,
                b'G' | b'C' => INIT_TERMINAL_GC,
                _ => (0.0, 0.0),
            };
            delta_h += h;
            delta_s += s;
        }
    }

    for pair in seq.windows(2) {
        if let Some((h, s)) = stack_parameters(pair[0], pair[1]) {
            delta_h += h;
            delta_s += s;
        }
    }

    delta_s += salt_entropy_correction(seq.len());

    let k = (STRAND_CONCENTRATION_NM - COMPLEMENT_CONCENTRATION_NM / 2.0) * 1e-9;
    (1000.0 * delta_h) / (delta_s + GAS_CONSTANT * k.ln()) - KELVIN_OFFSET
}

fn stack_parameters(a: u8, b: u8) -> Option<(f64, f64)> {
    let key = [
        a,
        b,
        b'/',
        super::complement_base(a),
        super::complement_base(b),
    ];
    let forward = std::str::from_utf8(&key).ok()?;
    if let Some(&params) = NN_STACKS.get(forward) {
        return Some(params);
    }
    let mut reversed = key;
    reversed.reverse();
    let reversed = std::str::from_utf8(&reversed).ok()?;
    NN_STACKS.get(reversed).copied()
}

fn salt_entropy_correction(length: usize) -> f64 {
    let sodium_molar = SODIUM_MM * 1e-3;
    0.368 * (length as f64 - 1.0) * sodium_molar.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn matches_reference_value_for_textbook_sequence() {
        assert_close(melting_temperature(b"CGTTCCAAAGATGTGGGCATGAGCTTAC"), 60.3209);
    }

    #[test]
    fn matches_reference_value_for_primer_length_sequences() {
        assert_close(melting_temperature(b"ACGTACGTACGTACGTACGTAC"), 54.1436);
        assert_close(melting_temperature(b"GATTACAGATTACAGATTACAG"), 44.0062);
    }

    #[test]
    fn is_case_insensitive() {
        assert_close(
            melting_temperature(b"acgtacgtacgtacgtacgtac"),
            melting_temperature(b"ACGTACGTACGTACGTACGTAC"),
        );
    }

    #[test]
    fn every_dinucleotide_has_stack_parameters() {
        for a in *b"ACGT" {
            for b in *b"ACGT" {
                assert!(
                    stack_parameters(a, b).is_some(),
                    "missing stack {}{}",
                    a as char,
                    b as char
                );
            }
        }
    }

    #[test]
    fn gc_rich_duplexes_melt_higher_than_at_rich_ones() {
        let gc_rich = melting_temperature(b"GCGGCCGCGGCCGCGGCCGCGG");
        let at_rich = melting_temperature(b"ATTAATATTAATATTAATATTA");
        assert!(gc_rich > at_rich + 20.0);
    }

    #[test]
    fn short_and_unknown_input_does_not_panic() {
        assert!(melting_temperature(b"G").is_finite());
        assert!(melting_temperature(b"").is_finite());
        assert!(melting_temperature(b"ANNT").is_finite());
    }
}
