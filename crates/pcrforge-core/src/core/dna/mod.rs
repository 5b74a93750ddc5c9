//! Nucleotide alphabet and the elementary strand transforms every rule builds on.
//!
//! Sequences are plain byte slices over the canonical upper-case alphabet
//! `A`, `C`, `G`, `T`. User-supplied text is normalised once by
//! [`parse_sequence`]; everything downstream assumes canonical input.

pub mod thermo;

use rand::Rng;
use thiserror::Error;

pub use thermo::melting_temperature;

/// The four canonical bases, in the order used for random sampling.
pub const BASES: [u8; 4] = *b"ATGC";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid base '{base}' at position {position}; expected one of A, C, G, T")]
    InvalidBase { base: char, position: usize },
}

/// Parses sequence text case-insensitively into canonical upper-case bases.
pub fn parse_sequence(text: &str) -> Result<Vec<u8>, SequenceError> {
    text.chars()
        .enumerate()
        .map(|(position, c)| match c.to_ascii_uppercase() {
            upper @ ('A' | 'C' | 'G' | 'T') => Ok(upper as u8),
            _ => Err(SequenceError::InvalidBase { base: c, position }),
        })
        .collect()
}

#[inline]
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'a' => b't',
        b't' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        other => other,
    }
}

pub fn complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| complement_base(b)).collect()
}

pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement_base(b)).collect()
}

/// Fraction of G/C symbols in `seq`, in `[0, 1]`. Empty input yields 0.
pub fn gc_fraction(seq: &[u8]) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }
    let gc = seq
        .iter()
        .filter(|b| matches!(b.to_ascii_uppercase(), b'G' | b'C'))
        .count();
    gc as f64 / seq.len() as f64
}

#[inline]
pub fn gc_percent(seq: &[u8]) -> f64 {
    gc_fraction(seq) * 100.0
}

pub fn random_sequence(length: usize, rng: &mut impl Rng) -> Vec<u8> {
    (0..length)
        .map(|_| BASES[rng.gen_range(0..BASES.len())])
        .collect()
}

/// True if `needle` occurs anywhere in `haystack`. The empty needle always occurs.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Number of possibly overlapping occurrences of a non-empty `needle`.
pub fn count_overlapping(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack
        .windows(needle.len())
        .filter(|&window| window == needle)
        .count()
}

pub fn to_string(seq: &[u8]) -> String {
    seq.iter().map(|&b| b as char).collect()
}
