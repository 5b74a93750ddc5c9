//! # Core Module
//!
//! Stateless building blocks for template design: the nucleotide alphabet and
//! strand transforms, duplex thermodynamics, the penalty rules and the
//! candidate model that aggregates them.
//!
//! - **Sequences** ([`dna`]) - alphabet, complements, GC fraction, melting temperature
//! - **Rules** ([`rules`]) - the five independent penalty evaluators
//! - **Models** ([`models`]) - template layout, design constraints and the scored candidate
//!
//! Nothing here holds state between calls except a [`models::candidate::Candidate`],
//! which remembers the rule list of its last scoring pass for diagnostics.

pub mod dna;
pub mod models;
pub mod rules;
