use super::constraints::DesignConstraints;
use super::layout::{TemplateLayout, tail, window};
use crate::core::dna::{self, SequenceError};
use crate::core::rules::{Constraint, Rule};
use rand::Rng;
use rand::seq::index;
use std::fmt;

/// Trailing primer windows that must be GC-rich.
const GC_CLAMP_WINDOWS: [usize; 2] = [5, 11];
/// Degenerate GC windows applied to single bases (or the two-base forcing window).
const REQUIRE_GC: (f64, f64) = (99.0, 101.0);
const FORBID_GC: (f64, f64) = (-1.0, 1.0);
/// Bases right after each primer that must not be G/C.
const PRIMER_FORCING_LENGTH: usize = 2;

/// A fixed-length template under optimisation.
///
/// Owns its symbols and the rule list from its most recent [`Candidate::cost`] call.
/// Layout and constraints are fixed at construction.
#[derive(Debug, Clone)]
pub struct Candidate {
    layout: TemplateLayout,
    constraints: DesignConstraints,
    symbols: Vec<u8>,
    rules: Vec<Rule>,
}

impl Candidate {
    /// A uniformly random template of `layout.seq_length` bases.
    pub fn random(
        layout: TemplateLayout,
        constraints: DesignConstraints,
        rng: &mut impl Rng,
    ) -> Self {
        let symbols = dna::random_sequence(layout.seq_length, rng);
        Self::with_symbols(layout, constraints, symbols)
    }

    /// A template holding the given sequence text, parsed case-insensitively.
    ///
    /// The text length becomes the candidate length even if it differs from
    /// `layout.seq_length`.
    pub fn from_sequence(
        layout: TemplateLayout,
        constraints: DesignConstraints,
        text: &str,
    ) -> Result<Self, SequenceError> {
        let symbols = dna::parse_sequence(text)?;
        Ok(Self::with_symbols(layout, constraints, symbols))
    }

    fn with_symbols(
        layout: TemplateLayout,
        constraints: DesignConstraints,
        symbols: Vec<u8>,
    ) -> Self {
        Self {
            layout,
            constraints,
            symbols,
            rules: Vec::new(),
        }
    }

    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    pub fn constraints(&self) -> &DesignConstraints {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn sequence(&self) -> String {
        dna::to_string(&self.symbols)
    }

    /// Overwrites this candidate's symbols with `other`'s, reusing the allocation.
    pub fn copy_symbols_from(&mut self, other: &Candidate) {
        self.symbols.clone_from(&other.symbols);
    }

    /// Forward strand, 5'->3'.
    pub fn forward(&self) -> &[u8] {
        &self.symbols
    }

    /// Reverse strand, 5'->3'.
    pub fn reverse(&self) -> Vec<u8> {
        dna::reverse_complement(&self.symbols)
    }

    pub fn forward_primer(&self) -> &[u8] {
        window(&self.symbols, 0, Some(self.layout.primer_length as isize))
    }

    /// Reverse primer, 5'->3': the reverse complement of the template's tail.
    pub fn reverse_primer(&self) -> Vec<u8> {
        dna::reverse_complement(tail(&self.symbols, self.layout.primer_length))
    }

    pub fn probe(&self) -> &[u8] {
        let (start, end) = self.layout.probe_offsets();
        window(&self.symbols, start, Some(end))
    }

    /// 3' ends of the forward template, reverse template, forward primer and
    /// reverse primer, in that order.
    pub fn three_prime_ends(&self, end_length: usize) -> [Vec<u8>; 4] {
        let reverse = self.reverse();
        let reverse_primer = self.reverse_primer();
        [
            tail(&self.symbols, end_length).to_vec(),
            tail(&reverse, end_length).to_vec(),
            tail(self.forward_primer(), end_length).to_vec(),
            tail(&reverse_primer, end_length).to_vec(),
        ]
    }

    /// Replaces `min(count, len)` distinct positions with uniformly random bases.
    ///
    /// A replacement may draw the base already present, so fewer positions may
    /// actually change.
    pub fn mutate(&mut self, count: usize, rng: &mut impl Rng) {
        let len = self.symbols.len();
        for position in index::sample(rng, len, count.min(len)) {
            self.symbols[position] = dna::BASES[rng.gen_range(0..dna::BASES.len())];
        }
    }

    /// Scores every region, keeps the rule list for [`Candidate::rule_info`] and
    /// returns the summed cost.
    pub fn cost(&mut self) -> f64 {
        self.rules = self.evaluate_rules();
        self.rules.iter().map(Rule::cost).sum()
    }

    /// Rules from the most recent [`Candidate::cost`] call.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// One `"<cost> <name> <note>"` line per rule; violations only unless `verbose`.
    pub fn rule_info(&self, verbose: bool) -> String {
        self.rules
            .iter()
            .filter(|rule| verbose || rule.is_violated())
            .map(|rule| format!("{rule}\n"))
            .collect()
    }

    /// Four aligned lines: forward primer and probe, forward strand, complement
    /// strand, and the reverse primer written 3'->5' under its binding site.
    pub fn display(&self) -> String {
        let spacer = " ".repeat(self.layout.spacer_length());
        let mut reverse_primer = self.reverse_primer();
        reverse_primer.reverse();
        let indent = " ".repeat(
            self.layout
                .seq_length
                .saturating_sub(self.layout.primer_length),
        );

        [
            format!(
                "{}{}{}",
                dna::to_string(self.forward_primer()),
                spacer,
                dna::to_string(self.probe())
            ),
            dna::to_string(&self.symbols),
            dna::to_string(&dna::complement(&self.symbols)),
            format!("{}{}", indent, dna::to_string(&reverse_primer)),
        ]
        .join("\n")
    }

    fn evaluate_rules(&self) -> Vec<Rule> {
        let c = &self.constraints;
        let layout = &self.layout;
        let forward = self.forward();
        let reverse = self.reverse();
        let mut rules = Vec::with_capacity(25);

        rules.push(
            Constraint::LongRuns {
                max_len: c.max_run_length,
            }
            .evaluate(
                forward,
                &format!("No runs longer than {}", c.max_run_length),
            ),
        );
        rules.push(gc_window(c.overall_gc_min, c.overall_gc_max).evaluate(forward, "Overall"));

        let primer_tm = Constraint::MeltingRange {
            min_temp: layout.target_primer_tm - c.primer_tm_tolerance,
            max_temp: layout.target_primer_tm + c.primer_tm_tolerance,
        };
        let reverse_primer = self.reverse_primer();
        for primer in [self.forward_primer(), reverse_primer.as_slice()] {
            rules.push(gc_window(c.primer_gc_min, c.primer_gc_max).evaluate(primer, "Primer"));
            rules.push(primer_tm.evaluate(primer, "Primer"));
            for clamp in GC_CLAMP_WINDOWS {
                rules.push(
                    gc_window(c.gc_clamp_min, c.gc_clamp_max)
                        .evaluate(tail(primer, clamp), "GC Clamp"),
                );
            }
            rules.push(
                gc_window(REQUIRE_GC.0, REQUIRE_GC.1).evaluate(tail(primer, 1), "3' primer end"),
            );
        }

        let both_strands = [forward, reverse.as_slice()].concat();
        let unique = Constraint::SingleMatchOnly {
            haystack: &both_strands,
        };
        for end in self.three_prime_ends(c.unique_end_length) {
            rules.push(unique.evaluate(&end, "Unique 3' ends"));
        }

        let no_gc = gc_window(FORBID_GC.0, FORBID_GC.1);
        for strand in [forward, reverse.as_slice()] {
            rules.push(no_gc.evaluate(tail(strand, 1), "3' template ends"));
            let forcing_start = layout.primer_length as isize;
            let forcing = window(
                strand,
                forcing_start,
                Some(forcing_start + PRIMER_FORCING_LENGTH as isize),
            );
            rules.push(no_gc.evaluate(forcing, "Primer Forcing"));
        }

        let probe = self.probe();
        rules.push(
            Constraint::MeltingRange {
                min_temp: layout.target_primer_tm + c.probe_tm_delta_min,
                max_temp: layout.target_primer_tm + c.probe_tm_delta_max,
            }
            .evaluate(probe, "Probe Tm"),
        );
        rules.push(gc_window(c.probe_gc_min, c.probe_gc_max).evaluate(probe, "Probe GC"));
        rules.push(unique.evaluate(tail(probe, c.unique_end_length), "Unique probe end"));
        rules.push(no_gc.evaluate(window(probe, 0, Some(1)), "Probe 5' end"));

        rules.push(
            Constraint::SecondaryLimit {
                max_len: c.max_secondary_length,
            }
            .evaluate(forward, "Secondary structures"),
        );

        rules
    }
}

fn gc_window(min_pct: f64, max_pct: f64) -> Constraint<'static> {
    Constraint::GcContent { min_pct, max_pct }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
