//! # Rules Module
//!
//! Penalty rules scored against a single region of a candidate template.
//!
//! A rule is a tiny value object: it is evaluated the moment it is built and is
//! read-only afterwards. Every kind of rule is total over its inputs; an empty
//! region or pattern never violates anything.
//!
//! The five kinds form a closed set, modelled by [`Constraint`] (the bounds) and
//! [`RuleKind`] (the identity carried by the result):
//!
//! - **GC content** - GC percentage inside a window, penalised by distance from the midpoint.
//! - **Long runs** - homopolymer runs longer than a threshold.
//! - **Melting range** - nearest-neighbour Tm inside a window.
//! - **Single match only** - a motif may occur at most once in a haystack.
//! - **Secondary limit** - self-complementary windows as a hairpin/self-dimer proxy.

mod evaluators;

pub use evaluators::{
    gc_content_cost, long_runs_cost, melting_range_cost, secondary_limit_cost,
    single_match_only_cost,
};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    GcContent,
    LongRuns,
    MeltingRange,
    SingleMatchOnly,
    SecondaryLimit,
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::GcContent => "GCContent",
            RuleKind::LongRuns => "LongRuns",
            RuleKind::MeltingRange => "MeltingRange",
            RuleKind::SingleMatchOnly => "SingleMatchOnly",
            RuleKind::SecondaryLimit => "SecondaryLimit",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounds for one rule evaluation. `evaluate` scores a region against them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint<'a> {
    GcContent { min_pct: f64, max_pct: f64 },
    LongRuns { max_len: usize },
    MeltingRange { min_temp: f64, max_temp: f64 },
    /// The evaluated region is the motif; it may occur at most once in `haystack`.
    SingleMatchOnly { haystack: &'a [u8] },
    SecondaryLimit { max_len: usize },
}

impl Constraint<'_> {
    pub fn kind(&self) -> RuleKind {
        match self {
            Constraint::GcContent { .. } => RuleKind::GcContent,
            Constraint::LongRuns { .. } => RuleKind::LongRuns,
            Constraint::MeltingRange { .. } => RuleKind::MeltingRange,
            Constraint::SingleMatchOnly { .. } => RuleKind::SingleMatchOnly,
            Constraint::SecondaryLimit { .. } => RuleKind::SecondaryLimit,
        }
    }

    pub fn evaluate(&self, region: &[u8], note: &str) -> Rule {
        let (cost, detail) = match *self {
            Constraint::GcContent { min_pct, max_pct } => {
                gc_content_cost(region, min_pct, max_pct)
            }
            Constraint::LongRuns { max_len } => long_runs_cost(region, max_len),
            Constraint::MeltingRange { min_temp, max_temp } => {
                melting_range_cost(region, min_temp, max_temp)
            }
            Constraint::SingleMatchOnly { haystack } => single_match_only_cost(haystack, region),
            Constraint::SecondaryLimit { max_len } => secondary_limit_cost(region, max_len),
        };

        let mut note = note.to_string();
        if let Some(detail) = detail {
            note.push(' ');
            note.push_str(&detail);
        }

        Rule {
            kind: self.kind(),
            cost,
            note,
        }
    }
}

/// The outcome of one rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    kind: RuleKind,
    cost: f64,
    note: String,
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    #[inline]
    pub fn is_violated(&self) -> bool {
        self.cost > 0.0
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {} {}", self.cost, self.name(), self.note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_appends_violation_detail_to_note() {
        let rule = Constraint::GcContent {
            min_pct: 49.0,
            max_pct: 51.0,
        }
        .evaluate(b"AAAA", "Overall");
        assert_eq!(rule.kind(), RuleKind::GcContent);
        assert_eq!(rule.cost(), 50.0);
        assert_eq!(rule.note(), "Overall GC_Content: 0.0%");
        assert!(rule.is_violated());
    }

    #[test]
    fn evaluate_keeps_plain_note_when_satisfied() {
        let rule = Constraint::LongRuns { max_len: 3 }.evaluate(b"AAAC", "No long runs");
        assert_eq!(rule.cost(), 0.0);
        assert_eq!(rule.note(), "No long runs");
        assert!(!rule.is_violated());
    }

    #[test]
    fn display_renders_cost_name_and_note() {
        let rule = Constraint::SingleMatchOnly {
            haystack: b"ACGTACGT",
        }
        .evaluate(b"ACGT", "Unique 3' ends");
        assert_eq!(
            rule.to_string(),
            "2.0 SingleMatchOnly Unique 3' ends Pattern 'ACGT' found 2 times"
        );
    }

    #[test]
    fn constraint_kind_matches_rule_kind() {
        let haystack = b"ACGT";
        let constraints = [
            Constraint::GcContent {
                min_pct: 0.0,
                max_pct: 100.0,
            },
            Constraint::LongRuns { max_len: 3 },
            Constraint::MeltingRange {
                min_temp: 0.0,
                max_temp: 100.0,
            },
            Constraint::SingleMatchOnly { haystack },
            Constraint::SecondaryLimit { max_len: 4 },
        ];
        for constraint in constraints {
            assert_eq!(constraint.evaluate(b"", "").kind(), constraint.kind());
        }
    }

    #[test]
    fn every_rule_kind_is_free_on_empty_region() {
        let haystack = b"ACGTACGT";
        let constraints = [
            Constraint::GcContent {
                min_pct: 99.0,
                max_pct: 101.0,
            },
            Constraint::LongRuns { max_len: 0 },
            Constraint::MeltingRange {
                min_temp: 50.0,
                max_temp: 60.0,
            },
            Constraint::SingleMatchOnly { haystack },
            Constraint::SecondaryLimit { max_len: 0 },
        ];
        for constraint in constraints {
            assert_eq!(constraint.evaluate(b"", "").cost(), 0.0, "{constraint:?}");
        }
    }
}
