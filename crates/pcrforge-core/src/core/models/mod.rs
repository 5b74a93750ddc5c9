//! Candidate template model and the configuration it is scored under.
//!
//! - [`layout`] - fixed region geometry (primers, probe, gap) of a template
//! - [`constraints`] - numeric design bounds consumed by the rules
//! - [`candidate`] - the mutable symbol string plus its rule-based cost

pub mod candidate;
pub mod constraints;
pub mod layout;
