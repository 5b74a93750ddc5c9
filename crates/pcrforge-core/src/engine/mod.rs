//! # Engine Module
//!
//! The optimizer that turns random templates into ones satisfying the design
//! rules.
//!
//! - **Configuration** ([`config`]) - layout, constraints and search parameters
//!   with a validating builder
//! - **Search** ([`search`]) - stochastic local search, greedy or annealed
//! - **Outcome** ([`state`]) - best candidate and stop reason of one search
//! - **Progress** ([`progress`]) - callback channel for UI integrations

pub mod config;
pub mod progress;
pub mod search;
pub mod state;
