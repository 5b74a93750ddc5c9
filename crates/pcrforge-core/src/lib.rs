//! # pcrforge
//!
//! Design of synthetic DNA templates for quantitative PCR: a template carrying
//! a forward primer site, a hydrolysis probe site and a reverse primer site,
//! scored against GC, melting temperature, homopolymer, uniqueness and
//! self-complementarity rules and optimised by stochastic local search.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Nucleotide utilities, nearest-neighbour
//!   thermodynamics, penalty rules and the [`Candidate`] model.
//!
//! - **[`engine`]: The Optimizer.** Search configuration, the local search loop
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Batch generation and random-sequence
//!   statistics.
//!
//! ```no_run
//! use pcrforge::engine::config::ExperimentConfigBuilder;
//! use pcrforge::engine::progress::ProgressReporter;
//! use pcrforge::engine::search::run_experiment;
//!
//! let config = ExperimentConfigBuilder::new().max_iterations(5_000).build()?;
//! if let Some(template) = run_experiment(&config, &ProgressReporter::new()) {
//!     println!("{}", template.display());
//! }
//! # Ok::<(), pcrforge::engine::config::ConfigError>(())
//! ```

pub mod core;
pub mod engine;
pub mod workflows;

pub use crate::core::models::candidate::Candidate;
