//! # Workflows Module
//!
//! Entry points built on the engine: batch generation of templates and
//! statistics over random sequences.

pub mod batch;
pub mod statistics;
