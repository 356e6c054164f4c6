//! Test utilities and helpers for the dictcol project.
//!
//! This crate provides:
//! - Seeded synthetic column generators with controllable cardinality and
//!   shared prefixes
//! - Random identifier arrays for kernel equivalence tests
//! - Temporary column files for the command-line tool tests
//!
//! # Usage
//!
//! This crate is primarily intended for use within the dictcol test suites
//! and development tools.

pub mod data_gen;
pub mod files;
