//! Command implementations for dictcol-cmd

pub mod bench;
pub mod encode;
pub mod query;
