//! Tidemark CLI library.
//!
//! The binary lives in `main.rs`; everything else is here so integration
//! tests and embedders can reach the command implementations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
