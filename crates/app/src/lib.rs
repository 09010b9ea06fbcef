//! `heroes-app` library crate.
//!
//! Re-exports the console building blocks for integration testing. The
//! binary entrypoint lives in `main.rs`.

pub mod command;
pub mod config;
pub mod console;
