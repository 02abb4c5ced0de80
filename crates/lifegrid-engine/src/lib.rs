//! Command-driven controller for the Lifegrid simulation.
//!
//! This crate sits between the [`lifegrid_core`] grid and the outside world:
//!
//! - [`config`]: YAML configuration with defaults for every field
//! - [`pattern`]: built-in patterns and initial seeding
//! - [`command`]: single-character command decoding
//! - [`cursor`]: wrapping edit cursor
//! - [`frame`]: text frame kept current by change notifications
//! - [`controller`]: applies commands, sticky start/pause
//! - [`runner`]: async run loop with generation and extinction limits
//!
//! The `lifegrid-engine` binary wires these to stdin and stdout.

pub mod command;
pub mod config;
pub mod controller;
pub mod cursor;
pub mod error;
pub mod frame;
pub mod pattern;
pub mod runner;
