//! `gop-warm-core` library crate.
//!
//! The binary (`gop`) is a thin wrapper around this library so that:
//!
//! - the density/slope model is testable without spawning processes
//! - the pure core (`domain`, `math`, `models`, `profile`, `report`) stays free of I/O
//! - front-ends (CLI, exports, plots) share one pipeline (`app::pipeline`)

pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod profile;
pub mod report;
