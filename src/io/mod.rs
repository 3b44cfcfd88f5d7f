//! Input/output helpers.
//!
//! - per-radius profile exports (CSV) (`export`)
//! - diagnostics record and parameter-set JSON read/write (`record`)
//! - SVG rendering of the profile panels (`svg`)

pub mod export;
pub mod record;
pub mod svg;

pub use export::*;
pub use record::*;
pub use svg::*;
