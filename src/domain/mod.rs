//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the registered model constants (`ParameterSet`) and the energy-mapping `Mode`
//! - the validated `RadiusGrid` and baryonic density laws (`BaryonProfile`)
//! - engine outputs (`ProfileSet`, `SlopeProfile`, `DiagnosticsRecord`)
//! - the run configuration (`RunConfig`)

pub mod types;

pub use types::*;
