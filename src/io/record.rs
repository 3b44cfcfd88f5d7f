//! Read/write diagnostics records and parameter sets as JSON.
//!
//! A record file is the "portable" representation of a run:
//! - tool name and generation timestamp
//! - the full [`DiagnosticsRecord`] (mode tag, parameters, arrays, scalars)
//!
//! The timestamp lives on the file wrapper, not on the record, so the record
//! itself stays a pure function of the run inputs.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DiagnosticsRecord, ParameterSet};
use crate::error::AppError;

/// On-disk wrapper around a record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub record: DiagnosticsRecord,
}

/// Write a record JSON file.
pub fn write_record_json(path: &Path, record: &DiagnosticsRecord) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create record JSON '{}': {e}", path.display())))?;

    let wrapped = RecordFile {
        tool: "gop".to_string(),
        generated_at: Utc::now(),
        record: record.clone(),
    };

    serde_json::to_writer_pretty(file, &wrapped)
        .map_err(|e| AppError::new(2, format!("Failed to write record JSON: {e}")))?;

    Ok(())
}

/// Read a record JSON file.
pub fn read_record_json(path: &Path) -> Result<RecordFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open record JSON '{}': {e}", path.display())))?;
    let record: RecordFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid record JSON: {e}")))?;
    Ok(record)
}

/// Read a registered parameter set (`kappa_a`, `e0_erg`, `f_ent`, `a_cp`).
///
/// Validation runs during deserialization; an out-of-range value is rejected.
pub fn read_params_json(path: &Path) -> Result<ParameterSet, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open parameter JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::new(3, format!("Invalid parameter set '{}': {e}", path.display())))
}
