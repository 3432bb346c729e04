//! JSON order tables and solve reports
//!
//! An order table looks like
//! `{"stock_length": 5600, "pieces": [{"length": 1380, "demand": 22}, ...]}`. Pieces are
//! validated while reading, so a bad table never reaches the engine.
use std::fs;
use std::path::Path;

use crate::engine::SolveOutcome;
use crate::instance::CuttingStockInstance;
use crate::io::IoError;

/// Parse an order table
pub fn instance_from_str(json: &str) -> Result<CuttingStockInstance, IoError> {
    Ok(serde_json::from_str(json)?)
}

/// Read an order table from a file
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<CuttingStockInstance, IoError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| IoError::File {
        path: path.display().to_string(),
        source,
    })?;
    instance_from_str(&data)
}

/// Write an order table to a file
pub fn write_instance<P: AsRef<Path>>(instance: &CuttingStockInstance, path: P) -> Result<(), IoError> {
    write_pretty(instance, path.as_ref())
}

/// Render a solve outcome as pretty printed JSON
pub fn outcome_to_string(outcome: &SolveOutcome) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Write a solve outcome, including its plan when there is one, to a file
pub fn write_outcome<P: AsRef<Path>>(outcome: &SolveOutcome, path: P) -> Result<(), IoError> {
    write_pretty(outcome, path.as_ref())
}

fn write_pretty<T: serde::Serialize>(value: &T, path: &Path) -> Result<(), IoError> {
    let data = serde_json::to_string_pretty(value)?;
    fs::write(path, data).map_err(|source| IoError::File {
        path: path.display().to_string(),
        source,
    })
}
