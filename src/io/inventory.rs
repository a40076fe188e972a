//! Read/write building inventories as JSON.
//!
//! A file holds either a single building object or an array of them.
//! Attributes the rules do not know about are carried through untouched.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::Deserialize;

use crate::domain::BuildingInfo;
use crate::error::AppError;

#[derive(Deserialize)]
#[serde(untagged)]
enum InventoryDoc {
    Many(Vec<BuildingInfo>),
    One(BuildingInfo),
}

/// Read an inventory JSON file.
pub fn read_inventory_json(path: &Path) -> Result<Vec<BuildingInfo>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open inventory JSON '{}': {e}", path.display()))
    })?;
    read_inventory(BufReader::new(file))
}

pub fn read_inventory<R: Read>(reader: R) -> Result<Vec<BuildingInfo>, AppError> {
    let doc: InventoryDoc = serde_json::from_reader(reader).map_err(|e| {
        AppError::input(format!(
            "Invalid inventory JSON (expected an object or an array of objects): {e}"
        ))
    })?;
    Ok(match doc {
        InventoryDoc::Many(buildings) => buildings,
        InventoryDoc::One(building) => vec![building],
    })
}

/// Write an inventory JSON file (always an array).
pub fn write_inventory_json(path: &Path, buildings: &[BuildingInfo]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create inventory JSON '{}': {e}", path.display()))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, buildings)
        .map_err(|e| AppError::input(format!("Failed to write inventory JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to write inventory JSON: {e}")))?;
    Ok(())
}
