//! Load unit overrides from JSON.
//!
//! The file is a flat object of `label: factor` pairs. Entries are merged over
//! the standard table, so a file only needs the units it adds or redefines.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::units::UnitRegistry;

pub fn read_unit_registry_json(path: &Path) -> Result<UnitRegistry, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open unit JSON '{}': {e}", path.display()))
    })?;
    let registry = extend_registry(UnitRegistry::standard(), BufReader::new(file))?;
    info!(path = %path.display(), units = registry.len(), "loaded unit table");
    Ok(registry)
}

pub fn extend_registry<R: Read>(
    mut registry: UnitRegistry,
    reader: R,
) -> Result<UnitRegistry, AppError> {
    let entries: BTreeMap<String, f64> = serde_json::from_reader(reader).map_err(|e| {
        AppError::input(format!(
            "Invalid unit JSON (expected {{\"label\": factor}}): {e}"
        ))
    })?;
    for (label, factor) in entries {
        registry.insert(label, factor)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_merge_over_standard() {
        let json = r#"{"test_two": 2.0, "ft": 0.3}"#;
        let reg = extend_registry(UnitRegistry::standard(), json.as_bytes()).unwrap();
        assert_eq!(reg.factor("test_two").unwrap(), 2.0);
        assert_eq!(reg.factor("ft").unwrap(), 0.3);
        assert!(reg.contains("in2"));
    }

    #[test]
    fn invalid_factor_is_a_config_error() {
        let json = r#"{"bad": -1.0}"#;
        assert!(matches!(
            extend_registry(UnitRegistry::empty(), json.as_bytes()),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.json");
        std::fs::write(&path, r#"{"bay": 7.5}"#).unwrap();
        let reg = read_unit_registry_json(&path).unwrap();
        assert_eq!(reg.factor("2 bay").unwrap(), 15.0);
    }
}
