//! Shared pipelines behind the CLI commands.
//!
//! classify: read inventory -> classify in parallel -> summarise
//! convert:  read unit table -> read parameter CSV -> convert
//!
//! The CLI layer only decides what to print or write.

use tracing::info;

use crate::app::{ClassifyConfig, ConvertConfig};
use crate::domain::{BuildingInfo, CecbConfig};
use crate::error::AppError;
use crate::params::{MarginalTable, convert_marginal_params};
use crate::report::ClassificationSummary;
use crate::rules::{CecbRules, classify_inventory};
use crate::units::UnitRegistry;

/// Outputs of a `dl classify` run.
#[derive(Debug, Clone)]
pub struct ClassifyRun {
    /// The inventory, extended with the derived attributes.
    pub buildings: Vec<BuildingInfo>,
    pub configs: Vec<CecbConfig>,
    pub summary: ClassificationSummary,
}

pub fn run_classify(config: &ClassifyConfig) -> Result<ClassifyRun, AppError> {
    let rules = CecbRules::new(config.retrofit_rate)?;
    let buildings = crate::io::read_inventory_json(&config.bim_path)?;
    classify_buildings(buildings, &rules, config.seed)
}

pub fn classify_buildings(
    mut buildings: Vec<BuildingInfo>,
    rules: &CecbRules,
    seed: u64,
) -> Result<ClassifyRun, AppError> {
    let configs = classify_inventory(&mut buildings, rules, seed)?;
    let summary = ClassificationSummary::from_configs(&configs);
    Ok(ClassifyRun {
        buildings,
        configs,
        summary,
    })
}

pub fn run_convert(config: &ConvertConfig) -> Result<MarginalTable, AppError> {
    let registry = match &config.units_path {
        Some(path) => crate::io::read_unit_registry_json(path)?,
        None => UnitRegistry::standard(),
    };
    let file = crate::io::read_params_csv(&config.params_path, config.default_unit.as_deref())?;

    let converted = convert_marginal_params(
        &file.table,
        &file.units,
        file.arg_units.as_deref(),
        &registry,
    )?;
    info!(
        rows = converted.len(),
        path = %config.params_path.display(),
        "converted marginal parameters"
    );
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{RvKey, Theta};
    use crate::rules::SHUTTER_RETROFIT_RATE;

    #[test]
    fn convert_pipeline_reads_units_and_params() {
        let dir = tempfile::tempdir().unwrap();
        let params_path = dir.path().join("params.csv");
        let units_path = dir.path().join("units.json");
        std::fs::write(
            &params_path,
            concat!(
                "cmp,loc,dir,Units,ArgUnits,Theta_0\n",
                "A,0,1,test_three,test_two,\"500.0,400.00|20,10\"\n",
                "B,0,1,ft,,2\n",
            ),
        )
        .unwrap();
        std::fs::write(&units_path, r#"{"test_two": 2.0, "test_three": 3.0}"#).unwrap();

        let converted = run_convert(&ConvertConfig {
            params_path,
            units_path: Some(units_path),
            default_unit: None,
            output: None,
        })
        .unwrap();

        let a = converted.get(&RvKey::new("A", "0", "1")).unwrap();
        assert_eq!(a.theta_0.as_ref().unwrap().to_string(), "750,600|40,20");
        let b = converted.get(&RvKey::new("B", "0", "1")).unwrap();
        let v = b.theta_0.as_ref().and_then(Theta::as_value).unwrap();
        assert!((v - 0.6096).abs() < 1e-12);
    }

    #[test]
    fn classify_pipeline_summarises() {
        let buildings: Vec<BuildingInfo> = serde_json::from_str(
            r#"[
                {"YearBuilt": 2010, "RoofShape": "flt", "WindBorneDebris": true,
                 "OccupancyClass": "COM1", "WindowArea": 0.6, "NumberOfStories": 8,
                 "TerrainRoughness": 35},
                {"YearBuilt": 1960, "RoofShape": "flt", "WindBorneDebris": false,
                 "OccupancyClass": "AGR1", "WindowArea": 0.4, "NumberOfStories": 1,
                 "TerrainRoughness": 3}
            ]"#,
        )
        .unwrap();
        let rules = CecbRules::new(SHUTTER_RETROFIT_RATE).unwrap();

        let run = classify_buildings(buildings, &rules, 9).unwrap();

        let tags: Vec<String> = run.configs.iter().map(ToString::to_string).collect();
        assert_eq!(tags, ["C.ECB.H.spm.1.A.hig.35", "C.ECB.L.bur.0.D.med.3"]);
        assert_eq!(run.summary.with_shutters, 1);
        assert_eq!(run.buildings[1].get("WindDebrisClass"), Some(&serde_json::Value::from("D")));
    }
}
