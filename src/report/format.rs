//! Terminal output for classification runs.
//!
//! Formatting stays here so the rules never print anything themselves.

use std::collections::BTreeMap;

use crate::domain::{BuildingInfo, CecbConfig};

/// Per-configuration counts for an inventory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationSummary {
    pub buildings: usize,
    pub with_shutters: usize,
    pub by_tag: BTreeMap<String, usize>,
}

impl ClassificationSummary {
    pub fn from_configs(configs: &[CecbConfig]) -> Self {
        let mut by_tag = BTreeMap::new();
        for config in configs {
            *by_tag.entry(config.to_string()).or_insert(0) += 1;
        }
        Self {
            buildings: configs.len(),
            with_shutters: configs.iter().filter(|c| c.shutters).count(),
            by_tag,
        }
    }
}

/// One line per building: an identifier and its configuration tag.
///
/// The identifier is the building's `id` / `BldgID` attribute when present,
/// else its position in the inventory.
pub fn format_configs(buildings: &[BuildingInfo], configs: &[CecbConfig]) -> String {
    let mut out = String::new();
    for (i, (bim, config)) in buildings.iter().zip(configs).enumerate() {
        let id = building_label(bim).unwrap_or_else(|| i.to_string());
        out.push_str(&format!("{id}\t{config}\n"));
    }
    out
}

pub fn format_summary(summary: &ClassificationSummary) -> String {
    let mut out = String::new();
    out.push_str("=== dl - CECB configurations ===\n");
    out.push_str(&format!("Buildings: {}\n", summary.buildings));
    if summary.buildings > 0 {
        let share = summary.with_shutters as f64 / summary.buildings as f64;
        out.push_str(&format!(
            "Shutters: {} ({:.1}%)\n",
            summary.with_shutters,
            100.0 * share
        ));
    }
    out.push_str("\nConfiguration counts:\n");
    for (tag, count) in &summary.by_tag {
        out.push_str(&format!("  {tag:<28} {count:>6}\n"));
    }
    out
}

fn building_label(bim: &BuildingInfo) -> Option<String> {
    ["id", "BldgID"].into_iter().find_map(|key| match bim.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RiseClass, RoofCover, WindDebrisClass, WindowAreaRatio};
    use serde_json::json;

    fn config(shutters: bool) -> CecbConfig {
        CecbConfig {
            rise: RiseClass::LowRise,
            roof_cover: RoofCover::Bur,
            shutters,
            wind_debris: WindDebrisClass::C,
            window_area: WindowAreaRatio::Low,
            terrain_roughness: 3,
        }
    }

    #[test]
    fn summary_counts_tags() {
        let configs = [config(true), config(false), config(true)];
        let summary = ClassificationSummary::from_configs(&configs);
        assert_eq!(summary.buildings, 3);
        assert_eq!(summary.with_shutters, 2);
        assert_eq!(summary.by_tag.get("C.ECB.L.bur.1.C.low.3"), Some(&2));

        let text = format_summary(&summary);
        assert!(text.contains("Shutters: 2 (66.7%)"));
    }

    #[test]
    fn config_lines_prefer_building_ids() {
        let with_id: BuildingInfo = serde_json::from_value(json!({"id": "B-17"})).unwrap();
        let without: BuildingInfo = serde_json::from_value(json!({})).unwrap();
        let text = format_configs(&[with_id, without], &[config(false), config(true)]);
        assert_eq!(text, "B-17\tC.ECB.L.bur.0.C.low.3\n1\tC.ECB.L.bur.1.C.low.3\n");
    }
}
