//! HAZUS configuration rules for engineered commercial buildings (CECB).
//!
//! Every rule reads the inventory independently; only the final tag string
//! combines them. The categorical cascades are kept as small ordered tables
//! so they can be checked line by line against the HAZUS tables.

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use tracing::debug;

use crate::domain::{
    BuildingInfo, CecbConfig, RiseClass, RoofCover, WindDebrisClass, WindowAreaRatio,
};
use crate::error::AppError;

/// Share of pre-2000 commercial buildings assumed to have shutters.
///
/// Shutters were not required by code until the 2000 IBC. Surveys of small
/// businesses in hurricane-prone counties put the share that wind-proofed
/// their facilities at 46%; homeowner compliance rates hover between 43%
/// and 50%.
pub const SHUTTER_RETROFIT_RATE: f64 = 0.46;

/// First year in which shutters follow the wind-borne debris requirement.
pub const SHUTTER_CODE_YEAR: i64 = 2000;

/// First year in which flat/other roofs are assumed to be single-ply membrane.
pub const SPM_ROOF_YEAR: i64 = 1975;

/// HAZUS has no "not applicable" roof cover for CECB, so these shapes fall
/// back to built-up roof.
const BUR_FALLBACK_SHAPES: [&str; 2] = ["gab", "hip"];

const DEBRIS_BY_OCCUPANCY: [(&str, WindDebrisClass); 7] = [
    ("RES1", WindDebrisClass::C),
    ("RES2", WindDebrisClass::C),
    ("RES3A", WindDebrisClass::C),
    ("RES3B", WindDebrisClass::C),
    ("RES3C", WindDebrisClass::C),
    ("RES3D", WindDebrisClass::C),
    ("AGR1", WindDebrisClass::D),
];
const DEBRIS_OTHERWISE: WindDebrisClass = WindDebrisClass::A;

/// `(exclusive upper bound, ratio)`, checked in order.
const WINDOW_AREA_BANDS: [(f64, WindowAreaRatio); 2] =
    [(0.33, WindowAreaRatio::Low), (0.5, WindowAreaRatio::Med)];
const WINDOW_AREA_OTHERWISE: WindowAreaRatio = WindowAreaRatio::Hig;

/// `(inclusive max stories, class)`, checked in order.
const STORY_BANDS: [(i64, RiseClass); 2] = [(2, RiseClass::LowRise), (5, RiseClass::MidRise)];
const STORY_OTHERWISE: RiseClass = RiseClass::HighRise;

/// The attributes the CECB rules read, parsed up front so a missing field
/// fails before anything is written back.
#[derive(Debug, Clone, PartialEq)]
pub struct CecbInputs {
    pub year_built: i64,
    pub roof_shape: String,
    pub wind_borne_debris: bool,
    pub occupancy_class: String,
    pub window_area: f64,
    pub number_of_stories: i64,
    pub terrain_roughness: f64,
}

impl CecbInputs {
    pub fn from_bim(bim: &BuildingInfo) -> Result<Self, AppError> {
        Ok(Self {
            year_built: bim.require_i64("YearBuilt")?,
            roof_shape: bim.require_str("RoofShape")?.to_string(),
            wind_borne_debris: bim.require_bool("WindBorneDebris")?,
            occupancy_class: bim.require_str("OccupancyClass")?.to_string(),
            window_area: bim.require_f64("WindowArea")?,
            number_of_stories: bim.require_i64("NumberOfStories")?,
            terrain_roughness: bim.require_f64("TerrainRoughness")?,
        })
    }
}

/// CECB ruleset with a configurable shutter retrofit rate.
#[derive(Debug, Clone, Copy)]
pub struct CecbRules {
    retrofit: Bernoulli,
    retrofit_rate: f64,
}

impl CecbRules {
    pub fn new(retrofit_rate: f64) -> Result<Self, AppError> {
        let retrofit = Bernoulli::new(retrofit_rate).map_err(|e| {
            AppError::Config(format!("shutter retrofit rate {retrofit_rate}: {e}"))
        })?;
        Ok(Self {
            retrofit,
            retrofit_rate,
        })
    }

    pub fn retrofit_rate(&self) -> f64 {
        self.retrofit_rate
    }

    /// Classify a building and extend `bim` with `RoofCover`, `Shutters`,
    /// `WindowAreaRatio` and `WindDebrisClass`.
    ///
    /// `bim` is left untouched when a required attribute is missing or invalid.
    pub fn classify<R: Rng + ?Sized>(
        &self,
        bim: &mut BuildingInfo,
        rng: &mut R,
    ) -> Result<CecbConfig, AppError> {
        let inputs = CecbInputs::from_bim(bim)?;
        let config = self.resolve(&inputs, rng);

        bim.insert("RoofCover", config.roof_cover.code());
        bim.insert("Shutters", config.shutters);
        bim.insert("WindowAreaRatio", config.window_area.code());
        bim.insert("WindDebrisClass", config.wind_debris.code());

        Ok(config)
    }

    /// Apply the rules to already-parsed inputs.
    pub fn resolve<R: Rng + ?Sized>(&self, inputs: &CecbInputs, rng: &mut R) -> CecbConfig {
        CecbConfig {
            rise: rise_class(inputs.number_of_stories),
            roof_cover: roof_cover(&inputs.roof_shape, inputs.year_built),
            shutters: self.shutters(inputs.year_built, inputs.wind_borne_debris, rng),
            wind_debris: wind_debris_class(&inputs.occupancy_class),
            window_area: window_area_ratio(inputs.window_area),
            terrain_roughness: inputs.terrain_roughness.trunc() as i64,
        }
    }

    fn shutters<R: Rng + ?Sized>(
        &self,
        year_built: i64,
        wind_borne_debris: bool,
        rng: &mut R,
    ) -> bool {
        if year_built >= SHUTTER_CODE_YEAR {
            wind_borne_debris
        } else if wind_borne_debris {
            let drawn = self.retrofit.sample(rng);
            debug!(year_built, drawn, "pre-code shutters drawn");
            drawn
        } else {
            false
        }
    }
}

/// Classify with the standard retrofit rate and return the configuration tag.
pub fn cecb_config<R: Rng + ?Sized>(
    bim: &mut BuildingInfo,
    rng: &mut R,
) -> Result<String, AppError> {
    let rules = CecbRules::new(SHUTTER_RETROFIT_RATE)?;
    rules.classify(bim, rng).map(|config| config.to_string())
}

pub fn roof_cover(roof_shape: &str, year_built: i64) -> RoofCover {
    if BUR_FALLBACK_SHAPES.contains(&roof_shape) {
        RoofCover::Bur
    } else if year_built >= SPM_ROOF_YEAR {
        RoofCover::Spm
    } else {
        RoofCover::Bur
    }
}

pub fn wind_debris_class(occupancy_class: &str) -> WindDebrisClass {
    DEBRIS_BY_OCCUPANCY
        .iter()
        .find(|(code, _)| *code == occupancy_class)
        .map(|(_, class)| *class)
        .unwrap_or(DEBRIS_OTHERWISE)
}

pub fn window_area_ratio(window_area: f64) -> WindowAreaRatio {
    WINDOW_AREA_BANDS
        .iter()
        .find(|(upper, _)| window_area < *upper)
        .map(|(_, ratio)| *ratio)
        .unwrap_or(WINDOW_AREA_OTHERWISE)
}

pub fn rise_class(number_of_stories: i64) -> RiseClass {
    STORY_BANDS
        .iter()
        .find(|(max_stories, _)| number_of_stories <= *max_stories)
        .map(|(_, class)| *class)
        .unwrap_or(STORY_OTHERWISE)
}
