use std::collections::BTreeMap;

use crate::stats::{COLOR_REGION_COUNT, STATS_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Sex {
    #[default]
    Unknown,
    Male,
    Female,
}

/// Read-only snapshot of one creature.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CreatureData {
    pub species_name: String,
    pub creature_name: String,
    pub sex: Sex,
    pub is_neutered: bool,
    pub is_mutagen_applied: bool,
    pub is_bred: bool,

    pub levels_wild: [i32; STATS_COUNT], // negative = not recorded
    pub levels_dom: [i32; STATS_COUNT],
    pub levels_mutated: Option<[i32; STATS_COUNT]>,

    pub values_breeding: [f64; STATS_COUNT],
    pub values_current: [f64; STATS_COUNT],

    pub colors: [u8; COLOR_REGION_COUNT],

    pub taming_effectiveness: f64, // 0..1, negative = unset
    pub imprinting_bonus: f64,     // 0..1

    pub mutations: i32,
    pub generation: i32,
    pub level: i32,
    pub level_hatched: i32,
}

/// Per-species display metadata.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpeciesInfo {
    pub enabled_color_regions: [bool; COLOR_REGION_COUNT],
    pub used_stats: [bool; STATS_COUNT],
    /// Custom stat name keys, keyed by the stat index as text.
    pub stat_names: Option<BTreeMap<String, String>>,
    pub color_region_names: [Option<String>; COLOR_REGION_COUNT],
}

/// Raw per-stat coefficients as found in the game's values file:
/// `[base, inc_per_wild, inc_per_dom, add_when_tamed, mult_affinity]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 5]", into = "[f64; 5]")]
pub struct StatRaw {
    pub base: f64,
    pub inc_per_wild: f64,
    pub inc_per_dom: f64,
    pub add_when_tamed: f64,
    pub mult_affinity: f64,
}

impl From<[f64; 5]> for StatRaw {
    fn from(v: [f64; 5]) -> Self {
        Self {
            base: v[0],
            inc_per_wild: v[1],
            inc_per_dom: v[2],
            add_when_tamed: v[3],
            mult_affinity: v[4],
        }
    }
}

impl From<StatRaw> for [f64; 5] {
    fn from(s: StatRaw) -> Self {
        [
            s.base,
            s.inc_per_wild,
            s.inc_per_dom,
            s.add_when_tamed,
            s.mult_affinity,
        ]
    }
}

/// Species data needed by the stat formula.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpeciesStatData {
    /// `None` marks a stat the species does not use.
    pub full_stats_raw: [Option<StatRaw>; STATS_COUNT],
    /// Applies to health only.
    pub tamed_base_health_multiplier: f64,
    pub stat_imprint_multipliers: [f64; STATS_COUNT],
    /// Absent means every stat scales as a percentage of its base.
    pub increase_stat_as_percentage: Option<[bool; STATS_COUNT]>,
}

impl Default for SpeciesStatData {
    fn default() -> Self {
        Self {
            full_stats_raw: [None; STATS_COUNT],
            tamed_base_health_multiplier: 1.0,
            stat_imprint_multipliers: [0.0; STATS_COUNT],
            increase_stat_as_percentage: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub max_chart_level: i32,
    pub max_dom_level: i32,
    pub max_wild_level: i32,
    /// Game variant, e.g. `"ASA"` or `"ASE"`.
    pub game: String,
}

impl ServerSettings {
    pub const GAME_ASA: &'static str = "ASA";

    pub fn is_asa(&self) -> bool {
        self.game == Self::GAME_ASA
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            max_chart_level: 50,
            max_dom_level: 88,
            max_wild_level: 150,
            game: Self::GAME_ASA.to_string(),
        }
    }
}
