use crate::{
    model::{SpeciesStatData, StatRaw},
    stats::{HEALTH, STATS_COUNT, precision},
};

/// Stat values for all 12 slots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatValues {
    /// Values with dom levels forced to 0 (breeding potential).
    pub values_breeding: [f64; STATS_COUNT],
    /// Values with dom levels applied.
    pub values_current: [f64; STATS_COUNT],
}

/// Levels and taming state for one creature.
#[derive(Clone, Copy, Debug)]
pub struct StatLevels<'a> {
    pub levels_wild: &'a [i32; STATS_COUNT],
    pub levels_dom: &'a [i32; STATS_COUNT],
    pub levels_mutated: Option<&'a [i32; STATS_COUNT]>,
    pub is_tamed: bool,
    pub taming_effectiveness: f64,
    pub imprinting_bonus: f64,
}

/// Compute breeding and current values for every stat the species uses.
///
/// Stats without raw coefficients stay at 0.
#[tracing::instrument(skip_all, fields(tamed = levels.is_tamed))]
pub fn compute_stat_values(species: &SpeciesStatData, levels: StatLevels<'_>) -> StatValues {
    let mut out = StatValues::default();

    for si in 0..STATS_COUNT {
        let Some(raw) = species.full_stats_raw[si] else {
            continue;
        };

        let lw = levels.levels_wild[si];
        let ld = levels.levels_dom[si];
        let lm = levels.levels_mutated.map_or(0, |m| m[si]);

        out.values_breeding[si] = calculate_value(species, &raw, si, lw, lm, 0, &levels);
        out.values_current[si] = calculate_value(species, &raw, si, lw, lm, ld, &levels);
    }

    out
}

fn calculate_value(
    species: &SpeciesStatData,
    raw: &StatRaw,
    stat_index: usize,
    level_wild: i32,
    level_mut: i32,
    level_dom: i32,
    levels: &StatLevels<'_>,
) -> f64 {
    // Mutated levels increase the stat at the wild rate.
    let wild_increase = f64::from(level_wild + level_mut) * raw.inc_per_wild;
    let dom_increase = f64::from(level_dom) * raw.inc_per_dom;

    let tbhm = if stat_index == HEALTH {
        species.tamed_base_health_multiplier
    } else {
        1.0
    };

    let imprinting_m = if levels.imprinting_bonus > 0.0 {
        1.0 + species.stat_imprint_multipliers[stat_index] * levels.imprinting_bonus
    } else {
        1.0
    };

    let add = if levels.is_tamed {
        raw.add_when_tamed
    } else {
        0.0
    };

    let dom_mult = if !levels.is_tamed || levels.taming_effectiveness < 0.0 {
        1.0
    } else if raw.mult_affinity >= 0.0 {
        1.0 + raw.mult_affinity * levels.taming_effectiveness
    } else {
        // negative affinity is a flat penalty, independent of TE
        1.0 + raw.mult_affinity
    };

    let as_percentage = species
        .increase_stat_as_percentage
        .is_none_or(|flags| flags[stat_index]);

    let result = if as_percentage {
        (raw.base * (1.0 + wild_increase) * tbhm * imprinting_m + add)
            * dom_mult
            * (1.0 + dom_increase)
    } else {
        ((raw.base + wild_increase) * tbhm * imprinting_m + add) * dom_mult + dom_increase
    };

    if result <= 0.0 {
        return 0.0;
    }

    round_to_precision(result, precision(stat_index))
}

/// Round half away from zero at `digits` decimal places.
pub fn round_to_precision(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
