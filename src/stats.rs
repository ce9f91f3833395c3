pub mod calculator;

pub const STATS_COUNT: usize = 12;
pub const COLOR_REGION_COUNT: usize = 6;

pub const HEALTH: usize = 0;
pub const STAMINA: usize = 1;
pub const TORPIDITY: usize = 2;
pub const OXYGEN: usize = 3;
pub const FOOD: usize = 4;
pub const WATER: usize = 5;
pub const TEMPERATURE: usize = 6;
pub const WEIGHT: usize = 7;
pub const MELEE_DAMAGE_MULTIPLIER: usize = 8;
pub const SPEED_MULTIPLIER: usize = 9;
pub const TEMPERATURE_FORTITUDE: usize = 10;
pub const CRAFTING_SPEED_MULTIPLIER: usize = 11;

/// Row order on the card. Torpidity comes last and is skipped by the stat rows.
pub const DISPLAY_ORDER: [usize; STATS_COUNT] = [
    HEALTH,
    STAMINA,
    OXYGEN,
    FOOD,
    WATER,
    TEMPERATURE,
    WEIGHT,
    MELEE_DAMAGE_MULTIPLIER,
    SPEED_MULTIPLIER,
    TEMPERATURE_FORTITUDE,
    CRAFTING_SPEED_MULTIPLIER,
    TORPIDITY,
];

/// Percentage stats are stored as multipliers and shown ×100.
pub fn is_percentage(stat_index: usize) -> bool {
    matches!(
        stat_index,
        MELEE_DAMAGE_MULTIPLIER
            | SPEED_MULTIPLIER
            | TEMPERATURE_FORTITUDE
            | CRAFTING_SPEED_MULTIPLIER
    )
}

/// Decimal digits a stat value is rounded to: 3 for percentage stats, 1 otherwise.
pub fn precision(stat_index: usize) -> u32 {
    if is_percentage(stat_index) { 3 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_stats_are_the_last_four() {
        for si in 0..STATS_COUNT {
            assert_eq!(is_percentage(si), si >= 8, "stat {si}");
            assert_eq!(precision(si), if si >= 8 { 3 } else { 1 });
        }
    }

    #[test]
    fn display_order_covers_every_stat_once() {
        let mut seen = [false; STATS_COUNT];
        for si in DISPLAY_ORDER {
            assert!(!seen[si]);
            seen[si] = true;
        }
        assert_eq!(DISPLAY_ORDER[STATS_COUNT - 1], TORPIDITY);
    }
}
