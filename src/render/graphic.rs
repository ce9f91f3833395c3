use crate::{
    foundation::core::Rgba8,
    lookup::StringProvider,
    model::{CreatureData, ServerSettings, Sex},
    stats::STATS_COUNT,
};

const STAT_NAME_KEYS: [&str; STATS_COUNT] = [
    "Health",
    "Stamina",
    "Torpidity",
    "Oxygen",
    "Food",
    "Water",
    "Temperature",
    "Weight",
    "Damage",
    "Speed",
    "Fortitude",
    "Crafting Speed",
];

/// Black or white, whichever reads better on `back`.
pub fn fore_color(back: Rgba8) -> Rgba8 {
    let luminance = f64::from(back.r) * 0.3 + f64::from(back.g) * 0.59 + f64::from(back.b) * 0.11;
    if luminance < 110.0 {
        Rgba8::WHITE
    } else {
        Rgba8::BLACK
    }
}

pub fn sex_symbol(sex: Sex) -> &'static str {
    match sex {
        Sex::Male => "\u{2642}",
        Sex::Female => "\u{2640}",
        Sex::Unknown => "?",
    }
}

/// Green (100) to red (0) gradient.
///
/// `light` in `-1..=1` darkens (negative) or lightens (positive) the color; `blue` swaps the red
/// and blue channels.
pub fn color_from_percent(percent: i32, light: f64, blue: bool) -> Rgba8 {
    let mut g = (f64::from(percent) * 5.1).trunc() as i32;
    let mut r = 511 - g;
    let mut b = 0;
    r = r.clamp(0, 255);
    g = g.clamp(0, 255);

    if light != 0.0 {
        let l = light.clamp(-1.0, 1.0);
        if l > 0.0 {
            r = (f64::from(255 - r) * l + f64::from(r)).trunc() as i32;
            g = (f64::from(255 - g) * l + f64::from(g)).trunc() as i32;
            b = (f64::from(255 - b) * l + f64::from(b)).trunc() as i32;
        } else {
            let l = l + 1.0;
            r = (f64::from(r) * l).trunc() as i32;
            g = (f64::from(g) * l).trunc() as i32;
        }
    }

    let (r, g, b) = (r as u8, g as u8, b as u8);
    if blue {
        Rgba8::rgb(b, g, r)
    } else {
        Rgba8::rgb(r, g, b)
    }
}

/// Display name or abbreviation of a stat, honoring species-specific name keys.
pub fn stat_name(
    stat_index: usize,
    abbreviation: bool,
    custom_names: Option<&std::collections::BTreeMap<String, String>>,
    strings: &dyn StringProvider,
) -> String {
    let Some(default_key) = STAT_NAME_KEYS.get(stat_index) else {
        return String::new();
    };

    let key = custom_names
        .and_then(|names| names.get(&stat_index.to_string()))
        .map_or(*default_key, String::as_str);

    if abbreviation {
        strings.get_string(&format!("{key}_Abb"))
    } else {
        strings.get_string(key)
    }
}

/// Species (tagged on ASA servers) and, when enabled, the creature's name.
pub fn header_text(creature: &CreatureData, server: &ServerSettings, with_name: bool) -> String {
    let mut text = if server.is_asa() {
        format!("{} (ASA)", creature.species_name)
    } else {
        creature.species_name.clone()
    };
    if with_name {
        text.push_str(" - ");
        text.push_str(&creature.creature_name);
    }
    text
}

/// Length used by the width heuristic, in UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane count twice.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Longest prefix of `text` that fits into `units` UTF-16 code units.
///
/// Never splits a surrogate pair: a character that would straddle the limit is left out.
fn utf16_prefix(text: &str, units: usize) -> &str {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        used += c.len_utf16();
        if used > units {
            return &text[..i];
        }
    }
    text
}

/// Fixed-point formatting with ties rounded away from zero.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let value = if value == 0.0 { 0.0 } else { value }; // drop negative zero
    // An exact tie has a finite decimal expansion ending in 5 right after `digits`.
    let exact = format!("{:.*}", digits + 40, value.abs());
    let frac = exact.split_once('.').map_or("", |(_, f)| f);
    let is_tie = frac.as_bytes().get(digits) == Some(&b'5')
        && frac.as_bytes()[digits + 1..].iter().all(|&c| c == b'0');

    if is_tie {
        let scale = 10f64.powi(digits as i32);
        let away = ((value.abs() * scale).trunc() + 1.0) / scale;
        let s = format!("{away:.digits$}");
        if value < 0.0 { format!("-{s}") } else { s }
    } else {
        format!("{value:.digits$}")
    }
}

/// Region name fitted into `max_len` UTF-16 units of label, as ` (name)`.
///
/// The label around the name takes 11 characters. Names that do not fit are cut and end with an
/// ellipsis; names that would keep fewer than 2 characters are dropped.
pub fn region_label(name: &str, max_len: i32) -> Option<String> {
    let name_len = text_len(name) as i32;
    let total = name_len + 11;

    let fitted: String = if total > max_len {
        let keep = name_len - (total - max_len);
        if keep < 2 {
            String::new()
        } else {
            format!("{}\u{2026}", utf16_prefix(name, (keep - 1) as usize))
        }
    } else {
        name.to_string()
    };

    if fitted.is_empty() {
        None
    } else {
        Some(format!(" ({fitted})"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::lookup::DefaultStrings;

    #[test]
    fn fore_color_contrasts() {
        assert_eq!(fore_color(Rgba8::WHITE), Rgba8::BLACK);
        assert_eq!(fore_color(Rgba8::BLACK), Rgba8::WHITE);
        assert_eq!(fore_color(Rgba8::rgb(0, 0, 255)), Rgba8::WHITE);
    }

    #[test]
    fn gradient_endpoints_and_midpoint() {
        assert_eq!(color_from_percent(0, 0.0, false), Rgba8::rgb(255, 0, 0));
        // 100 * 5.1 lands just below 510, so g = 509 and r = 2
        assert_eq!(color_from_percent(100, 0.0, false), Rgba8::rgb(2, 255, 0));
        assert_eq!(color_from_percent(40, 0.0, false), Rgba8::rgb(255, 204, 0));
        assert_eq!(color_from_percent(0, 0.0, true), Rgba8::rgb(0, 0, 255));
    }

    #[test]
    fn gradient_light_and_dark() {
        assert_eq!(color_from_percent(0, -0.5, false), Rgba8::rgb(127, 0, 0));
        assert_eq!(color_from_percent(100, 0.5, false), Rgba8::rgb(128, 255, 127));
        assert_eq!(color_from_percent(100, -3.0, false), Rgba8::rgb(0, 0, 0));
    }

    #[test]
    fn stat_names_use_custom_keys() {
        assert_eq!(stat_name(0, true, None, &DefaultStrings), "HP");
        assert_eq!(stat_name(11, false, None, &DefaultStrings), "Crafting Speed");
        assert_eq!(stat_name(12, true, None, &DefaultStrings), "");

        let mut custom = BTreeMap::new();
        custom.insert("3".to_string(), "Charge Capacity".to_string());
        assert_eq!(
            stat_name(3, true, Some(&custom), &DefaultStrings),
            "Charge Capacity_Abb"
        );
        assert_eq!(stat_name(4, true, Some(&custom), &DefaultStrings), "Fo");
    }

    #[test]
    fn header_tags_asa_and_appends_name() {
        let creature = CreatureData {
            species_name: "Rex".to_string(),
            creature_name: "Chomp".to_string(),
            ..CreatureData::default()
        };
        let asa = ServerSettings::default();
        let ase = ServerSettings {
            game: "ASE".to_string(),
            ..ServerSettings::default()
        };
        assert_eq!(header_text(&creature, &asa, true), "Rex (ASA) - Chomp");
        assert_eq!(header_text(&creature, &ase, false), "Rex");
    }

    #[test]
    fn to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-0.25, 1), "-0.3");
        assert_eq!(to_fixed(1.0, 1), "1.0");
        assert_eq!(to_fixed(123.456, 1), "123.5");
        // 0.15 is stored slightly below the tie
        assert_eq!(to_fixed(0.15, 1), "0.1");
        assert_eq!(to_fixed(95.5, 1), "95.5");
    }

    #[test]
    fn region_label_truncates_with_ellipsis() {
        assert_eq!(region_label("Body", 40).as_deref(), Some(" (Body)"));
        // 11 + 11 = 22 > 18 -> keep 7, cut to 6 + ellipsis
        assert_eq!(
            region_label("Back Spikes", 18).as_deref(),
            Some(" (Back S\u{2026})")
        );
        assert_eq!(region_label("Back Spikes", 13).as_deref(), Some(" (B\u{2026})"));
        assert_eq!(region_label("Back Spikes", 12), None);
        assert_eq!(region_label("", 40), None);
    }

    #[test]
    fn text_len_counts_utf16_units() {
        assert_eq!(text_len("Rex"), 3);
        assert_eq!(text_len("\u{2642}\u{2026}"), 2);
        assert_eq!(text_len("\u{1F996}"), 2);
        assert_eq!(text_len("a\u{1F996}b"), 4);
    }

    #[test]
    fn region_label_cuts_astral_names_on_char_boundaries() {
        let dinos = "\u{1F996}".repeat(4); // 8 units
        assert_eq!(
            region_label(&dinos, 19).as_deref(),
            Some(" (\u{1F996}\u{1F996}\u{1F996}\u{1F996})")
        );
        // keep 5 -> 4 units before the ellipsis
        assert_eq!(
            region_label(&dinos, 16).as_deref(),
            Some(" (\u{1F996}\u{1F996}\u{2026})")
        );
        // keep 4 -> 3 units, the second pair would be split
        assert_eq!(
            region_label(&dinos, 15).as_deref(),
            Some(" (\u{1F996}\u{2026})")
        );
        assert_eq!(region_label("a\u{1F996}b", 14).as_deref(), Some(" (a\u{2026})"));
        // 8 + 11 = 19 -> keep 1
        assert_eq!(region_label(&dinos, 12), None);
    }
}
