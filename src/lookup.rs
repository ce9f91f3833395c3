use std::collections::BTreeMap;

use crate::{colorize::SrgbColor, foundation::core::Rgba8};

/// Localized string lookup.
pub trait StringProvider {
    /// Localized text for `key`. Unknown keys may return the key itself.
    fn get_string(&self, key: &str) -> String;

    /// Whether a secondary language is selected. Not interpreted by the renderer.
    fn use_secondary_language(&self) -> bool {
        false
    }
}

/// ARK color id to display color.
pub trait ColorLookup {
    fn get_color(&self, color_id: u8) -> Rgba8;
}

/// Built-in English strings.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStrings;

impl DefaultStrings {
    fn lookup(key: &str) -> Option<&'static str> {
        Some(match key {
            "Level" => "Level",
            "W" => "W",
            "M" => "M",
            "D" => "D",
            "Values" => "Values",
            "Colors" => "Colors",
            "Spayed" => "Spayed",
            "Neutered" => "Neutered",
            "mutation counter" => "Mut",
            "generation" => "Gen",
            "max wild level" => "max wild level",
            "Health" => "Health",
            "Stamina" => "Stamina",
            "Torpidity" => "Torpidity",
            "Oxygen" => "Oxygen",
            "Food" => "Food",
            "Water" => "Water",
            "Temperature" => "Temperature",
            "Weight" => "Weight",
            "Damage" => "Damage",
            "Speed" => "Speed",
            "Fortitude" => "Fortitude",
            "Crafting Speed" => "Crafting Speed",
            "Health_Abb" => "HP",
            "Stamina_Abb" => "St",
            "Torpidity_Abb" => "To",
            "Oxygen_Abb" => "Ox",
            "Food_Abb" => "Fo",
            "Water_Abb" => "Wa",
            "Temperature_Abb" => "Te",
            "Weight_Abb" => "We",
            "Damage_Abb" => "Dm",
            "Speed_Abb" => "Sp",
            "Fortitude_Abb" => "Fr",
            "Crafting Speed_Abb" => "Cr",
            _ => return None,
        })
    }
}

impl StringProvider for DefaultStrings {
    fn get_string(&self, key: &str) -> String {
        Self::lookup(key).unwrap_or(key).to_string()
    }
}

/// User-supplied translations, falling back to [`DefaultStrings`].
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StringTable {
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
    #[serde(default)]
    pub secondary_language: bool,
}

impl StringProvider for StringTable {
    fn get_string(&self, key: &str) -> String {
        match self.strings.get(key) {
            Some(s) => s.clone(),
            None => DefaultStrings.get_string(key),
        }
    }

    fn use_secondary_language(&self) -> bool {
        self.secondary_language
    }
}

/// Game color with linear RGBA components (may exceed 1 for HDR colors).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArkColor {
    pub id: u8,
    pub name: String,
    pub linear_rgba: [f64; 4],
    #[serde(default)]
    pub is_dye: bool,
}

impl ArkColor {
    /// Gamma-corrected sRGB bytes.
    pub fn to_srgb(&self) -> SrgbColor {
        [
            linear_to_srgb(self.linear_rgba[0]),
            linear_to_srgb(self.linear_rgba[1]),
            linear_to_srgb(self.linear_rgba[2]),
        ]
    }
}

/// The game's simplified gamma curve: `255.999 * lc^(1/2.2)`, truncated and clamped.
pub fn linear_to_srgb(lc: f64) -> u8 {
    let v = (255.999 * lc.powf(1.0 / 2.2)).trunc();
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}

/// Color table indexed by ARK color id.
#[derive(Clone, Debug, Default)]
pub struct ArkColorTable {
    colors: BTreeMap<u8, ArkColor>,
}

impl ArkColorTable {
    pub fn new(colors: impl IntoIterator<Item = ArkColor>) -> Self {
        Self {
            colors: colors.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, color_id: u8) -> Option<&ArkColor> {
        self.colors.get(&color_id)
    }

    pub fn srgb(&self, color_id: u8) -> Option<SrgbColor> {
        self.get(color_id).map(ArkColor::to_srgb)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl ColorLookup for ArkColorTable {
    /// Unknown ids are fully transparent.
    fn get_color(&self, color_id: u8) -> Rgba8 {
        match self.srgb(color_id) {
            Some([r, g, b]) => Rgba8::rgb(r, g, b),
            None => Rgba8::TRANSPARENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strings_echo_unknown_keys() {
        assert_eq!(DefaultStrings.get_string("mutation counter"), "Mut");
        assert_eq!(DefaultStrings.get_string("Health_Abb"), "HP");
        assert_eq!(DefaultStrings.get_string("no such key"), "no such key");
        assert!(!DefaultStrings.use_secondary_language());
    }

    #[test]
    fn string_table_overrides_then_falls_back() {
        let table: StringTable = serde_json::from_str(
            r#"{"strings":{"Level":"Stufe"},"secondary_language":true}"#,
        )
        .unwrap();
        assert_eq!(table.get_string("Level"), "Stufe");
        assert_eq!(table.get_string("generation"), "Gen");
        assert!(table.use_secondary_language());
    }

    #[test]
    fn gamma_curve_truncates_and_clamps() {
        assert_eq!(linear_to_srgb(0.0), 0);
        assert_eq!(linear_to_srgb(1.0), 255);
        assert_eq!(linear_to_srgb(4.0), 255);
        assert_eq!(linear_to_srgb(-0.5), 0);
        // 255.999 * 0.5^(1/2.2) = 186.8..
        assert_eq!(linear_to_srgb(0.5), 186);
    }

    #[test]
    fn table_lookup_by_id() {
        let table = ArkColorTable::new([ArkColor {
            id: 7,
            name: "Mint".to_string(),
            linear_rgba: [0.0, 1.0, 0.5, 1.0],
            is_dye: false,
        }]);
        assert_eq!(table.srgb(7), Some([0, 255, 186]));
        assert_eq!(table.get_color(7), Rgba8::rgb(0, 255, 186));
        assert_eq!(table.get_color(8), Rgba8::TRANSPARENT);
        assert_eq!(table.len(), 1);
    }
}
