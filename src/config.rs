use crate::foundation::core::Rgba8;

/// Appearance and content switches for one card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InfoGraphicConfig {
    /// Card height in pixels. Values below 5 fall back to 180, values above 65536 are clamped.
    pub height: i32,
    pub font_name: String,
    pub fore_color: Rgba8,
    pub back_color: Rgba8,
    pub border_color: Rgba8,
    /// Clamped to `0..=height / 2`.
    pub border_width: i32,
    pub display_creature_name: bool,
    pub display_dom_levels: bool,
    /// Show wild + mutated levels as one number instead of a separate column.
    pub display_sum_wild_mut_levels: bool,
    pub display_mutations: bool,
    pub display_generation: bool,
    pub display_stat_values: bool,
    pub display_max_wild_level: bool,
    /// Widen the card to make room for color region names.
    pub display_extra_region_names: bool,
    pub display_region_names_if_no_image: bool,
}

impl InfoGraphicConfig {
    pub const FALLBACK_FONT: &'static str = "Arial";

    /// Font family used in the document.
    pub fn font_family(&self) -> &str {
        if self.font_name.is_empty() {
            Self::FALLBACK_FONT
        } else {
            &self.font_name
        }
    }
}

impl Default for InfoGraphicConfig {
    fn default() -> Self {
        Self {
            height: 180,
            font_name: "Liberation Sans".to_string(),
            fore_color: Rgba8::BLACK,
            back_color: Rgba8::WHITE,
            border_color: Rgba8::BLACK,
            border_width: 1,
            display_creature_name: true,
            display_dom_levels: true,
            display_sum_wild_mut_levels: false,
            display_mutations: true,
            display_generation: true,
            display_stat_values: true,
            display_max_wild_level: true,
            display_extra_region_names: false,
            display_region_names_if_no_image: true,
        }
    }
}

/// Font made available to the rasterizer.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Family name, used as the default family when this is the first font.
    pub name: String,
    pub data: Vec<u8>,
}
