#![forbid(unsafe_code)]

//! Creature infographic cards and region-based sprite colorization for ARK.
//!
//! The card pipeline is [`compute_stat_values`] (optional) → [`render_infographic_svg`] →
//! [`Rasterizer::render_png`]. Sprites are recolored with [`colorize`] / [`colorize_png`].

pub mod assets;
pub mod colorize;
pub mod config;
pub mod foundation;
pub mod lookup;
pub mod model;
pub mod render;
pub mod stats;

pub use assets::PixelImage;
pub use colorize::{MaskRegion, SrgbColor, colorize, colorize_png};
pub use config::{FontConfig, InfoGraphicConfig};
pub use foundation::core::Rgba8;
pub use foundation::error::{CardError, CardResult};
pub use lookup::{
    ArkColor, ArkColorTable, ColorLookup, DefaultStrings, StringProvider, StringTable,
};
pub use model::{CreatureData, ServerSettings, Sex, SpeciesInfo, SpeciesStatData, StatRaw};
pub use render::{Rasterizer, render_infographic_svg};
pub use stats::calculator::{StatLevels, StatValues, compute_stat_values};
