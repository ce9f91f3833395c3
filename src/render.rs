//! Card rendering: geometry, SVG composition and rasterization.

pub mod card;
pub mod graphic;
pub mod layout;
pub mod raster;
pub mod svg;

pub use card::render_infographic_svg;
pub use layout::{Layout, compute_layout};
pub use raster::Rasterizer;
pub use svg::SvgBuilder;
