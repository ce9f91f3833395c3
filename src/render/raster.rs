//! SVG to PNG rasterization through usvg/resvg.

use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::{PixelImage, decode::encode_png},
    config::{FontConfig, InfoGraphicConfig},
    foundation::error::{CardError, CardResult},
    lookup::{ColorLookup, StringProvider},
    model::{CreatureData, ServerSettings, SpeciesInfo},
    render::card::render_infographic_svg,
};

/// Renders SVG documents to PNG with a fixed font set.
///
/// Fonts are loaded once at construction; rendering only reads the database, so one instance can
/// be shared across threads.
#[derive(Clone)]
pub struct Rasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
    default_family: Option<String>,
    resources_dir: Option<PathBuf>,
}

impl Rasterizer {
    /// Rasterizer using only the given font files. The first font's name is the fallback family.
    pub fn new(fonts: &[FontConfig]) -> Self {
        let mut db = usvg::fontdb::Database::new();
        for font in fonts {
            db.load_font_data(font.data.clone());
        }
        tracing::debug!(fonts = fonts.len(), faces = db.len(), "loaded fonts");
        Self {
            fontdb: Arc::new(db),
            default_family: fonts.first().map(|f| f.name.clone()),
            resources_dir: None,
        }
    }

    /// Rasterizer using the fonts installed on the system.
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts");
        Self {
            fontdb: Arc::new(db),
            default_family: Some(InfoGraphicConfig::FALLBACK_FONT.to_string()),
            resources_dir: None,
        }
    }

    /// Directory relative image hrefs are resolved against.
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dir = Some(dir.into());
        self
    }

    fn options(&self) -> usvg::Options<'_> {
        let mut opts = usvg::Options {
            resources_dir: self.resources_dir.clone(),
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        if let Some(family) = &self.default_family {
            opts.font_family = family.clone();
        }
        opts
    }

    /// Rasterize `svg` at its own size into straight-alpha RGBA.
    pub fn render_pixels(&self, svg: &str) -> CardResult<PixelImage> {
        let tree = usvg::Tree::from_str(svg, &self.options())
            .map_err(|e| CardError::render(format!("parse svg: {e}")))?;

        let size = tree.size().to_int_size();
        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| {
                CardError::render(format!(
                    "failed to allocate {}x{} pixmap",
                    size.width(),
                    size.height()
                ))
            })?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );

        let mut data = Vec::with_capacity(pixmap.data().len());
        for px in pixmap.pixels() {
            let c = px.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        PixelImage::new(size.width(), size.height(), 4, data)
    }

    /// Rasterize `svg` and encode it as PNG.
    #[tracing::instrument(skip_all, fields(bytes = svg.len()))]
    pub fn render_png(&self, svg: &str) -> CardResult<Vec<u8>> {
        let image = self.render_pixels(svg)?;
        encode_png(&image).map_err(|e| CardError::render(format!("encode png: {e}")))
    }

    /// Compose the creature card and rasterize it to PNG.
    #[allow(clippy::too_many_arguments)]
    pub fn render_infographic_png(
        &self,
        creature: &CreatureData,
        species: &SpeciesInfo,
        server: &ServerSettings,
        config: &InfoGraphicConfig,
        colors: &dyn ColorLookup,
        strings: &dyn StringProvider,
        creature_image_href: Option<&str>,
    ) -> CardResult<Vec<u8>> {
        let svg = render_infographic_svg(
            creature,
            species,
            server,
            config,
            colors,
            strings,
            creature_image_href,
        )?;
        self.render_png(&svg)
    }
}
