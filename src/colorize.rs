//! Region-based sprite recoloring.
//!
//! A creature sprite comes with a mask whose RGB channels encode up to six color regions. Each
//! region with an assigned color is grain-merged into the sprite, weighted by the region's
//! opacity at that pixel, one region after another.

use std::borrow::Cow;

use crate::{
    assets::{
        PixelImage,
        decode::{decode_image, encode_png},
    },
    foundation::error::CardResult,
    stats::COLOR_REGION_COUNT,
};

/// sRGB color as `[r, g, b]`.
pub type SrgbColor = [u8; 3];

/// The six mask regions, in compositing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskRegion {
    /// Red dominates green and blue.
    Red,
    /// Green dominates red and blue.
    Green,
    /// Blue dominates red and green.
    Blue,
    /// Green and blue both high.
    Cyan,
    /// Red and green both high.
    Yellow,
    /// Red and blue both high.
    Magenta,
}

impl MaskRegion {
    pub const ALL: [Self; COLOR_REGION_COUNT] = [
        Self::Red,
        Self::Green,
        Self::Blue,
        Self::Cyan,
        Self::Yellow,
        Self::Magenta,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Region weight in `0..=1` for a mask pixel.
    pub fn opacity(self, [r, g, b]: [u8; 3]) -> f64 {
        let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
        let v = match self {
            Self::Red => (r - g - b).max(0),
            Self::Green => (g - r - b).max(0),
            Self::Blue => (b - r - g).max(0),
            Self::Cyan => g.min(b),
            Self::Yellow => r.min(g),
            Self::Magenta => r.min(b),
        };
        f64::from(v) / 255.0
    }
}

/// Recolor `base` using `mask` and one optional color per region.
///
/// The output has the dimensions and channel count of `base`. Fully transparent pixels and the
/// alpha channel are left untouched.
#[tracing::instrument(skip_all, fields(width = base.width, height = base.height))]
pub fn colorize(
    base: &PixelImage,
    mask: &PixelImage,
    region_colors: &[Option<SrgbColor>; COLOR_REGION_COUNT],
) -> PixelImage {
    let active: Vec<(MaskRegion, SrgbColor)> = MaskRegion::ALL
        .into_iter()
        .filter_map(|region| region_colors[region.index()].map(|c| (region, c)))
        .collect();

    if active.is_empty() {
        tracing::debug!("no region colors, returning base unchanged");
        return base.clone();
    }

    let mask = fit_mask(mask, base.width, base.height);
    let base_ch = usize::from(base.channels);
    let mask_ch = usize::from(mask.channels);

    let mut out = base.clone();
    for (px, m) in out
        .data
        .chunks_exact_mut(base_ch)
        .zip(mask.data.chunks_exact(mask_ch))
    {
        if base.has_alpha() && px[3] == 0 {
            continue;
        }

        let mask_rgb = [m[0], m[1], m[2]];
        let mut rgb = [px[0], px[1], px[2]];
        for &(region, color) in &active {
            let opacity = region.opacity(mask_rgb);
            if opacity <= 0.0 {
                continue;
            }
            for (c, tint) in rgb.iter_mut().zip(color) {
                *c = grain_merge(*c, tint, opacity);
            }
        }
        px[..3].copy_from_slice(&rgb);
    }

    out
}

/// Grain-merge `tint` onto `current`, then lerp by `opacity`, truncating.
fn grain_merge(current: u8, tint: u8, opacity: f64) -> u8 {
    let cur = f64::from(current);
    let mix = (i32::from(current) + i32::from(tint) - 128).clamp(0, 255);
    (opacity * f64::from(mix) + (1.0 - opacity) * cur).trunc() as u8
}

fn fit_mask(mask: &PixelImage, width: u32, height: u32) -> Cow<'_, PixelImage> {
    if mask.width == width && mask.height == height {
        return Cow::Borrowed(mask);
    }
    tracing::debug!(
        from_w = mask.width,
        from_h = mask.height,
        to_w = width,
        to_h = height,
        "resampling mask"
    );
    Cow::Owned(resample_mask(mask, width, height))
}

/// Nearest-neighbor resize to `width`×`height`, dropping alpha. Always 3 channels.
pub fn resample_mask(mask: &PixelImage, width: u32, height: u32) -> PixelImage {
    let mut data = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for y in 0..height {
        let src_y = ((u64::from(y) * u64::from(mask.height)) / u64::from(height)) as u32;
        for x in 0..width {
            let src_x = ((u64::from(x) * u64::from(mask.width)) / u64::from(width)) as u32;
            data.extend_from_slice(&mask.pixel(src_x, src_y)[..3]);
        }
    }
    PixelImage {
        width,
        height,
        channels: 3,
        data,
    }
}

/// Decode two PNGs, colorize, and re-encode.
///
/// With no region color set the original `base_png` bytes are returned as-is.
pub fn colorize_png(
    base_png: &[u8],
    mask_png: &[u8],
    region_colors: &[Option<SrgbColor>; COLOR_REGION_COUNT],
) -> CardResult<Vec<u8>> {
    if region_colors.iter().all(Option::is_none) {
        return Ok(base_png.to_vec());
    }
    let base = decode_image(base_png)?;
    let mask = decode_image(mask_png)?;
    encode_png(&colorize(&base, &mask, region_colors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, px: &[u8]) -> PixelImage {
        let data = px.repeat((width * height) as usize);
        PixelImage::new(width, height, px.len() as u8, data).unwrap()
    }

    #[test]
    fn region_opacities_follow_channel_tests() {
        assert_eq!(MaskRegion::Red.opacity([255, 0, 0]), 1.0);
        assert_eq!(MaskRegion::Red.opacity([100, 60, 60]), 0.0);
        assert_eq!(MaskRegion::Green.opacity([0, 51, 0]), 0.2);
        assert_eq!(MaskRegion::Blue.opacity([10, 10, 255]), 235.0 / 255.0);
        assert_eq!(MaskRegion::Cyan.opacity([0, 255, 102]), 0.4);
        assert_eq!(MaskRegion::Yellow.opacity([255, 255, 0]), 1.0);
        assert_eq!(MaskRegion::Magenta.opacity([51, 0, 255]), 0.2);
    }

    #[test]
    fn no_colors_is_identity() {
        let base = PixelImage::new(2, 1, 4, vec![1, 2, 3, 4, 250, 251, 252, 253]).unwrap();
        let mask = solid(2, 1, &[255, 0, 0]);
        assert_eq!(colorize(&base, &mask, &[None; 6]), base);
    }

    #[test]
    fn full_opacity_grain_merge_is_clamped_sum() {
        let base = solid(1, 1, &[100, 200, 10]);
        let mask = solid(1, 1, &[255, 0, 0]);
        let mut colors = [None; 6];
        colors[0] = Some([228, 228, 0]);
        let out = colorize(&base, &mask, &colors);
        // 100+228-128, 200+228-128 clamped, 10+0-128 clamped
        assert_eq!(out.data, vec![200, 255, 0]);
    }

    #[test]
    fn partial_opacity_truncates() {
        let base = solid(1, 1, &[100, 100, 100]);
        // min(G, B) = 128 -> opacity 128/255
        let mask = solid(1, 1, &[0, 128, 128]);
        let mut colors = [None; 6];
        colors[3] = Some([255, 0, 129]);
        let out = colorize(&base, &mask, &colors);

        let op = 128.0 / 255.0;
        let expect = |mix: f64| (op * mix + (1.0 - op) * 100.0).trunc() as u8;
        assert_eq!(out.data, vec![expect(227.0), expect(0.0), expect(101.0)]);
    }

    #[test]
    fn regions_compose_sequentially() {
        let base = solid(1, 1, &[100, 100, 100]);
        // white mask: cyan, yellow and magenta are all fully on
        let mask = solid(1, 1, &[255, 255, 255]);
        let mut colors = [None; 6];
        colors[3] = Some([138, 128, 128]);
        colors[4] = Some([138, 128, 128]);
        let out = colorize(&base, &mask, &colors);
        assert_eq!(out.data, vec![120, 100, 100]);
    }

    #[test]
    fn transparent_pixels_are_untouched() {
        let base = PixelImage::new(2, 1, 4, vec![10, 20, 30, 0, 10, 20, 30, 255]).unwrap();
        let mask = solid(2, 1, &[255, 0, 0]);
        let mut colors = [None; 6];
        colors[0] = Some([255, 255, 255]);
        let out = colorize(&base, &mask, &colors);
        assert_eq!(&out.data[..4], &[10, 20, 30, 0]);
        assert_eq!(&out.data[4..], &[137, 147, 157, 255]);
    }

    #[test]
    fn resample_uses_floor_mapping() {
        let mask = PixelImage::new(
            2,
            2,
            4,
            vec![
                1, 1, 1, 9, 2, 2, 2, 9, //
                3, 3, 3, 9, 4, 4, 4, 9,
            ],
        )
        .unwrap();
        let out = resample_mask(&mask, 4, 4);
        assert_eq!(out.channels, 3);
        assert_eq!(out.pixel(2, 2), &[4, 4, 4]);
        assert_eq!(out.pixel(1, 1), &[1, 1, 1]);
        assert_eq!(out.pixel(3, 0), &[2, 2, 2]);
        assert_eq!(out.pixel(0, 3), &[3, 3, 3]);
    }

    #[test]
    fn smaller_mask_colors_matching_quadrant() {
        let base = solid(4, 4, &[100, 100, 100]);
        let mask = PixelImage::new(
            2,
            2,
            3,
            vec![
                0, 0, 0, 0, 0, 0, //
                0, 0, 0, 255, 0, 0,
            ],
        )
        .unwrap();
        let mut colors = [None; 6];
        colors[0] = Some([160, 128, 128]);
        let out = colorize(&base, &mask, &colors);
        assert_eq!(out.pixel(2, 2), &[132, 100, 100]);
        assert_eq!(out.pixel(3, 3), &[132, 100, 100]);
        assert_eq!(out.pixel(1, 1), &[100, 100, 100]);
        assert_eq!(out.pixel(2, 1), &[100, 100, 100]);
    }
}
