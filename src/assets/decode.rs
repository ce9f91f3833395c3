use std::io::Cursor;

use anyhow::Context;

use crate::{
    assets::PixelImage,
    foundation::error::{CardError, CardResult},
};

/// Decode PNG (or any format the `image` crate sniffs) into 3- or 4-channel straight pixels.
///
/// Images without an alpha channel decode to RGB, everything else to RGBA.
pub fn decode_image(bytes: &[u8]) -> CardResult<PixelImage> {
    let dyn_img =
        image::load_from_memory(bytes).map_err(|e| CardError::decode(format!("{e}")))?;
    let (width, height) = (dyn_img.width(), dyn_img.height());

    if dyn_img.color().has_alpha() {
        PixelImage::new(width, height, 4, dyn_img.to_rgba8().into_raw())
    } else {
        PixelImage::new(width, height, 3, dyn_img.to_rgb8().into_raw())
    }
}

/// Encode pixels as PNG, keeping the channel count.
pub fn encode_png(img: &PixelImage) -> CardResult<Vec<u8>> {
    let dyn_img = match img.channels {
        3 => image::RgbImage::from_raw(img.width, img.height, img.data.clone())
            .map(image::DynamicImage::ImageRgb8),
        4 => image::RgbaImage::from_raw(img.width, img.height, img.data.clone())
            .map(image::DynamicImage::ImageRgba8),
        _ => None,
    }
    .ok_or_else(|| CardError::validation("pixel buffer does not match its dimensions"))?;

    let mut buf = Vec::new();
    dyn_img
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_png_keeps_alpha_channel() {
        let img = PixelImage::new(2, 1, 4, vec![100, 50, 200, 128, 1, 2, 3, 0]).unwrap();
        let png = encode_png(&img).unwrap();
        let back = decode_image(&png).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn rgb_png_decodes_to_three_channels() {
        let img = PixelImage::new(1, 2, 3, vec![9, 8, 7, 6, 5, 4]).unwrap();
        let back = decode_image(&encode_png(&img).unwrap()).unwrap();
        assert_eq!(back.channels, 3);
        assert_eq!(back.data, vec![9, 8, 7, 6, 5, 4]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_image(b"not an image").unwrap_err();
        assert!(matches!(err, CardError::Decode(_)));
    }
}
