use image::imageops::{self, FilterType};

use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::buffer::RasterBuffer;

/// How a source image is normalized to the tile size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Resize to exactly the target size, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Center-crop to the target aspect ratio, then scale to the target size.
    Cover,
}

/// Centered source-space window with the target's aspect ratio, for [`FitMode::Cover`].
///
/// Cropping happens before scaling, so the resize never works on more pixels than the source has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverGeometry {
    /// Left edge of the window in the source.
    pub crop_x: u32,
    /// Top edge of the window in the source.
    pub crop_y: u32,
    /// Window width, at most the source width.
    pub crop_width: u32,
    /// Window height, at most the source height.
    pub crop_height: u32,
}

/// Compute the centered crop of a `src` image that, scaled uniformly, fills a `target` box.
///
/// The source axis that is relatively too long is trimmed; the other is kept whole. The trimmed
/// length is rounded to the nearest pixel and is never zero.
pub fn cover_geometry(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    target_height: u32,
) -> CoverGeometry {
    let (sw, sh) = (u64::from(src_width), u64::from(src_height));
    let (tw, th) = (u64::from(target_width), u64::from(target_height));

    // Compare aspect ratios without floats: sw/sh > tw/th.
    let (cw, ch) = if sw * th > tw * sh {
        (((sh * tw + th / 2) / th).clamp(1, sw), sh)
    } else {
        (sw, ((sw * th + tw / 2) / tw).clamp(1, sh))
    };

    CoverGeometry {
        crop_x: ((sw - cw) / 2) as u32,
        crop_y: ((sh - ch) / 2) as u32,
        crop_width: cw as u32,
        crop_height: ch as u32,
    }
}

/// Normalize `source` to exactly `target_width × target_height`.
pub fn preprocess(
    source: &RasterBuffer,
    target_width: u32,
    target_height: u32,
    mode: FitMode,
) -> ReelResult<RasterBuffer> {
    if target_width == 0 || target_height == 0 {
        return Err(ReelError::validation("tile width/height must be non-zero"));
    }
    if source.width() == 0 || source.height() == 0 {
        return Err(ReelError::validation("source image has zero width or height"));
    }
    if source.width() == target_width && source.height() == target_height {
        return Ok(source.clone());
    }

    let img = source.to_rgba_image()?;
    let out = match mode {
        FitMode::Stretch => {
            imageops::resize(&img, target_width, target_height, FilterType::Triangle)
        }
        FitMode::Cover => {
            let g = cover_geometry(source.width(), source.height(), target_width, target_height);
            let window = imageops::crop_imm(&img, g.crop_x, g.crop_y, g.crop_width, g.crop_height)
                .to_image();
            if window.dimensions() == (target_width, target_height) {
                window
            } else {
                imageops::resize(&window, target_width, target_height, FilterType::Lanczos3)
            }
        }
    };

    Ok(RasterBuffer::from_rgba_image(out))
}

#[cfg(test)]
#[path = "../../tests/unit/tile/preprocess.rs"]
mod tests;
