use crate::foundation::color::Rgb8;
use crate::foundation::core::Size;
use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::composite::{
    flatten_premul_over_bg_in_place, over_in_place, premultiply_rgba8_in_place,
};

/// A rectangular premultiplied RGBA8 pixel grid.
///
/// Tiles, caption bands, backgrounds and output frames are all `RasterBuffer`s. Pixels are
/// tightly packed, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for RasterBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize) * (height as usize) * 4
}

impl RasterBuffer {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height)],
        }
    }

    /// Opaque buffer filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let px = color.to_rgba8();
        let mut data = Vec::with_capacity(byte_len(width, height));
        for _ in 0..(width as usize) * (height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap premultiplied RGBA8 bytes.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> ReelResult<Self> {
        if data.len() != byte_len(width, height) {
            return Err(ReelError::validation(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> ReelResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// `true` when every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// New buffer with `rows` rows of `color` appended below this one.
    pub fn extend_below(&self, rows: u32, color: Rgb8) -> Self {
        let band = Self::filled(self.width, rows, color);
        let mut data = Vec::with_capacity(self.data.len() + band.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&band.data);
        Self {
            width: self.width,
            height: self.height + rows,
            data,
        }
    }

    /// Fill a rectangle with an opaque color, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb8) {
        let Some(clip) = self.clip(x, y, width, height) else {
            return;
        };
        let px = color.to_rgba8();
        let stride = self.width as usize * 4;
        for row in clip.dst_y0..clip.dst_y0 + clip.rows {
            let start = row * stride + clip.dst_x0 * 4;
            for d in self.data[start..start + clip.cols * 4].chunks_exact_mut(4) {
                d.copy_from_slice(&px);
            }
        }
    }

    /// Composite `src` over this buffer with its top-left corner at `(x, y)`.
    ///
    /// Parts of `src` falling outside this buffer are clipped.
    pub fn composite_over(&mut self, src: &RasterBuffer, x: i64, y: i64) -> ReelResult<()> {
        let Some(clip) = self.clip(x, y, src.width, src.height) else {
            return Ok(());
        };
        let dst_stride = self.width as usize * 4;
        let src_stride = src.width as usize * 4;
        for r in 0..clip.rows {
            let d = (clip.dst_y0 + r) * dst_stride + clip.dst_x0 * 4;
            let s = (clip.src_y0 + r) * src_stride + clip.src_x0 * 4;
            over_in_place(
                &mut self.data[d..d + clip.cols * 4],
                &src.data[s..s + clip.cols * 4],
            )?;
        }
        Ok(())
    }

    /// Flatten any translucent pixels over an opaque background color.
    pub fn flatten_over(&mut self, bg: Rgb8) {
        flatten_premul_over_bg_in_place(&mut self.data, [bg.r, bg.g, bg.b]);
    }

    /// Write the color channels as packed RGB24 into `dst`.
    ///
    /// Translucent pixels come out as if flattened over black.
    pub fn write_rgb24(&self, dst: &mut [u8]) -> ReelResult<()> {
        let expected = (self.width as usize) * (self.height as usize) * 3;
        if dst.len() != expected {
            return Err(ReelError::validation(format!(
                "rgb24 buffer length {} does not match {}x{}",
                dst.len(),
                self.width,
                self.height
            )));
        }
        for (d, s) in dst.chunks_exact_mut(3).zip(self.data.chunks_exact(4)) {
            d.copy_from_slice(&s[..3]);
        }
        Ok(())
    }

    /// Compare the pixels of a rectangle in both buffers.
    ///
    /// Returns `false` when the rectangle does not fit inside either buffer.
    pub fn region_eq(&self, other: &RasterBuffer, x: u32, y: u32, width: u32, height: u32) -> bool {
        let fits = |b: &RasterBuffer| {
            x.checked_add(width).is_some_and(|r| r <= b.width)
                && y.checked_add(height).is_some_and(|r| r <= b.height)
        };
        if !fits(self) || !fits(other) {
            return false;
        }
        let (xs, ws) = (x as usize * 4, width as usize * 4);
        (y..y + height).all(|row| {
            let a = row as usize * self.width as usize * 4 + xs;
            let b = row as usize * other.width as usize * 4 + xs;
            self.data[a..a + ws] == other.data[b..b + ws]
        })
    }

    pub(crate) fn to_rgba_image(&self) -> ReelResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ReelError::validation("raster buffer length does not match its size"))
    }

    pub(crate) fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    fn clip(&self, x: i64, y: i64, width: u32, height: u32) -> Option<Clip> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(i64::from(self.width));
        let y1 = (y + i64::from(height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Clip {
            dst_x0: x0 as usize,
            dst_y0: y0 as usize,
            src_x0: (x0 - x) as usize,
            src_y0: (y0 - y) as usize,
            cols: (x1 - x0) as usize,
            rows: (y1 - y0) as usize,
        })
    }
}

struct Clip {
    dst_x0: usize,
    dst_y0: usize,
    src_x0: usize,
    src_y0: usize,
    cols: usize,
    rows: usize,
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
