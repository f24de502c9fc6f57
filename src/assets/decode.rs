use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_raster_size};
use crate::foundation::error::{ReelError, ReelResult};
use crate::raster::buffer::RasterBuffer;

/// Resolves a resource id to decoded pixels.
///
/// Implementations report [`ReelError::ImageNotFound`] when the id does not resolve and
/// [`ReelError::ImageUnreadable`] when it resolves to bytes that cannot be decoded.
pub trait ImageDecoder {
    /// Decode the resource into a premultiplied RGBA8 buffer.
    fn decode(&self, resource: &str) -> ReelResult<RasterBuffer>;
}

/// Decodes images from files under a root directory.
///
/// Raster formats go through `image`; `.svg` files are rasterized at their intrinsic size.
#[derive(Clone, Debug)]
pub struct FsImageDecoder {
    root: PathBuf,
}

impl FsImageDecoder {
    /// Resolve relative resource ids against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory for relative resource ids.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, resource: &str) -> PathBuf {
        let p = Path::new(resource);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

impl ImageDecoder for FsImageDecoder {
    fn decode(&self, resource: &str) -> ReelResult<RasterBuffer> {
        let path = self.resolve(resource);
        let bytes = std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReelError::ImageNotFound {
                resource: path.display().to_string(),
            },
            _ => ReelError::ImageUnreadable {
                resource: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        let resource = path.display().to_string();
        if is_svg {
            decode_svg_bytes(&resource, &bytes)
        } else {
            decode_image_bytes(&resource, &bytes)
        }
    }
}

/// Decoder over buffers registered in memory, keyed by resource id.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageDecoder {
    images: BTreeMap<String, RasterBuffer>,
}

impl MemoryImageDecoder {
    /// Empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `resource`, replacing any previous entry.
    pub fn insert(&mut self, resource: impl Into<String>, image: RasterBuffer) {
        self.images.insert(resource.into(), image);
    }

    /// Builder-style [`MemoryImageDecoder::insert`].
    pub fn with(mut self, resource: impl Into<String>, image: RasterBuffer) -> Self {
        self.insert(resource, image);
        self
    }
}

impl ImageDecoder for MemoryImageDecoder {
    fn decode(&self, resource: &str) -> ReelResult<RasterBuffer> {
        self.images
            .get(resource)
            .cloned()
            .ok_or_else(|| ReelError::ImageNotFound {
                resource: resource.to_string(),
            })
    }
}

/// Decode encoded raster bytes (PNG, JPEG, ...) into a premultiplied buffer.
pub fn decode_image_bytes(resource: &str, bytes: &[u8]) -> ReelResult<RasterBuffer> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| ReelError::ImageUnreadable {
        resource: resource.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ReelError::ImageUnreadable {
            resource: resource.to_string(),
            reason: "image has zero width or height".to_string(),
        });
    }
    RasterBuffer::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Parse and rasterize SVG bytes at the document's intrinsic size.
pub fn decode_svg_bytes(resource: &str, bytes: &[u8]) -> ReelResult<RasterBuffer> {
    let unreadable = |reason: String| ReelError::ImageUnreadable {
        resource: resource.to_string(),
        reason,
    };
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).map_err(|e| unreadable(e.to_string()))?;
    let (w, h) = svg_raster_size(&tree).map_err(|e| unreadable(e.to_string()))?;
    let data = rasterize_svg_to_premul_rgba8(&tree, w, h)?;
    RasterBuffer::from_premul_rgba8(w, h, data)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
