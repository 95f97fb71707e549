//! SVG rasterization via usvg/resvg onto a tiny-skia pixmap.

use std::sync::Arc;

use plot_common::{PlotError, PlotResult};
use tiny_skia::{IntRect, Pixmap, Transform};
use usvg::fontdb;

use crate::figure::SvgDocument;

/// Largest raster we agree to allocate (1 GiB of RGBA).
const MAX_PIXELS: u64 = 1 << 28;

/// Shared, read-only resources for rasterizing figures.
///
/// Cloning is cheap; the font database sits behind an `Arc` and is never
/// mutated after construction, so one context can serve concurrent renders.
#[derive(Clone)]
pub struct DrawingContext {
    fontdb: Arc<fontdb::Database>,
}

impl DrawingContext {
    /// Context with every font installed on the host.
    pub fn new() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        tracing::info!(faces = db.len(), "Loaded system fonts");
        Self::with_fonts(db)
    }

    /// Context over an explicit font database.
    pub fn with_fonts(db: fontdb::Database) -> Self {
        Self { fontdb: Arc::new(db) }
    }

    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `document` at `pixels_per_point` onto a white pixmap.
    pub fn rasterize(&self, document: &SvgDocument, pixels_per_point: f64) -> PlotResult<Pixmap> {
        let (width, height) = raster_size(document, pixels_per_point)?;

        let options = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&document.markup, &options)
            .map_err(|e| PlotError::RenderError(format!("SVG parse failed: {}", e)))?;

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            PlotError::RenderError(format!("cannot allocate a {}x{} raster", width, height))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let size = tree.size();
        let transform = Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        tracing::debug!(width, height, "Rasterized figure");
        Ok(pixmap)
    }
}

impl Default for DrawingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DrawingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingContext")
            .field("font_faces", &self.fontdb.len())
            .finish()
    }
}

/// Pixel dimensions for a document, rejecting rasters we cannot hold.
pub fn raster_size(document: &SvgDocument, pixels_per_point: f64) -> PlotResult<(u32, u32)> {
    let width = (document.width_pt * pixels_per_point).round().max(1.0);
    let height = (document.height_pt * pixels_per_point).round().max(1.0);
    if !width.is_finite() || !height.is_finite() || width * height > MAX_PIXELS as f64 {
        return Err(PlotError::RenderError(format!(
            "raster of {}x{} pixels is too large",
            width, height
        )));
    }
    Ok((width as u32, height as u32))
}

/// Straight-alpha RGB bytes, dropping the alpha channel.
///
/// Pixmaps produced by [`DrawingContext::rasterize`] are opaque, so this
/// loses nothing.
pub fn to_rgb(pixmap: &Pixmap) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgb.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }
    rgb
}

/// Bounding box of the non-white pixels grown by `pad` on every side and
/// clamped to the pixmap; `None` when the pixmap is all white.
pub fn content_bounds(pixmap: &Pixmap, pad: u32) -> Option<IntRect> {
    let width = pixmap.width();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let c = pixel.demultiply();
        if c.red() == 255 && c.green() == 255 && c.blue() == 255 {
            continue;
        }
        let (x, y) = (i as u32 % width, i as u32 / width);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
        });
    }

    let (left, top, right, bottom) = bounds?;
    let left = left.saturating_sub(pad);
    let top = top.saturating_sub(pad);
    let right = right.saturating_add(pad).min(width - 1);
    let bottom = bottom.saturating_add(pad).min(pixmap.height() - 1);
    IntRect::from_xywh(left as i32, top as i32, right - left + 1, bottom - top + 1)
}

/// Crop `pixmap` to [`content_bounds`]; an all-white pixmap comes back whole.
pub fn crop_to_content(pixmap: &Pixmap, pad: u32) -> Pixmap {
    content_bounds(pixmap, pad)
        .and_then(|rect| pixmap.clone_rect(rect))
        .unwrap_or_else(|| pixmap.clone())
}
