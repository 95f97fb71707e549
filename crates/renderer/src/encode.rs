//! Figure serialization to the requested output format.

use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use plot_common::{OutputFormat, PlotError, PlotResult};

use crate::figure::Figure;
use crate::png::encode_png;
use crate::pdf::encode_pdf;
use crate::raster::{content_bounds, crop_to_content, to_rgb, DrawingContext};

/// JPEG quality used for `jpg` output.
pub const JPEG_QUALITY: u8 = 90;

/// White border kept around the content after trimming, in points.
pub const TRIM_PAD_PT: f64 = 7.2;

/// Encoded image bytes plus the format they are in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

impl Artifact {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Serialize `figure`.
///
/// Every format is trimmed to its content plus [`TRIM_PAD_PT`]. SVG keeps
/// its vector markup behind a cropped `viewBox`; a PDF page takes the
/// trimmed raster size.
///
/// The figure is consumed, so its markup and any raster are released when
/// this returns, whether encoding succeeded or not.
pub fn encode(
    figure: Figure,
    format: OutputFormat,
    dpi: u32,
    ctx: &DrawingContext,
) -> PlotResult<Artifact> {
    let document = figure.into_document();

    let bytes = match format {
        OutputFormat::Svg => {
            let full = ctx.rasterize(&document, 1.0)?;
            let bounds = content_bounds(&full, TRIM_PAD_PT.round() as u32);
            drop(full);
            let trimmed = match bounds {
                Some(rect) => document.with_view_box(
                    rect.x() as u32,
                    rect.y() as u32,
                    rect.width(),
                    rect.height(),
                ),
                None => document,
            };
            trimmed.markup.into_bytes()
        }
        OutputFormat::Png | OutputFormat::Jpg | OutputFormat::Pdf => {
            let pixels_per_point = dpi as f64 / plot_common::POINTS_PER_INCH;
            let full = ctx.rasterize(&document, pixels_per_point)?;
            let pixmap = crop_to_content(&full, (TRIM_PAD_PT * pixels_per_point).round() as u32);
            drop(full);
            let (width, height) = (pixmap.width(), pixmap.height());
            let rgb = to_rgb(&pixmap);
            drop(pixmap);

            match format {
                OutputFormat::Png => encode_png(&rgb, width, height, dpi)?,
                OutputFormat::Jpg => encode_jpeg(&rgb, width, height, dpi)?,
                _ => encode_pdf(
                    &rgb,
                    width,
                    height,
                    width as f64 / pixels_per_point,
                    height as f64 / pixels_per_point,
                )?,
            }
        }
    };

    tracing::debug!(format = %format, bytes = bytes.len(), "Encoded figure");
    Ok(Artifact { bytes, format })
}

fn encode_jpeg(rgb: &[u8], width: u32, height: u32, dpi: u32) -> PlotResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    let density = u16::try_from(dpi).unwrap_or(u16::MAX);
    encoder.set_pixel_density(PixelDensity::dpi(density));
    encoder
        .encode(rgb, width, height, image::ColorType::Rgb8)
        .map_err(|e| PlotError::EncodeError(format!("JPEG encoding failed: {}", e)))?;
    Ok(out)
}
