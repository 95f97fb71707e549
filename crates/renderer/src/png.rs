//! PNG encoding for opaque RGB chart rasters.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: used when the raster has ≤256 unique
//!   colors, which flat charts without much antialiasing often do.
//! - **RGB PNG (color type 2)**: fallback for everything else.
//!
//! Both carry a `pHYs` chunk so viewers know the intended resolution.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

use plot_common::{PlotError, PlotResult};

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096;

const METERS_PER_INCH: f64 = 0.0254;

/// Encode RGB pixels (3 bytes per pixel), picking indexed color when the
/// palette fits.
pub fn encode_png(rgb: &[u8], width: u32, height: u32, dpi: u32) -> PlotResult<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if rgb.len() != expected {
        return Err(PlotError::EncodeError(format!(
            "expected {} RGB bytes for {}x{}, got {}",
            expected,
            width,
            height,
            rgb.len()
        )));
    }

    match extract_palette(rgb) {
        Some((palette, indices)) => write_png(width, height, dpi, ColorMode::Indexed(&palette), &indices, 1),
        None => write_png(width, height, dpi, ColorMode::Rgb, rgb, 3),
    }
}

enum ColorMode<'a> {
    Rgb,
    Indexed(&'a [[u8; 3]]),
}

fn write_png(
    width: u32,
    height: u32,
    dpi: u32,
    mode: ColorMode<'_>,
    samples: &[u8],
    bytes_per_pixel: usize,
) -> PlotResult<Vec<u8>> {
    let mut png = Vec::with_capacity(samples.len() / 4 + 128);
    png.extend_from_slice(&PNG_SIGNATURE);

    let color_type = match mode {
        ColorMode::Rgb => 2,
        ColorMode::Indexed(_) => 3,
    };
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);
    write_chunk(&mut png, b"IHDR", &ihdr);

    let ppm = (dpi as f64 / METERS_PER_INCH).round() as u32;
    let mut phys = Vec::with_capacity(9);
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.push(1); // unit: meter
    write_chunk(&mut png, b"pHYs", &phys);

    if let ColorMode::Indexed(palette) = mode {
        let plte: Vec<u8> = palette.iter().flatten().copied().collect();
        write_chunk(&mut png, b"PLTE", &plte);
    }

    let idat = deflate_scanlines(samples, width as usize * bytes_per_pixel, height as usize)
        .map_err(|e| PlotError::EncodeError(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type and data.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix each row with filter type 0 and zlib-compress.
fn deflate_scanlines(samples: &[u8], stride: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(height * (stride + 1));
    for row in samples.chunks_exact(stride).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&raw)?;
    encoder.finish()
}

#[inline(always)]
fn pack(pixel: &[u8]) -> u32 {
    (pixel[0] as u32) << 16 | (pixel[1] as u32) << 8 | pixel[2] as u32
}

/// Palette and per-pixel indices, or `None` past 256 colors.
///
/// Palette order follows first appearance in the image so output is
/// deterministic regardless of how the parallel scan is split.
fn extract_palette(rgb: &[u8]) -> Option<(Vec<[u8; 3]>, Vec<u8>)> {
    let pixels = rgb.len() / 3;
    if pixels >= PARALLEL_THRESHOLD {
        let chunk = (pixels / rayon::current_num_threads()).max(256) * 3;
        let too_many = rgb.par_chunks(chunk).any(|part| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE + 1);
            for pixel in part.chunks_exact(3) {
                local.insert(pack(pixel), ());
                if local.len() > MAX_PALETTE_SIZE {
                    return true;
                }
            }
            false
        });
        if too_many {
            return None;
        }
    }

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 3]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices = Vec::with_capacity(pixels);
    for pixel in rgb.chunks_exact(3) {
        let key = pack(pixel);
        let index = match lookup.get(&key) {
            Some(&i) => i,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let i = palette.len() as u8;
                palette.push([pixel[0], pixel[1], pixel[2]]);
                lookup.insert(key, i);
                i
            }
        };
        indices.push(index);
    }
    Some((palette, indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_simple() {
        let rgb = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 0, 0];
        let (palette, indices) = extract_palette(&rgb).unwrap();
        assert_eq!(palette.len(), 3);
        assert_eq!(indices, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_too_many_colors_falls_back() {
        let rgb: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 7])
            .collect();
        assert!(extract_palette(&rgb).is_none());
    }

    #[test]
    fn test_phys_chunk_records_dpi() {
        let png = encode_png(&[255; 2 * 2 * 3], 2, 2, 254).unwrap();
        let pos = png.windows(4).position(|w| w == b"pHYs").unwrap();
        let ppm = u32::from_be_bytes([png[pos + 4], png[pos + 5], png[pos + 6], png[pos + 7]]);
        assert_eq!(ppm, 10_000);
    }

    #[test]
    fn test_length_mismatch_is_error() {
        assert!(encode_png(&[0; 5], 2, 2, 72).is_err());
    }
}
