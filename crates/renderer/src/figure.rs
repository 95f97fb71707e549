//! A single chart drawn with plotters into an in-memory SVG document.

use std::fmt::Display;

use plot_common::{FigureSize, PlotError, PlotResult};
use plotters::coord::Shift;
use plotters::prelude::*;

/// Root drawing area of a figure.
pub type Root<'b> = DrawingArea<SVGBackend<'b>, Shift>;

pub const FONT_FAMILY: &str = "sans-serif";

/// Title size in backend units; the SVG backend writes it as 12pt.
pub const TITLE_FONT: f64 = 14.88;

/// Blank border kept inside the page before anything is drawn.
const PAGE_MARGIN: u32 = 6;

/// Maps plotters drawing failures onto [`PlotError::RenderError`].
pub trait RenderResultExt<T> {
    fn or_render_error(self) -> PlotResult<T>;
}

impl<T, E: Display> RenderResultExt<T> for Result<T, E> {
    fn or_render_error(self) -> PlotResult<T> {
        self.map_err(|e| PlotError::RenderError(format!("drawing failed: {}", e)))
    }
}

/// SVG markup plus the page size it was drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    pub markup: String,
    pub width_pt: f64,
    pub height_pt: f64,
}

impl SvgDocument {
    /// The same drawing shown through the `width` by `height` window at
    /// `(x, y)`, sized in points.
    ///
    /// Markup that does not start with the page header written by
    /// [`Figure::draw`] is returned unchanged.
    pub fn with_view_box(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let (page_w, page_h) = (self.width_pt as u32, self.height_pt as u32);
        let header = format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\"",
            page_w, page_h, page_w, page_h
        );
        let Some(body) = self.markup.strip_prefix(&header) else {
            tracing::warn!("Unexpected SVG header, leaving document untrimmed");
            return self;
        };
        let markup = format!(
            "<svg width=\"{w}pt\" height=\"{h}pt\" viewBox=\"{x} {y} {w} {h}\"{body}",
            w = width,
            h = height,
            x = x,
            y = y,
            body = body
        );
        Self {
            markup,
            width_pt: width as f64,
            height_pt: height as f64,
        }
    }
}

/// An isolated drawing surface for one chart.
///
/// Built, encoded and dropped within a single request; nothing here is
/// shared between renders.
#[derive(Debug, Clone)]
pub struct Figure {
    size: FigureSize,
    document: SvgDocument,
}

impl Figure {
    /// Draw a white page of `size` with `title` on top, then hand the area
    /// under the title to `body`.
    ///
    /// One backend unit is one point, so the page is `72 * inches` units on
    /// each side.
    pub fn draw<F>(size: FigureSize, title: &str, body: F) -> PlotResult<Self>
    where
        F: FnOnce(&Root<'_>) -> PlotResult<()>,
    {
        let (width, height) = page_units(size);
        let mut markup = String::new();
        {
            let page = SVGBackend::with_string(&mut markup, (width, height)).into_drawing_area();
            page.fill(&WHITE).or_render_error()?;
            let root = page.margin(PAGE_MARGIN, PAGE_MARGIN, PAGE_MARGIN, PAGE_MARGIN);
            if title.is_empty() {
                body(&root)?;
            } else {
                let area = root
                    .titled(title, (FONT_FAMILY, TITLE_FONT))
                    .or_render_error()?;
                body(&area)?;
            }
            page.present().or_render_error()?;
        }

        Ok(Self {
            size,
            document: SvgDocument {
                markup,
                width_pt: width as f64,
                height_pt: height as f64,
            },
        })
    }

    pub fn size(&self) -> FigureSize {
        self.size
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn into_document(self) -> SvgDocument {
        self.document
    }
}

fn page_units(size: FigureSize) -> (u32, u32) {
    let width = size.width_pt().round().max(1.0) as u32;
    let height = size.height_pt().round().max(1.0) as u32;
    (width, height)
}
