//! End-to-end tests: CSV bytes in, encoded artifact out.

use csv_parser::Frame;
use plot_common::{OutputFormat, PlotParams, PlotRequest, PlotType};
use renderer::{render_plot, DrawingContext};
use test_utils::{create_grouped_csv, create_linear_csv, fixtures, is_jpeg, is_pdf, is_png, is_svg, png_dimensions};

fn context() -> DrawingContext {
    // no fonts keeps the tests independent of the host; text is skipped
    DrawingContext::with_fonts(usvg::fontdb::Database::new())
}

fn params(plot_type: &str, format: &str, dpi: i64) -> PlotParams {
    PlotRequest {
        x_col: "x".to_string(),
        y_col: Some("y".to_string()),
        plot_type: plot_type.to_string(),
        figsize_width: 4.0,
        figsize_height: 3.0,
        output_format: format.to_string(),
        dpi,
        ..PlotRequest::default()
    }
    .validate()
    .unwrap()
}

fn check(format: OutputFormat, bytes: &[u8]) -> bool {
    match format {
        OutputFormat::Png => is_png(bytes),
        OutputFormat::Jpg => is_jpeg(bytes),
        OutputFormat::Svg => is_svg(bytes),
        OutputFormat::Pdf => is_pdf(bytes),
    }
}

#[test]
fn test_every_type_in_every_format() {
    let frame = Frame::from_csv_bytes(fixtures::TWO_NUMERIC.as_bytes()).unwrap();
    let ctx = context();
    for plot_type in PlotType::ALL {
        for format in OutputFormat::ALL {
            let params = params(plot_type.as_str(), format.as_str(), 50);
            let artifact = render_plot(&frame, &params, &ctx).unwrap();
            assert_eq!(artifact.format, format);
            assert_eq!(artifact.content_type(), format.content_type());
            assert!(check(format, &artifact.bytes), "{} as {}", plot_type, format);
        }
    }
}

#[test]
fn test_svg_output_is_byte_identical() {
    let csv = create_linear_csv(50, 1.5);
    let frame = Frame::from_csv_bytes(csv.as_bytes()).unwrap();
    let ctx = context();
    let first = render_plot(&frame, &params("area", "svg", 300), &ctx).unwrap();
    let second = render_plot(&frame, &params("area", "svg", 300), &ctx).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

#[test]
fn test_png_size_tracks_dpi() {
    let frame = Frame::from_csv_bytes(fixtures::TWO_NUMERIC.as_bytes()).unwrap();
    let ctx = context();
    let low = render_plot(&frame, &params("line", "png", 50), &ctx).unwrap();
    let high = render_plot(&frame, &params("line", "png", 100), &ctx).unwrap();

    let (lw, lh) = png_dimensions(&low.bytes).unwrap();
    let (hw, hh) = png_dimensions(&high.bytes).unwrap();
    assert!((hw as i64 - 2 * lw as i64).abs() <= 1);
    assert!((hh as i64 - 2 * lh as i64).abs() <= 1);
}

#[test]
fn test_output_is_trimmed_below_page_size() {
    let frame = Frame::from_csv_bytes(fixtures::TWO_NUMERIC.as_bytes()).unwrap();
    let artifact = render_plot(&frame, &params("scatter", "png", 72), &context()).unwrap();
    let (w, _) = png_dimensions(&artifact.bytes).unwrap();
    // the page is 4 inches wide, i.e. 288 pixels at 72 dpi
    assert!(w < 288);
}

#[test]
fn test_svg_is_trimmed_behind_view_box() {
    let frame = Frame::from_csv_bytes(fixtures::TWO_NUMERIC.as_bytes()).unwrap();
    let artifact = render_plot(&frame, &params("scatter", "svg", 72), &context()).unwrap();
    let svg = String::from_utf8(artifact.bytes).unwrap();
    let width: u32 = svg
        .split("width=\"")
        .nth(1)
        .and_then(|rest| rest.split("pt\"").next())
        .and_then(|w| w.parse().ok())
        .unwrap();
    // the page is 4 inches wide, i.e. 288 points
    assert!(width < 288, "{}", width);
    assert!(!svg.contains("viewBox=\"0 0 288 216\""));
}

#[test]
fn test_grouped_violin_from_generated_csv() {
    let csv = create_grouped_csv(4, 25);
    let frame = Frame::from_csv_bytes(csv.as_bytes()).unwrap();
    let mut params = params("violin", "png", 40);
    params.x_col = "group".to_string();
    params.y_col = Some("value".to_string());
    let artifact = render_plot(&frame, &params, &context()).unwrap();
    assert!(is_png(&artifact.bytes));
}
