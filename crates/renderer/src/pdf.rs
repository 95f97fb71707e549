//! Minimal single-page PDF writer.
//!
//! The page is sized in points to the trimmed figure and shows the chart
//! raster as a Flate-compressed DeviceRGB image XObject.

use std::io::Write;

use plot_common::{PlotError, PlotResult};

/// Build a PDF 1.4 document showing `rgb` (width × height × 3 bytes)
/// stretched over a `page_width` × `page_height` point page.
pub fn encode_pdf(
    rgb: &[u8],
    width: u32,
    height: u32,
    page_width: f64,
    page_height: f64,
) -> PlotResult<Vec<u8>> {
    let image = compress(rgb)
        .map_err(|e| PlotError::EncodeError(format!("image stream compression failed: {}", e)))?;
    let content = format!(
        "q\n{} 0 0 {} 0 0 cm\n/Im0 Do\nQ\n",
        fmt_real(page_width),
        fmt_real(page_height)
    );

    let mut doc = PdfWriter::new();
    doc.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    doc.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    doc.object(
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /XObject << /Im0 4 0 R >> >> /Contents 5 0 R >>",
            fmt_real(page_width),
            fmt_real(page_height)
        )
        .as_bytes(),
    );
    doc.stream(
        &format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode",
            width, height
        ),
        &image,
    );
    doc.stream("", content.as_bytes());
    doc.object(b"<< /Producer (csv-plot) >>");
    Ok(doc.finish(6))
}

fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Sequential object writer tracking byte offsets for the xref table.
struct PdfWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");
        Self {
            out,
            offsets: Vec::new(),
        }
    }

    fn begin(&mut self) {
        self.offsets.push(self.out.len());
        let id = self.offsets.len();
        self.out.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
    }

    fn object(&mut self, body: &[u8]) {
        self.begin();
        self.out.extend_from_slice(body);
        self.out.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, dict: &str, data: &[u8]) {
        self.begin();
        let sep = if dict.is_empty() { "" } else { " " };
        self.out
            .extend_from_slice(format!("<< {}{}/Length {} >>\nstream\n", dict, sep, data.len()).as_bytes());
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self, info: usize) -> Vec<u8> {
        let xref = self.out.len();
        let count = self.offsets.len() + 1;
        self.out
            .extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", count).as_bytes());
        for offset in &self.offsets {
            self.out
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        self.out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                count, info, xref
            )
            .as_bytes(),
        );
        self.out
    }
}

/// PDF real number: up to three decimals, no exponent.
fn fmt_real(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
