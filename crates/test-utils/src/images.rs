//! Signature checks for encoded artifacts.

/// PNG file signature
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// True when `bytes` starts with the PNG signature and ends with an IEND chunk.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.len() > 20 && bytes.starts_with(&PNG_SIGNATURE) && bytes[bytes.len() - 8..bytes.len() - 4] == *b"IEND"
}

/// True when `bytes` is framed by JPEG SOI/EOI markers.
pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.len() > 4 && bytes.starts_with(&[0xFF, 0xD8]) && bytes.ends_with(&[0xFF, 0xD9])
}

/// True when `bytes` looks like a complete PDF document.
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-") && trim_end(bytes).ends_with(b"%%EOF")
}

/// True when `bytes` is UTF-8 text holding an `<svg>` root.
pub fn is_svg(bytes: &[u8]) -> bool {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.contains("<svg") && text.trim_end().ends_with("</svg>"),
        Err(_) => false,
    }
}

/// Read the width and height from a PNG IHDR chunk.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if !bytes.starts_with(&PNG_SIGNATURE) || bytes.len() < 24 || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    Some((width, height))
}

/// Contents of every `<text>` element in document order, trimmed.
///
/// Entities are left escaped.
pub fn svg_texts(svg: &str) -> Vec<String> {
    svg.split("<text")
        .skip(1)
        .filter_map(|chunk| {
            let start = chunk.find('>')? + 1;
            let end = chunk.find("</text>")?;
            chunk.get(start..end).map(|t| t.trim().to_string())
        })
        .collect()
}

/// Number of `<tag ...>` elements whose attributes contain `needle`.
///
/// An empty `needle` counts every element of that tag.
pub fn count_svg_elements(svg: &str, tag: &str, needle: &str) -> usize {
    let open = format!("<{} ", tag);
    svg.split(open.as_str())
        .skip(1)
        .filter(|rest| rest.split('>').next().is_some_and(|attrs| attrs.contains(needle)))
        .count()
}

fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map(|i| i + 1)
        .unwrap_or(0);
    &bytes[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures_reject_garbage() {
        let garbage = b"not an image at all";
        assert!(!is_png(garbage));
        assert!(!is_jpeg(garbage));
        assert!(!is_pdf(garbage));
        assert!(!is_svg(garbage));
    }

    #[test]
    fn test_pdf_with_trailing_newline() {
        assert!(is_pdf(b"%PDF-1.4\n...\n%%EOF\n"));
    }

    #[test]
    fn test_svg_texts_are_trimmed() {
        let svg = "<svg><text x=\"1\" y=\"2\">\nGroup\n</text>\n<text x=\"3\">\n50.0%\n</text></svg>";
        assert_eq!(svg_texts(svg), vec!["Group", "50.0%"]);
        assert_eq!(count_svg_elements(svg, "text", ""), 2);
        assert_eq!(count_svg_elements(svg, "text", "x=\"3\""), 1);
    }

    #[test]
    fn test_svg_detection() {
        assert!(is_svg(b"<?xml version=\"1.0\"?><svg></svg>\n"));
    }
}
