//! # PDF 1.4 Writer
//!
//! Serializes a [`ReportDocument`] as a minimal, uncompressed PDF 1.4 file.
//!
//! ## Object Layout
//!
//! | Object | Content |
//! |--------|---------|
//! | 1 | Catalog |
//! | 2 | Pages tree |
//! | 3 | Helvetica, WinAnsiEncoding |
//! | 4 + 2i | Page *i* |
//! | 5 + 2i | Content stream of page *i* |
//!
//! Output is byte-for-byte deterministic: no creation date, no random file
//! identifier. Text is encoded in WinAnsi; characters outside it print as `?`.

use crate::layout::{Element, ReportDocument, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const MM_TO_PT: f32 = 72.0 / 25.4;

/// Serialize `document` as PDF bytes.
pub fn write_pdf(document: &ReportDocument) -> Vec<u8> {
    let mut out = PdfBuffer::default();
    out.raw(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let page_count = document.pages.len();
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", page_object(i)))
        .collect();

    out.object(1, b"<< /Type /Catalog /Pages 2 0 R >>");
    out.object(
        2,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {page_count} >>",
            kids.join(" ")
        )
        .as_bytes(),
    );
    out.object(
        3,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );

    let media_box = format!(
        "[0 0 {:.2} {:.2}]",
        PAGE_WIDTH_MM * MM_TO_PT,
        PAGE_HEIGHT_MM * MM_TO_PT
    );
    for (i, page) in document.pages.iter().enumerate() {
        let content = content_stream(&page.elements);
        out.object(
            page_object(i),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox {media_box} \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                page_object(i) + 1
            )
            .as_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        out.object(page_object(i) + 1, &stream);
    }

    out.finish()
}

fn page_object(index: usize) -> usize {
    4 + 2 * index
}

#[derive(Default)]
struct PdfBuffer {
    bytes: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfBuffer {
    fn raw(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Objects must be written in ascending id order starting at 1.
    fn object(&mut self, id: usize, body: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1);
        self.offsets.push(self.bytes.len());
        self.raw(format!("{id} 0 obj\n").as_bytes());
        self.raw(body);
        self.raw(b"\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.bytes.len();
        let size = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        ));
        self.raw(xref.as_bytes());
        self.bytes
    }
}

fn content_stream(elements: &[Element]) -> Vec<u8> {
    let mut out = Vec::new();
    for element in elements {
        match element {
            Element::Text {
                x,
                y,
                size,
                color,
                text,
            } => {
                out.extend_from_slice(
                    format!(
                        "BT /F1 {size:.1} Tf {} rg {:.2} {:.2} Td (",
                        fill(color),
                        x * MM_TO_PT,
                        (PAGE_HEIGHT_MM - y) * MM_TO_PT
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(&encode_text(text));
                out.extend_from_slice(b") Tj ET\n");
            }
            Element::Rule { x1, x2, y, color } => {
                let y = (PAGE_HEIGHT_MM - y) * MM_TO_PT;
                out.extend_from_slice(
                    format!(
                        "{} RG 0.5 w {:.2} {y:.2} m {:.2} {y:.2} l S\n",
                        fill(color),
                        x1 * MM_TO_PT,
                        x2 * MM_TO_PT
                    )
                    .as_bytes(),
                );
            }
        }
    }
    out
}

fn fill(color: &Rgb) -> String {
    let Rgb(r, g, b) = *color;
    format!(
        "{:.3} {:.3} {:.3}",
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0
    )
}

/// Encode a string as the body of a PDF literal string in WinAnsi.
fn encode_text(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let code = match ch {
            '\\' | '(' | ')' => {
                out.push(b'\\');
                ch as u8
            }
            ' '..='~' => ch as u8,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        };
        if code.is_ascii() {
            out.push(code);
        } else {
            out.extend_from_slice(format!("\\{code:03o}").as_bytes());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Page;

    fn doc(lines: &[&str], pages: usize) -> ReportDocument {
        let page = Page {
            elements: lines
                .iter()
                .enumerate()
                .map(|(i, l)| Element::Text {
                    x: 20.0,
                    y: 20.0 + 10.0 * i as f32,
                    size: 12.0,
                    color: Rgb(0, 0, 0),
                    text: l.to_string(),
                })
                .collect(),
        };
        ReportDocument {
            pages: vec![page; pages],
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_header_and_trailer() {
        let pdf = write_pdf(&doc(&["hello"], 1));
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_startxref_points_at_xref_table() {
        let pdf = write_pdf(&doc(&["hello"], 2));
        let text = String::from_utf8_lossy(&pdf);
        let tail = text.rsplit("startxref\n").next().unwrap();
        let offset: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(pdf[offset..].starts_with(b"xref\n0 8\n"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = write_pdf(&doc(&["a", "b"], 3));
        let xref_at = find(&pdf, b"xref\n").unwrap();
        let table = String::from_utf8_lossy(&pdf[xref_at..]).to_string();
        let entries: Vec<usize> = table
            .lines()
            .skip(3)
            .take_while(|l| l.ends_with(" n "))
            .map(|l| l[..10].parse().unwrap())
            .collect();
        // Catalog, pages, font, then page + content per page.
        assert_eq!(entries.len(), 3 + 2 * 3);
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj\n", i + 1);
            assert!(
                pdf[*offset..].starts_with(expected.as_bytes()),
                "object {} not at offset {offset}",
                i + 1
            );
        }
    }

    #[test]
    fn test_stream_length_matches_content() {
        let pdf = write_pdf(&doc(&["Overall Score: 100%"], 1));
        let text = String::from_utf8_lossy(&pdf).to_string();
        let start = text.find("/Length ").unwrap() + "/Length ".len();
        let len: usize = text[start..].split_whitespace().next().unwrap().parse().unwrap();
        let body_start = text[start..].find("stream\n").unwrap() + start + "stream\n".len();
        let body_end = text[body_start..].find("\nendstream").unwrap() + body_start;
        assert_eq!(body_end - body_start, len);
    }

    #[test]
    fn test_pages_tree_lists_every_page() {
        let pdf = write_pdf(&doc(&["x"], 2));
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Kids [4 0 R 6 0 R] /Count 2"));
    }

    #[test]
    fn test_encode_text_escapes_and_maps() {
        assert_eq!(encode_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(encode_text("\u{2022} risk"), b"\\225 risk".to_vec());
        assert_eq!(encode_text("caf\u{e9}"), b"caf\\351".to_vec());
        assert_eq!(encode_text("\u{4e2d}"), b"?".to_vec());
    }

    #[test]
    fn test_text_operator_positions() {
        let pdf = write_pdf(&doc(&["hi"], 1));
        let text = String::from_utf8_lossy(&pdf);
        // x = 20mm = 56.69pt, y = (297 - 20)mm = 785.20pt
        assert!(text.contains("56.69 785.20 Td (hi) Tj ET"), "{text}");
    }
}
