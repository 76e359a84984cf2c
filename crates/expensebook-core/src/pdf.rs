//! Minimal single-page PDF writer
//!
//! Produces a fixed five-object document (catalog, page tree, page, content
//! stream, Helvetica font) showing one text line per input string. Text is
//! encoded as Latin-1; lines past the bottom of the page are still written.

use crate::error::{CoreError, CoreResult};

const PDF_HEADER: &[u8] = b"%PDF-1.4\n";
const FREE_ENTRY: &[u8] = b"0000000000 65535 f \n";

const CATALOG: &str = "<< /Type /Catalog /Pages 2 0 R >>";
const PAGES: &str = "<< /Type /Pages /Kids [3 0 R] /Count 1 >>";
const PAGE: &str = "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
/Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>";
const FONT: &str = "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>";

// Text block prologue: font F1 at 12pt, start at (72, 720), 16pt leading.
const TEXT_PROLOGUE: [&str; 4] = ["BT", "/F1 12 Tf", "72 720 Td", "16 TL"];
const TEXT_EPILOGUE: &str = "ET";

/// Escape a string for use inside a PDF literal string
pub fn escape_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(ch),
        }
    }
    out
}

/// Encode text as Latin-1, one byte per character.
///
/// `line` is only used to locate the failure.
pub fn encode_latin1(text: &str, line: usize) -> CoreResult<Vec<u8>> {
    text.chars()
        .map(|character| u8::try_from(u32::from(character)).map_err(|_| CoreError::Encoding { character, line }))
        .collect()
}

/// Build the encoded content stream for the given lines
pub fn content_stream<S: AsRef<str>>(lines: &[S]) -> CoreResult<Vec<u8>> {
    let mut ops: Vec<Vec<u8>> = TEXT_PROLOGUE.iter().map(|op| op.as_bytes().to_vec()).collect();

    for (index, line) in lines.iter().enumerate() {
        let mut op = if index == 0 { b"(".to_vec() } else { b"T* (".to_vec() };
        op.extend(encode_latin1(&escape_pdf_text(line.as_ref()), index)?);
        op.extend_from_slice(b") Tj");
        ops.push(op);
    }
    ops.push(TEXT_EPILOGUE.as_bytes().to_vec());

    Ok(ops.join(&b'\n'))
}

/// Render lines of text into a complete single-page PDF
pub fn build_pdf_bytes<S: AsRef<str>>(lines: &[S]) -> CoreResult<Vec<u8>> {
    let content = content_stream(lines)?;

    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(&content);
    stream.extend_from_slice(b"\nendstream");

    let mut writer = PdfWriter::new();
    writer.write_object(CATALOG.as_bytes());
    writer.write_object(PAGES.as_bytes());
    writer.write_object(PAGE.as_bytes());
    writer.write_object(&stream);
    writer.write_object(FONT.as_bytes());
    Ok(writer.finish())
}

/// Appends numbered objects and remembers where each one starts
struct PdfWriter {
    buffer: Vec<u8>,
    offsets: Vec<usize>, // offsets[i] is the start of object i + 1
}

impl PdfWriter {
    fn new() -> Self {
        Self {
            buffer: PDF_HEADER.to_vec(),
            offsets: Vec::new(),
        }
    }

    fn write_object(&mut self, body: &[u8]) {
        self.offsets.push(self.buffer.len());
        let id = self.offsets.len();
        self.buffer.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buffer.extend_from_slice(body);
        self.buffer.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let size = self.offsets.len() + 1;
        let xref_start = self.buffer.len();

        self.buffer.extend_from_slice(format!("xref\n0 {}\n", size).as_bytes());
        self.buffer.extend_from_slice(FREE_ENTRY);
        for offset in &self.offsets {
            self.buffer
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        self.buffer.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                size, xref_start
            )
            .as_bytes(),
        );
        self.buffer
    }
}
