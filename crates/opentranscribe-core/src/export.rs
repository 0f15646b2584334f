//! Transcript export formatters.
//!
//! Three formats: plain text (byte-identical passthrough), RTF (fixed
//! Calibri preamble, newlines become paragraph breaks), and DOCX (single
//! paragraph via docx-rs).

use std::io::Cursor;
use std::path::Path;

use crate::error::CoreError;

/// Fixed RTF preamble, matching common word-processor output
const RTF_HEADER: &str =
    r"{\rtf1\ansi\ansicpg1252\deff0\nouicompat\deflang1033{\fonttbl{\f0\fnil\fcharset0 Calibri;}}";
const RTF_FOOTER: &str = "}";

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raw transcript bytes
    Txt,
    /// Rich Text Format
    Rtf,
    /// Word-processor document
    Docx,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Rtf => "rtf",
            ExportFormat::Docx => "docx",
        }
    }

    /// Infer the format from a file path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())?
            .to_lowercase()
            .as_str()
        {
            "txt" => Some(ExportFormat::Txt),
            "rtf" => Some(ExportFormat::Rtf),
            "docx" => Some(ExportFormat::Docx),
            _ => None,
        }
    }

    /// Render transcript text to this format's file content
    pub fn render(&self, text: &str) -> Result<Vec<u8>, CoreError> {
        match self {
            ExportFormat::Txt => Ok(text.as_bytes().to_vec()),
            ExportFormat::Rtf => Ok(render_rtf(text).into_bytes()),
            ExportFormat::Docx => render_docx(text),
        }
    }
}

/// Wrap text in the fixed RTF container; each newline becomes a paragraph
/// break marker. Control characters are not escaped (passthrough fidelity).
fn render_rtf(text: &str) -> String {
    let body = text.replace('\n', "\\par\n");
    format!("{RTF_HEADER}{body}{RTF_FOOTER}")
}

/// Build a single-paragraph document via docx-rs
fn render_docx(text: &str) -> Result<Vec<u8>, CoreError> {
    use docx_rs::{Docx, Paragraph, Run};

    let doc = Docx::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));

    let mut buffer = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buffer)
        .map_err(|e| CoreError::Export(format!("Failed to build docx: {e}")))?;

    Ok(buffer.into_inner())
}

/// Render and write the transcript to a file, surfacing I/O errors
pub fn write(path: &Path, text: &str, format: ExportFormat) -> Result<(), CoreError> {
    let content = format.render(text)?;
    std::fs::write(path, content)
        .map_err(|e| CoreError::Export(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_is_byte_identical() {
        let rendered = ExportFormat::Txt.render("hello world").unwrap();
        assert_eq!(rendered, b"hello world");
    }

    #[test]
    fn test_rtf_framing_is_byte_exact() {
        let rendered = ExportFormat::Rtf.render("a\nb").unwrap();
        let expected = format!("{RTF_HEADER}a\\par\nb{RTF_FOOTER}");
        assert_eq!(rendered, expected.as_bytes());
    }

    #[test]
    fn test_rtf_without_newlines_has_no_par() {
        let rendered = String::from_utf8(ExportFormat::Rtf.render("abc").unwrap()).unwrap();
        assert!(!rendered.contains("\\par"));
        assert!(rendered.starts_with(RTF_HEADER));
        assert!(rendered.ends_with(RTF_FOOTER));
    }

    #[test]
    fn test_docx_renders_zip_container() {
        let rendered = ExportFormat::Docx.render("hello").unwrap();
        // docx files are zip archives
        assert_eq!(&rendered[..2], b"PK");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.TXT")),
            Some(ExportFormat::Txt)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.rtf")),
            Some(ExportFormat::Rtf)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("out.docx")),
            Some(ExportFormat::Docx)
        );
        assert_eq!(ExportFormat::from_path(Path::new("out.pdf")), None);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_write_reports_unwritable_path() {
        let err = write(
            Path::new("/nonexistent-dir/out.txt"),
            "text",
            ExportFormat::Txt,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::Export(_)));
    }

    #[test]
    fn test_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        write(&path, "hello world", ExportFormat::Txt).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello world");
    }
}
