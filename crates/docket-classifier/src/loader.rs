//! Case file loading
//!
//! Returns raw text plus an optional load annotation. Binary PDF parsing is
//! an external collaborator's job: a file with a genuine `%PDF-` signature
//! is a per-document load error here, while a mislabeled `.pdf` can fall
//! back to plain text when degraded input is allowed.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Annotation set when a `.pdf` file was read as plain text
pub const NOTE_NOT_PDF: &str = "not_pdf";

/// Per-document load failures
///
/// Converted by the classifier into a `load_error:` result row, never
/// propagated as a batch failure.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read at all
    #[error("unreadable file: {0}")]
    Io(#[from] std::io::Error),

    /// A real binary PDF: text extraction happens upstream of this pipeline
    #[error("binary PDF, no text extraction available; convert to text first")]
    UnsupportedFormat,

    /// `.pdf` extension without a PDF signature, and degraded input not allowed
    #[error("file has a .pdf extension but no PDF signature")]
    NotPdf,
}

/// Load the text of a case file
///
/// `allow_degraded` controls the fallback for `.pdf` files whose content is
/// not actually PDF: when set, they are read as lossy UTF-8 text and
/// annotated [`NOTE_NOT_PDF`]; otherwise they fail with
/// [`LoadError::NotPdf`]. Non-PDF extensions are always read as text with
/// invalid byte sequences replaced rather than raised.
pub fn load_text(
    path: &Path,
    allow_degraded: bool,
) -> Result<(String, Option<&'static str>), LoadError> {
    if has_pdf_extension(path) {
        if is_pdf_file(path) {
            return Err(LoadError::UnsupportedFormat);
        }
        if !allow_degraded {
            return Err(LoadError::NotPdf);
        }
        return Ok((read_lossy(path)?, Some(NOTE_NOT_PDF)));
    }

    Ok((read_lossy(path)?, None))
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// True when the file starts with the `%PDF-` magic bytes
///
/// Unreadable files report false; the subsequent text read surfaces the
/// real I/O error.
fn is_pdf_file(path: &Path) -> bool {
    let mut header = [0u8; 5];
    match File::open(path).and_then(|mut f| f.read_exact(&mut header)) {
        Ok(()) => &header == b"%PDF-",
        Err(_) => false,
    }
}

fn read_lossy(path: &Path) -> Result<String, std::io::Error> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
