//! Text recognition via the `tesseract` command line.

use std::path::Path;
use std::process::Command;

use crate::error::OcrError;

/// Run `tesseract <image> stdout -l <lang>` and return its standard output.
///
/// The output is returned as tesseract printed it, including the trailing
/// form feed or newlines some versions append.
pub fn run_tesseract(tesseract: &Path, image: &Path, lang: &str) -> Result<String, OcrError> {
    let output = Command::new(tesseract)
        .arg(image)
        .arg("stdout")
        .arg("-l")
        .arg(lang)
        .output()
        .map_err(|source| OcrError::Spawn {
            tool: tesseract.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(OcrError::ToolFailed {
            tool: tesseract.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
