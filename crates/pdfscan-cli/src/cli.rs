use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use pdfscan::OcrConfig;

/// Extract page text and OCR the ruled tables of a PDF, printed as one JSON line.
///
/// Every invocation prints exactly one envelope, so there are no
/// `--help`/`--version` flags and the path may start with a dash.
#[derive(Debug, Parser)]
#[command(
    name = "pdfscan",
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Path to the PDF file
    #[arg(value_name = "PDF", allow_hyphen_values = true)]
    pub pdf: Option<PathBuf>,

    /// tesseract executable used for table OCR
    #[arg(
        long,
        value_name = "PATH",
        env = "PDFSCAN_TESSERACT",
        default_value = "tesseract"
    )]
    pub tesseract: PathBuf,

    /// pdftoppm executable used to render table regions
    #[arg(
        long,
        value_name = "PATH",
        env = "PDFSCAN_PDFTOPPM",
        default_value = "pdftoppm"
    )]
    pub pdftoppm: PathBuf,

    /// Extra positional arguments are accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub extra: Vec<OsString>,
}

impl Cli {
    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig::default()
            .with_tesseract(&self.tesseract)
            .with_pdftoppm(&self.pdftoppm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_parse_to_no_path() {
        let cli = Cli::try_parse_from(["pdfscan"]).unwrap();
        assert!(cli.pdf.is_none());
    }

    #[test]
    fn first_positional_is_the_pdf() {
        let cli = Cli::try_parse_from(["pdfscan", "a.pdf", "ignored"]).unwrap();
        assert_eq!(cli.pdf, Some(PathBuf::from("a.pdf")));
        assert_eq!(cli.extra, vec![OsString::from("ignored")]);
    }

    #[test]
    fn tool_flags_reach_ocr_config() {
        let cli = Cli::try_parse_from([
            "pdfscan",
            "--tesseract",
            "/opt/tesseract",
            "--pdftoppm",
            "/opt/pdftoppm",
            "a.pdf",
        ])
        .unwrap();
        let cfg = cli.ocr_config();
        assert_eq!(cfg.tesseract, PathBuf::from("/opt/tesseract"));
        assert_eq!(cfg.pdftoppm, PathBuf::from("/opt/pdftoppm"));
        assert_eq!(cfg.lang, "kor+eng");
    }

    #[test]
    fn dash_prefixed_path_is_the_pdf() {
        let cli = Cli::try_parse_from(["pdfscan", "-weird.pdf"]).unwrap();
        assert_eq!(cli.pdf, Some(PathBuf::from("-weird.pdf")));
    }

    #[test]
    fn help_and_version_are_plain_paths() {
        for arg in ["--help", "-h", "--version", "-V", "--bogus"] {
            let cli = Cli::try_parse_from(["pdfscan", arg]).unwrap();
            assert_eq!(cli.pdf, Some(PathBuf::from(arg)));
        }
    }

    #[test]
    fn tool_flag_after_the_pdf_still_applies() {
        let cli =
            Cli::try_parse_from(["pdfscan", "a.pdf", "--pdftoppm", "/opt/pdftoppm"]).unwrap();
        assert_eq!(cli.pdf, Some(PathBuf::from("a.pdf")));
        assert_eq!(cli.pdftoppm, PathBuf::from("/opt/pdftoppm"));
        assert!(cli.extra.is_empty());
    }

    #[test]
    fn dashed_extras_are_ignored() {
        let cli = Cli::try_parse_from(["pdfscan", "a.pdf", "-x", "--bogus"]).unwrap();
        assert_eq!(cli.pdf, Some(PathBuf::from("a.pdf")));
        assert_eq!(cli.extra.len(), 2);
    }

    #[test]
    fn tool_flag_without_value_is_rejected() {
        assert!(Cli::try_parse_from(["pdfscan", "a.pdf", "--tesseract"]).is_err());
    }
}
