//! Argument validation and the top-level extraction call.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pdfscan::extract_pages;

use crate::cli::Cli;
use crate::envelope::Envelope;

/// Produce the envelope for parsed arguments.
pub fn run(cli: &Cli) -> Envelope {
    let Some(path) = cli.pdf.as_deref() else {
        return Envelope::error("pdf path not provided");
    };
    let shown = path.to_string_lossy();

    if !path.exists() {
        return Envelope::error(format!("file not found: {shown}"));
    }
    if !cli.extra.is_empty() {
        tracing::debug!(ignored = cli.extra.len(), "extra positional arguments ignored");
    }

    match extract_pages(path, &cli.ocr_config()) {
        Ok(pages) => Envelope::ok(shown, pages),
        Err(err) => {
            tracing::warn!(path = %shown, error = %err, "extraction failed");
            Envelope::error(err.to_string())
        }
    }
}

/// [`run`], with a panic anywhere in extraction reported as an error envelope.
pub fn run_guarded(cli: &Cli) -> Envelope {
    panic::catch_unwind(AssertUnwindSafe(|| run(cli)))
        .unwrap_or_else(|payload| Envelope::error(format!("internal error: {}", panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "panic"
    }
}
