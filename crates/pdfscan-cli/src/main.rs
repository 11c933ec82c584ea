mod cli;
mod driver;
mod envelope;

use clap::Parser;
use cli::Cli;
use envelope::Envelope;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `PDFSCAN_LOG=debug`.
const LOG_ENV: &str = "PDFSCAN_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    init_logging();

    let envelope = match Cli::try_parse() {
        Ok(cli) => driver::run_guarded(&cli),
        Err(err) => {
            let rendered = err.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            Envelope::error(message)
        }
    };

    // stdout carries only the envelope; the exit status is always 0
    let mut out = std::io::stdout().lock();
    if let Err(err) = envelope.write_line(&mut out) {
        tracing::error!(error = %err, "failed to write result");
    }
}
