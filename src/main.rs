mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use console::Term;
use keyphrase::{Options, Params};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "keyphrase",
    version,
    author,
    about = "Reproducible passphrases from a keyfile and a passphrase"
)]
struct Cli {
    /// Keyfile whose contents salt the derivation (64 KiB to 100 MiB)
    #[arg(value_name = "KEYFILE")]
    keyfile: PathBuf,

    /// Log intermediate salt, key and keystream to stderr (sensitive)
    #[arg(short, long)]
    debug: bool,

    /// Read the passphrase from the first line of this file
    #[arg(short = 'f', long, value_name = "PATH")]
    passphrase_file: Option<PathBuf>,

    /// Print passwords without line numbers
    #[arg(short, long)]
    plain: bool,

    /// Show settings and stats after the passwords
    #[arg(short, long)]
    stats: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let options = Options { debug: cli.debug };
    let params = Params::DEFAULT;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "keyphrase");

    let keyfile = keyphrase::read_keyfile(&cli.keyfile, &options)
        .context("Failed to derive salt from keyfile")?;

    let passphrase = match &cli.passphrase_file {
        Some(path) => ui::read_passphrase_file(path)?,
        None => ui::prompt_passphrase()?,
    };
    tracing::debug!(bytes = passphrase.len(), "passphrase read");

    let display = ui::DisplayOptions {
        unicode_support: ui::detect_unicode_support(),
        color_support: ui::detect_color_support(),
        numbered: !cli.plain,
    };

    let spinner = !cli.debug && Term::stderr().is_term();

    let (passwords, elapsed) = ui::show_progress(spinner, display.unicode_support, || {
        keyphrase::derive_passwords(&keyfile.salt, &passphrase, &params, &options)
            .context("Failed to generate passwords")
    })?;

    ui::display_output(&passwords, &display);

    if cli.stats {
        let info = ui::InputInfo {
            passphrase_bytes: passphrase.len(),
            keyfile_bytes: keyfile.size,
        };
        ui::display_summary(&info, &params, &options, elapsed, &display);
    }

    Ok(())
}

/// `--debug` forces debug level for this crate; otherwise `RUST_LOG` or `warn`.
fn init_logging(debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if debug {
        EnvFilter::new("keyphrase=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
