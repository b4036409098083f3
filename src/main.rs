use anyhow::Result;
use clap::Parser;

use chordmap::cli::CliArgs;
use chordmap::config::Preferences;

fn main() -> Result<()> {
    chordmap::tracing::init();

    let args = CliArgs::parse();
    tracing::debug!("Running {}", args.command);

    let prefs = Preferences::load();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    args.run(&prefs, &mut out)
}
