use clap::{Parser, builder::styling};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use titanic_etl::cli::{JobConfig, run_job};
use titanic_etl::etl::LogSink;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Titanic ETL: clean the passenger manifest and load it into SQLite
#[derive(Parser)]
#[command(name = "titanic-etl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source configuration from
    #[arg(short, long, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long)]
    debug: bool,

    /// CSV file to extract [env: TITANIC_INPUT, default: train.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// SQLite database to load into [env: TITANIC_DATABASE, default: titanic.db]
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Table to replace [env: TITANIC_TABLE, default: train_cleaned]
    #[arg(short, long)]
    table: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::from_filename(&cli.env);

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {
            log::debug!("No {} file, using process environment", cli.env)
        }
        Err(err) => return Err(err.into()),
    }

    let config = JobConfig::from_env().with_overrides(cli.input, cli.database, cli.table);
    log::info!(
        "Running ETL from {} into {} (table {})",
        config.input.display().bright_black(),
        config.database.display().bright_black(),
        config.table.cyan()
    );

    let count = run_job(&config, std::sync::Arc::new(LogSink))?;
    log::info!("Loaded {} rows", count.green());

    Ok(())
}
