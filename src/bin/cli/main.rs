mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashword-cli", about = "Flash Word vocabulary list and reminders", version)]
struct Cli {
    /// Use a specific data directory (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
    Random,
    Marked,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word
    Add {
        word: String,
        /// Definition text (use "-" to read from stdin)
        definition: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// List words
    List {
        /// Only words with any of these comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Display order
        #[arg(long)]
        sort: Option<SortArg>,
    },

    /// Delete a word by id (or unique id prefix)
    Delete { id: String },

    /// Delete every word
    Clear,

    /// Toggle the bookmark on a word
    Mark { id: String },

    /// List all tags
    Tags,

    /// Merge words from an exported JSON file
    Import { file: PathBuf },

    /// Write all words to a timestamped JSON file
    Export {
        /// Target directory (default: current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show pending reminders
    Reminders,

    /// Rebuild the reminder schedule now
    Schedule,

    /// Show or change reminder settings
    Settings {
        /// First reminder hour (0-23)
        #[arg(long)]
        start: Option<u32>,
        /// Last reminder hour (start-24)
        #[arg(long)]
        end: Option<u32>,
        /// Minutes between reminders (at least 10)
        #[arg(long)]
        interval: Option<u32>,
        /// Also schedule this many following days
        #[arg(long)]
        days_ahead: Option<u32>,
        /// Allow reminder notifications
        #[arg(long)]
        notifications: Option<Toggle>,
    },

    /// Open a reminder link and show its word
    Open { uri: String },
}

/// Read the definition from stdin when given as "-"
fn resolve_definition(definition: String) -> anyhow::Result<String> {
    if definition == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        Ok(buf.trim_end().to_string())
    } else {
        Ok(definition)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Command::Add { word, definition, tags } => {
            let mut app = app::App::open(data_dir)?;
            let definition = resolve_definition(definition)?;
            let tags = tags.as_deref();
            commands::words::run_add(&mut app, word, definition, tags, &cli.format).await?;
            app.finish().await;
        }
        Command::List { tags, sort } => {
            let mut app = app::App::open(data_dir)?;
            commands::words::run_list(&mut app, tags.as_deref(), sort, &cli.format, use_color)?;
        }
        Command::Delete { id } => {
            let mut app = app::App::open(data_dir)?;
            commands::words::run_delete(&mut app, &id, &cli.format).await?;
            app.finish().await;
        }
        Command::Clear => {
            let mut app = app::App::open(data_dir)?;
            commands::words::run_clear(&mut app, &cli.format).await?;
            app.finish().await;
        }
        Command::Mark { id } => {
            let mut app = app::App::open(data_dir)?;
            commands::words::run_mark(&mut app, &id, &cli.format)?;
            app.finish().await;
        }
        Command::Tags => {
            let app = app::App::open(data_dir)?;
            commands::words::run_tags(&app, &cli.format)?;
        }
        Command::Import { file } => {
            let mut app = app::App::open(data_dir)?;
            commands::transfer::run_import(&mut app, &file, &cli.format).await?;
            app.finish().await;
        }
        Command::Export { dir } => {
            let app = app::App::open(data_dir)?;
            commands::transfer::run_export(&app, dir, &cli.format)?;
        }
        Command::Reminders => {
            let app = app::App::open(data_dir)?;
            commands::reminders::run_pending(&app, &cli.format, use_color).await?;
        }
        Command::Schedule => {
            let mut app = app::App::open(data_dir)?;
            commands::reminders::run_schedule(&mut app, &cli.format).await?;
            app.finish().await;
        }
        Command::Settings { start, end, interval, days_ahead, notifications } => {
            let changes = commands::reminders::SettingsChanges {
                start,
                end,
                interval,
                days_ahead,
                notifications: notifications.map(|t| matches!(t, Toggle::On)),
            };
            commands::reminders::run_settings(data_dir, changes, &cli.format).await?;
        }
        Command::Open { uri } => {
            let app = app::App::open(data_dir)?;
            commands::words::run_open(&app, &uri, &cli.format, use_color)?;
        }
    }

    Ok(())
}
