//! Command-line interface
//!
//! Exit codes: 0 on success, 1 on any runtime failure, 2 for invalid
//! arguments (clap reports those itself).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::catalog::ItemCatalog;
use crate::compositor::Theme;
use crate::fetch::HttpIconSource;
use crate::output::save_png;
use crate::render::{render, JsonFileStore};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_INVALID_ARGS: u8 = 2;

#[derive(Parser)]
#[command(
    name = "presetcard",
    version,
    about = "Render loadout preset cards as composited PNG images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one preset document to a PNG file
    Render {
        /// Preset document id
        id: String,

        /// Directory holding preset JSON documents
        #[arg(long, default_value = "presets")]
        presets: PathBuf,

        /// Item catalog JSON dataset
        #[arg(long, default_value = "data/items.json")]
        catalog: PathBuf,

        /// Directory holding the card artwork
        #[arg(long, default_value = "assets")]
        assets: PathBuf,

        /// Output path (defaults to <id>.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Stroke zone and cell outlines on top of the card
        #[arg(long)]
        debug: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            id,
            presets,
            catalog,
            assets,
            output,
            debug,
        } => match render_command(&id, &presets, &catalog, &assets, output, debug) {
            Ok(path) => {
                println!("wrote {}", path.display());
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(message) => {
                eprintln!("error: {message}");
                ExitCode::from(EXIT_ERROR)
            }
        },
    }
}

fn render_command(
    id: &str,
    presets: &PathBuf,
    catalog_path: &PathBuf,
    assets: &PathBuf,
    output: Option<PathBuf>,
    debug: bool,
) -> Result<PathBuf, String> {
    let catalog = ItemCatalog::from_path(catalog_path).map_err(|e| e.to_string())?;
    let theme = Theme::load(assets).map_err(|e| e.to_string())?;
    let store = JsonFileStore::new(presets);
    let icons = HttpIconSource::new();

    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| format!("cannot start runtime: {e}"))?;
    let bytes = runtime
        .block_on(render(&store, &catalog, &icons, &theme, id, debug))
        .map_err(|e| e.to_string())?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{id}.png")));
    save_png(&bytes, &path).map_err(|e| e.to_string())?;
    Ok(path)
}
