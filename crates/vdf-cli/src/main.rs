//! `vdf` CLI — inspect KeyValues documents and Steam libraries from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Parse a text document and print it back in canonical form
//! vdf dump -i appmanifest_440.acf
//!
//! # Decode a binary document (stdin) to pretty JSON
//! vdf json --binary < localconfig.bin
//!
//! # Print the value at a dotted path
//! vdf get UserConfig.language -i appmanifest_440.acf
//!
//! # List library folders and installed apps
//! vdf libraries --steam-root ~/.steam/steam
//! STEAM_ROOT=~/.steam/steam vdf games --json
//! ```
//!
//! Set `RUST_LOG=vdf_core=debug` (or pass `-v`) to see why manifests were skipped.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vdf_core::{json, library, query, Node, ReadOptions};

#[derive(Parser)]
#[command(name = "vdf", version, about = "KeyValues (VDF) document CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Treat the input as the binary encoding
    #[arg(long)]
    binary: bool,
    /// Maximum block nesting depth
    #[arg(long, default_value_t = vdf_core::options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(Args)]
struct SteamArgs {
    /// Steam installation directory
    #[arg(long, env = "STEAM_ROOT")]
    steam_root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a document and write it back in the text encoding
    Dump {
        #[command(flatten)]
        input: InputArgs,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert a document to pretty-printed JSON
    Json {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print the value(s) at a dotted path such as `UserConfig.language`
    Get {
        /// Dotted path; `*` matches any child
        path: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// List the library folders of a Steam installation
    Libraries {
        #[command(flatten)]
        steam: SteamArgs,
    },
    /// List apps installed across all libraries
    Games {
        #[command(flatten)]
        steam: SteamArgs,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Dump { input, output } => {
            let doc = read_document(&input)?;
            match output {
                Some(path) => vdf_core::save_text(&doc, &path, vdf_core::Format::Text)
                    .with_context(|| format!("Failed to write file: {}", path.display()))?,
                None => print!("{}", vdf_core::encode(&doc)),
            }
        }
        Commands::Json { input } => {
            let doc = read_document(&input)?;
            let value = if input.binary {
                json::to_json(&doc)
            } else {
                json::to_json_named(&doc)
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Get { path, input } => {
            let doc = read_document(&input)?;
            let matches = query::find_all(&doc, &path);
            if matches.is_empty() {
                anyhow::bail!("No value at path '{}'", path);
            }
            for node in matches {
                match node.value() {
                    Some(value) => println!("{}", value),
                    None => print!("{}", vdf_core::encode(node)),
                }
            }
        }
        Commands::Libraries { steam } => {
            for folder in library::library_folders(&steam.steam_root) {
                println!("{}", folder.display());
            }
        }
        Commands::Games { steam, json } => {
            let apps = library::scan(&steam.steam_root);
            if json {
                println!("{}", serde_json::to_string_pretty(&apps)?);
            } else {
                for app in &apps {
                    println!("{:>10}  {}", app.app_id, app.name);
                }
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays parseable.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read and parse the input with the propagating readers, so structural
/// errors reach the user with their cause.
fn read_document(args: &InputArgs) -> Result<Node> {
    let bytes = read_input(args.input.as_ref())?;
    let opts = ReadOptions::default().with_max_depth(args.max_depth);
    let mut root = Node::default();
    if args.binary {
        vdf_core::read_binary_with(&mut root, bytes.as_slice(), &opts)
            .context("Failed to decode binary VDF")?;
    } else {
        vdf_core::read_text_with(&mut root, bytes.as_slice(), &opts)
            .context("Failed to parse VDF text")?;
    }
    Ok(root)
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
