//! utau-dump: inspect UTAU files from the command line.
//!
//! Decoded models are printed as JSON; oto.ini and prefix.map are re-encoded
//! so the output can be diffed against the input.

use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use utau_codec::config::{default_config_path, load_config, Config};
use utau_codec::ust::File;
use utau_codec::voicebank::{Oto, PrefixMap};

#[derive(Parser)]
#[command(name = "utau-dump")]
#[command(about = "Decode and inspect UTAU sequence and voicebank files")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.utau-codec/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a UST file and print it as JSON
    Ust {
        file: PathBuf,
    },

    /// Decode a UST file and print its projected sequence as JSON
    Seq {
        file: PathBuf,
    },

    /// Decode an oto.ini and write it back out
    Oto {
        file: PathBuf,

        /// Print JSON instead of oto.ini text
        #[arg(long)]
        json: bool,
    },

    /// Decode a prefix.map and write it back out, sorted
    Prefix {
        file: PathBuf,

        /// Spell accidentals with sharps
        #[arg(long)]
        sharps: bool,
    },

    /// Resolve every note of a UST against an oto.ini and print the matches
    Lookup {
        oto: PathBuf,
        ust: PathBuf,

        /// prefix.map used to pick pitch-specific aliases
        #[arg(long)]
        prefix_map: Option<PathBuf>,
    },
}

fn read(path: &Path) -> Result<Vec<u8>, Box<dyn Error>> {
    std::fs::read(path).map_err(|e| format!("{}: {e}", path.display()).into())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config: Config = load_config(&config_path)?;
    info!(path = %config_path.display(), "loaded config");

    match cli.command {
        Commands::Ust { file } => {
            let ust = File::decode_with(&read(&file)?, config.ust_options()?)?;
            print_json(&ust)?;
        }
        Commands::Seq { file } => {
            let ust = File::decode_with(&read(&file)?, config.ust_options()?)?;
            print_json(&ust.sequence())?;
        }
        Commands::Oto { file, json } => {
            let options = config.oto_options()?;
            let oto = Oto::decode(&read(&file)?, options)?;
            if json {
                print_json(&oto)?;
            } else {
                oto.write_to(io::stdout().lock(), options)?;
            }
        }
        Commands::Prefix { file, sharps } => {
            let mut options = config.prefix_map_options()?;
            options.sharps |= sharps;
            let map = PrefixMap::decode(&read(&file)?, options)?;
            map.write_to(io::stdout().lock(), options)?;
        }
        Commands::Lookup {
            oto,
            ust,
            prefix_map,
        } => {
            let oto_options = config.oto_options()?;
            let oto = Oto::decode(&read(&oto)?, oto_options)?;
            let ust = File::decode_with(&read(&ust)?, config.ust_options()?)?;
            let prefix_map = match prefix_map {
                Some(path) => Some(PrefixMap::decode(
                    &read(&path)?,
                    config.prefix_map_options()?,
                )?),
                None => None,
            };

            let mut found = Oto::new();
            for (i, note) in ust.notes.iter().enumerate() {
                if note.is_rest() {
                    continue;
                }
                match oto.lookup(&note.lyric, note.note_num, prefix_map.as_ref()) {
                    Some(entry) => found.push(entry.clone()),
                    None => warn!(note = i, lyric = %note.lyric, "no oto entry found"),
                }
            }
            found.write_to(io::stdout().lock(), oto_options)?;
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("utau-dump: {e}");
        std::process::exit(1);
    }
}
