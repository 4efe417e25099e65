use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wadtools::archive::Wad;
use wadtools::combine::CombineOptions;
use wadtools::name::LumpName;
use wadtools::{query, PWAD};

#[derive(Parser)]
#[command(name = "wadtools", about = "Inspect and combine Doom WAD archives")]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the map names found in each WAD
    ListMaps {
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
    },
    /// Print every lump name in each WAD, in directory order
    ListLumps {
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
    },
    /// Merge WADs, in the order given, into a single archive
    Combine {
        #[arg(required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,
        #[arg(short, long, default_value = "combined.wad")]
        output: PathBuf,
        /// Tag the result as a patch archive instead of IWAD
        #[arg(long)]
        pwad: bool,
    },
    /// Show header fields and the lump directory
    Info {
        input: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct WadInfo<'a> {
    path:             String,
    tag:              String,
    lump_count:       i32,
    directory_offset: i32,
    maps:             Vec<LumpName>,
    lumps:            Vec<LumpInfo<'a>>,
}

#[derive(Serialize)]
struct LumpInfo<'a> {
    name:   &'a LumpName,
    offset: i32,
    length: i32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {

        // ── ListMaps ─────────────────────────────────────────────────────────
        Commands::ListMaps { inputs } => {
            for path in &inputs {
                match query::map_names_at(path) {
                    Ok(names) => names.iter().for_each(|n| println!("{n}")),
                    Err(e) => eprintln!("Invalid path: {} ({e})", path.display()),
                }
            }
        }

        // ── ListLumps ────────────────────────────────────────────────────────
        Commands::ListLumps { inputs } => {
            for path in &inputs {
                match query::lump_names_at(path) {
                    Ok(names) => names.iter().for_each(|n| println!("{n}")),
                    Err(e) => eprintln!("Invalid path: {} ({e})", path.display()),
                }
            }
        }

        // ── Combine ──────────────────────────────────────────────────────────
        Commands::Combine { inputs, output, pwad } => {
            let mut opts = CombineOptions::default();
            if pwad { opts.output_tag = PWAD; }
            let wad = Wad::combine(&inputs, &opts)?;
            wad.write(&output)?;
            println!("Combined {} lumps from {} WADs → {}",
                     wad.len(), inputs.len(), output.display());
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input, json } => {
            let wad    = Wad::open(&input)?;
            let header = wad.header();
            if json {
                let info = WadInfo {
                    path:             input.display().to_string(),
                    tag:              header.tag_lossy(),
                    lump_count:       header.lump_count,
                    directory_offset: header.directory_offset,
                    maps:             wad.map_names().into_vec(),
                    lumps:            wad.lumps().iter().map(|l| LumpInfo {
                        name:   &l.descriptor.name,
                        offset: l.descriptor.data_offset,
                        length: l.descriptor.length,
                    }).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&info)?);
                return Ok(());
            }

            println!("── WAD ──────────────────────────────────────────────────");
            println!("  Path             {}", input.display());
            println!("  Type             {}", header.tag_lossy());
            println!("  Lumps            {}", header.lump_count);
            println!("  Directory offset {} B", header.directory_offset);
            println!("  Maps             {}", wad.map_names().len());
            println!();
            println!("{:>5}  {:<8} {:>10} {:>10}", "#", "Name", "Offset", "Length");
            for (i, lump) in wad.lumps().iter().enumerate() {
                let d = &lump.descriptor;
                println!("{:>5}  {:<8} {:>10} {:>10}", i, d.name, d.data_offset, d.length);
            }
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default = if verbose { "wadtools=debug" } else { "wadtools=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
