use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};

use compact_index::config::{self, IndexConfig};
use compact_index::index::store::VersionsListStore;

#[derive(Parser)]
#[command(name = "compact-index")]
#[command(version, about = "Generate and update compact index versions lists")]
struct Cli {
    /// JSON configuration file
    #[arg(long, conflicts_with = "versions_file")]
    config: Option<PathBuf>,

    /// Path of the versions list
    #[arg(long)]
    versions_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the versions list from scratch
    Create {
        /// JSON array of package entries
        #[arg(long)]
        input: PathBuf,
    },
    /// Append package lines to the existing versions list
    Update {
        #[arg(long)]
        input: PathBuf,
    },
    /// Create the versions list if missing or empty, append otherwise
    UpdateOrCreate {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the versions list, optionally with extra package lines
    Contents {
        #[arg(long)]
        extra: Option<PathBuf>,
        #[arg(long)]
        calculate_checksums: bool,
    },
    /// Print the created_at timestamp of the versions list
    UpdatedAt,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = compact_index::log::init()?;

    let index_config = match (&cli.config, &cli.versions_file) {
        (Some(path), _) => IndexConfig::load(path)?,
        (None, Some(versions_file)) => IndexConfig::new(versions_file),
        (None, None) => bail!("either --config or --versions-file is required"),
    };
    let store = VersionsListStore::new(&index_config.versions_file);

    match cli.command {
        Command::Create { input } => store.create(&config::load_entries(&input)?)?,
        Command::Update { input } => store.update(&config::load_entries(&input)?)?,
        Command::UpdateOrCreate { input } => {
            store.update_or_create(&config::load_entries(&input)?)?
        }
        Command::Contents {
            extra,
            calculate_checksums,
        } => {
            let extra = match extra {
                Some(path) => config::load_entries(&path)?,
                None => Vec::new(),
            };
            let contents = store
                .contents(&extra, calculate_checksums || index_config.calculate_checksums)
                .with_context(|| format!("reading {:?}", index_config.versions_file))?;
            print!("{}", contents);
        }
        Command::UpdatedAt => {
            println!(
                "{}",
                store
                    .updated_at()
                    .to_rfc3339_opts(SecondsFormat::Secs, false)
            );
        }
    }

    Ok(())
}
