//! CLI binary entry point for catalog-ingest-cli

#[cfg(feature = "cli")]
use catalog_ingest_sdk::cli::CliError;
#[cfg(feature = "cli")]
use catalog_ingest_sdk::cli::commands::config::{handle_config_init, handle_config_show};
#[cfg(feature = "cli")]
use catalog_ingest_sdk::cli::commands::ingest::{DEFAULT_INPUT, IngestArgs, handle_ingest};
#[cfg(feature = "cli")]
use catalog_ingest_sdk::cli::commands::ping::{PingArgs, handle_ping};
#[cfg(feature = "cli")]
use catalog_ingest_sdk::cli::commands::suites::{
    SuitesRunArgs, handle_suites_list, handle_suites_run,
};
#[cfg(feature = "cli")]
use catalog_ingest_sdk::cli::commands::transform::{OutputFormat, TransformArgs, handle_transform};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "catalog-ingest-cli")]
#[command(about = "Ingest DCAT catalogs into DataHub and manage data quality suites")]
#[command(version)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory containing .catalog-ingest.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Transform a DCAT catalog and emit it to DataHub
    Ingest {
        /// DCAT JSON file
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// Write events to a JSON file instead of DataHub
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// DataHub GMS endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Data platform used in dataset URNs
        #[arg(long)]
        platform: Option<String>,
        /// Environment tag used in dataset URNs
        #[arg(long)]
        env: Option<String>,
        /// Domain for the domain aspect and browse paths
        #[arg(long)]
        domain: Option<String>,
    },
    /// Print the metadata events for a DCAT catalog without emitting
    Transform {
        /// DCAT JSON file
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: FormatArg,
    },
    /// Check that DataHub GMS is reachable
    Ping {
        /// DataHub GMS endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
    /// Expectation suite commands
    Suites {
        #[command(subcommand)]
        command: SuitesCommands,
    },
    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum SuitesCommands {
    /// List validation modules
    List {
        /// List archived modules instead
        #[arg(long)]
        archived: bool,
    },
    /// Register suites and print their batch requests
    Run {
        /// Module names (tbl_<table>_validation or <table>)
        names: Vec<String>,
        /// Run every module
        #[arg(long)]
        all: bool,
        /// Run archived modules
        #[arg(long)]
        archived: bool,
        /// Suite store root (default: from config)
        #[arg(long)]
        store_dir: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum ConfigCommands {
    /// Write a sample configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Json,
    Yaml,
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
async fn run(cli: Cli) -> Result<(), CliError> {
    let config_dir = cli.config_dir;

    match cli.command {
        Commands::Ingest {
            input,
            output,
            endpoint,
            platform,
            env,
            domain,
        } => {
            let args = IngestArgs {
                input,
                output,
                endpoint,
                platform,
                env,
                domain,
                config_dir,
            };
            handle_ingest(&args).await
        }
        Commands::Transform { input, format } => {
            let args = TransformArgs {
                input,
                format: match format {
                    FormatArg::Json => OutputFormat::Json,
                    FormatArg::Yaml => OutputFormat::Yaml,
                },
                config_dir,
            };
            handle_transform(&args)
        }
        Commands::Ping { endpoint } => {
            handle_ping(&PingArgs {
                endpoint,
                config_dir,
            })
            .await
        }
        Commands::Suites { command } => match command {
            SuitesCommands::List { archived } => handle_suites_list(archived),
            SuitesCommands::Run {
                names,
                all,
                archived,
                store_dir,
            } => {
                let args = SuitesRunArgs {
                    names,
                    all,
                    archived,
                    store_dir,
                    config_dir,
                };
                handle_suites_run(&args)
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Init { force } => handle_config_init(&config_dir, force),
            ConfigCommands::Show => handle_config_show(&config_dir),
        },
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}
