//! lintrc CLI
//!
//! Command-line interface for inspecting and resolving lint configuration profiles

mod commands;
mod output;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use lintrc_core::init_tracing;
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintrc")]
#[command(about = "lintrc: resolve layered lint configuration profiles")]
#[command(version = lintrc_core::VERSION)]
#[command(
    long_about = "lintrc merges lint configuration profiles, their extension chains and\n\
path-scoped overrides into the effective configuration for a file.\n\
\n\
Examples:\n  \
lintrc profiles                          # List registered profiles\n  \
lintrc chain backend                     # Show the extension chain of a profile\n  \
lintrc resolve react-native src/App.tsx  # Effective config for a file\n  \
lintrc check frontend src/App.jsx        # Validate rules against a plugin catalog\n  \
lintrc config validate .lintrc.json      # Validate a profile file"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Additional profile directories
    #[arg(
        short,
        long = "profiles",
        global = true,
        help = "Directory of profile files to register (can be used multiple times)"
    )]
    profiles: Vec<PathBuf>,

    /// Plugin catalog file
    #[arg(
        long,
        global = true,
        help = "Plugin catalog (JSON/JSONC/YAML) providing plugin rules and shareable configs"
    )]
    plugins: Option<PathBuf>,

    /// Skip the bundled profiles
    #[arg(long, global = true, help = "Do not register the bundled profiles")]
    no_builtin: bool,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Number of threads to use for parallel resolution
    #[arg(
        short = 'j',
        long,
        global = true,
        help = "Number of threads (default: number of CPU cores)"
    )]
    threads: Option<usize>,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a profile for one or more files
    Resolve {
        /// Profile id
        #[arg(help = "Profile id to resolve")]
        profile: String,

        /// Target files
        #[arg(required = true, help = "Target file paths (need not exist)")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human", help = "Output format")]
        format: OutputFormat,
    },

    /// Show the extension chain of a profile in merge order
    Chain {
        #[arg(help = "Profile id")]
        profile: String,
    },

    /// List registered profiles
    #[command(alias = "ls")]
    Profiles,

    /// Validate the resolved rules against the plugin catalog
    Check {
        #[arg(help = "Profile id to resolve")]
        profile: String,

        #[arg(required = true, help = "Target file paths")]
        paths: Vec<PathBuf>,
    },

    /// Profile file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the JSON Schema of the profile format
    Schema,

    /// Show version information
    #[command(alias = "ver")]
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a profile file
    Validate {
        #[arg(help = "Path to profile file (default: search for .lintrc.*)")]
        path: Option<PathBuf>,
    },

    /// Show a profile file, optionally resolved for a target file
    Show {
        #[arg(help = "Path to profile file (default: search for .lintrc.*)")]
        path: Option<PathBuf>,

        /// Resolve the directory cascade for this target file
        #[arg(long, value_name = "FILE", help = "Show resolved configuration for a target file")]
        resolved: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON for programmatic consumption
    Json,
    /// YAML
    Yaml,
}

/// Registry sources selected by the global flags
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    pub profile_dirs: Vec<PathBuf>,
    pub plugins: Option<PathBuf>,
    pub builtin: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return;
    }

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    // Initialize tracing based on verbosity unless RUST_LOG is set
    if std::env::var_os("RUST_LOG").is_none() {
        let log_level = match cli.verbose {
            0 => "lintrc=error",
            1 => "lintrc=warn",
            2 => "lintrc=info",
            3 => "lintrc=debug",
            _ => "lintrc=trace",
        };
        unsafe {
            std::env::set_var("RUST_LOG", log_level);
        }
    }
    init_tracing();

    if let Some(threads) = cli.threads
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
    {
        error!("Failed to set thread pool size: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run_command(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    let options = RegistryOptions {
        profile_dirs: cli.profiles,
        plugins: cli.plugins,
        builtin: !cli.no_builtin,
    };

    match cli.command {
        Some(Commands::Resolve {
            profile,
            paths,
            format,
        }) => commands::resolve_command(&options, &profile, &paths, format),

        Some(Commands::Chain { profile }) => commands::chain_command(&options, &profile),

        Some(Commands::Profiles) => commands::profiles_command(&options),

        Some(Commands::Check { profile, paths }) => {
            commands::check_command(&options, &profile, &paths)
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Validate { path } => commands::config::validate_command(path),
            ConfigAction::Show { path, resolved } => {
                commands::config::show_command(&options, path, resolved)
            }
        },

        Some(Commands::Schema) => commands::schema_command(),

        Some(Commands::Version) => {
            println!("{} {}", lintrc_core::NAME, lintrc_core::VERSION);
            Ok(())
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
