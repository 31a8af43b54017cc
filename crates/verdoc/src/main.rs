// Copyright 2026 Oxide Computer Company

//! The verdoc command-line tool.

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use verdoc::{BuildOptions, CommandBuilder};

/// Log levels.
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "verdoc",
    about = "Multi-version documentation builds driven by git branches and tags",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Set log level
    #[clap(long, default_value = "info", global = true)]
    log_level: LogLevel,
}

#[derive(Parser, Debug)]
enum Command {
    /// Build documentation for every qualifying branch and tag
    Build {
        /// Local clone of the repository to document
        repo: Utf8PathBuf,

        /// Directory the built documentation is assembled into
        output: Utf8PathBuf,

        /// File a ref must contain to qualify (repeatable)
        #[clap(long = "required-file", default_value = "conf.py")]
        required_files: Vec<String>,

        /// Ref whose documentation lands at the top of the output
        #[clap(long, default_value = "master")]
        root_ref: String,

        /// Renderer command to run over each version
        #[clap(long, default_value = "sphinx-build")]
        builder: String,

        /// Extra renderer argument (repeatable; defaults to "-b html")
        #[clap(long = "builder-arg")]
        builder_args: Vec<String>,

        /// Keep exported trees here instead of a temporary directory
        #[clap(long)]
        export_root: Option<Utf8PathBuf>,
    },
}

/// Initialize tracing from the --log-level flag.
fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::new(log_level.to_filter_directive());

    // Logs go to stderr; stdout is reserved for the URL listing.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    match cli.command {
        Command::Build {
            repo,
            output,
            required_files,
            root_ref,
            builder,
            builder_args,
            export_root,
        } => build_command(
            repo,
            output,
            required_files,
            root_ref,
            builder,
            builder_args,
            export_root,
        ),
    }
}

fn build_command(
    repo: Utf8PathBuf,
    output: Utf8PathBuf,
    required_files: Vec<String>,
    root_ref: String,
    builder: String,
    builder_args: Vec<String>,
    export_root: Option<Utf8PathBuf>,
) -> Result<()> {
    let mut options = BuildOptions::new(repo, output)
        .required_files(required_files.clone())
        .root_ref(root_ref);
    if let Some(export_root) = export_root {
        options = options.export_root(export_root);
    }

    let builder_args = if builder_args.is_empty() {
        vec!["-b".to_string(), "html".to_string()]
    } else {
        builder_args
    };
    let mut command = CommandBuilder::new(builder).args(builder_args);
    if let Some(config_file) = required_files
        .first()
        .and_then(|marker| Utf8Path::new(marker).file_name())
    {
        command = command.config_file(config_file);
    }

    let summary = verdoc::run(&options, &command)?;

    for version in &summary.versions {
        println!("{}", version.url);
    }

    Ok(())
}
