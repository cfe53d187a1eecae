//! oxide-ddl CLI
//!
//! Command-line tool for formatting and rewriting DDL scripts.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::{check_inputs, format_inputs, read_inputs, rewrite_inputs, tree_inputs, Rendered};
use oxide_ddl_core::{FormatSettings, Layout};

/// Formatter and cluster rewriter for CREATE / ATTACH DDL.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write each statement on a single line.
    #[arg(long, global = true, env = "OXIDE_DDL_ONE_LINE")]
    one_line: bool,

    /// Highlight keywords with ANSI escapes.
    #[arg(long, global = true, env = "OXIDE_DDL_HIGHLIGHT")]
    highlight: bool,

    /// Spaces per indentation level.
    #[arg(long, global = true, env = "OXIDE_DDL_INDENT", default_value_t = 4)]
    indent: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical text of every statement.
    Fmt {
        /// Input files (standard input if none).
        files: Vec<PathBuf>,
    },

    /// Verify that format -> parse -> format is stable.
    Check {
        /// Input files (standard input if none).
        files: Vec<PathBuf>,
    },

    /// Remove ON CLUSTER and retarget statements at another database.
    Rewrite {
        /// Database the statements are moved to.
        #[arg(short, long)]
        database: String,

        /// Input files (standard input if none).
        files: Vec<PathBuf>,
    },

    /// Dump node identities.
    Tree {
        /// Print JSON instead of an indented dump.
        #[arg(long)]
        json: bool,

        /// Input files (standard input if none).
        files: Vec<PathBuf>,
    },
}

impl Cli {
    fn format_settings(&self) -> FormatSettings {
        let layout = if self.one_line {
            Layout::OneLine
        } else {
            Layout::MultiLine
        };
        FormatSettings::new()
            .with_layout(layout)
            .with_highlight(self.highlight)
            .with_indent_unit(self.indent)
    }
}

fn print_rendered(rendered: &Rendered) -> anyhow::Result<()> {
    if rendered.credentials_written {
        warn!("Output contains a plain-text dictionary password");
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = cli.format_settings();
    debug!(?settings, "format settings");

    match &cli.command {
        Commands::Fmt { files } => {
            let inputs = read_inputs(files)?;
            print_rendered(&format_inputs(&inputs, &settings)?)?;
        }

        Commands::Check { files } => {
            let inputs = read_inputs(files)?;
            check_inputs(&inputs, &settings)?;
        }

        Commands::Rewrite { database, files } => {
            let inputs = read_inputs(files)?;
            print_rendered(&rewrite_inputs(&inputs, database, &settings)?)?;
        }

        Commands::Tree { json, files } => {
            let inputs = read_inputs(files)?;
            let out = tree_inputs(&inputs, *json)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(out.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
