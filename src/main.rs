use bundle_sizes::cmd::{self, ReportArgs};
use bundle_sizes::config::ConfigFile;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

/// Bundle output size tracker
///
/// bundle-sizes measures the compressed size of a bundler's output, compares
/// it with the previous build and keeps a history of size changes.
#[derive(Parser)]
#[command(author, version, about = "Bundle output size tracker", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure a build directory and report size changes
    Report {
        /// Build output directory
        #[arg(value_name = "DIR", default_value = "dist")]
        output_dir: PathBuf,

        /// Previous build output, used when no history exists
        #[arg(long, value_name = "DIR")]
        previous: Option<PathBuf>,

        /// Compression mode: none, gzip, brotli
        #[arg(short, long)]
        compression: Option<String>,

        /// Include glob for tracked files
        #[arg(short, long)]
        pattern: Option<String>,

        /// Exclude glob for tracked files
        #[arg(short, long)]
        exclude: Option<String>,

        /// History file, relative to the current directory
        #[arg(long, value_name = "FILE")]
        history_file: Option<String>,

        /// Do not read or write the history file
        #[arg(long)]
        no_write: bool,

        /// Build mode: production or development
        #[arg(short, long, default_value = "production")]
        mode: String,

        /// Minimum column width for single-file reports
        #[arg(long)]
        column_width: Option<usize>,

        /// Measure chunks with their source map comment appended
        #[arg(long)]
        source_map: bool,

        /// Publish sizes and diff feeds as JSON into this directory
        #[arg(long, value_name = "DIR")]
        publish_dir: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recorded size history
    History {
        /// History file, relative to the current directory
        #[arg(long, value_name = "FILE")]
        history_file: Option<String>,

        /// Show at most this many builds
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize bundle-sizes configuration
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match cli.command {
        Some(Commands::Report {
            output_dir,
            previous,
            compression,
            pattern,
            exclude,
            history_file,
            no_write,
            mode,
            column_width,
            source_map,
            publish_dir,
            json,
        }) => {
            let overrides = ConfigFile {
                compression,
                pattern,
                exclude,
                filename: history_file,
                write_file: no_write.then_some(false),
                publish: publish_dir.as_ref().map(|_| true),
                publish_dir,
                column_width,
                source_map: source_map.then_some(true),
                ..Default::default()
            };
            cmd::cmd_report(&ReportArgs {
                output_dir,
                previous_dir: previous,
                mode,
                json,
                overrides,
            })
        }
        Some(Commands::History {
            history_file,
            limit,
            json,
        }) => cmd::cmd_history(history_file.as_deref(), limit, json),
        Some(Commands::Init) => cmd::cmd_init(),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("bundle-sizes v{}", env!("CARGO_PKG_VERSION"));
            println!("Bundle output size tracker\n");
            println!("Usage: bundle-sizes <COMMAND>\n");
            println!("Commands:");
            println!("  report       Measure a build directory and report size changes");
            println!("  history      Show recorded size history");
            println!("  init         Initialize bundle-sizes configuration");
            println!("  completions  Generate shell completions");
            println!("\nRun 'bundle-sizes <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use bundle_sizes::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
