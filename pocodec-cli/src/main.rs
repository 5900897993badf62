use clap::{Parser, Subcommand};
use pocodec_cli::{
    ExportOptions, ImportOptions, run_detect_command, run_export_command, run_import_command,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Import one language from a PO file into a catalog.
    Import {
        /// The JSON catalog to update (created if missing)
        #[arg(short, long)]
        catalog: String,

        /// The PO file to read
        #[arg(short, long)]
        input: String,

        /// Language code of the input (inferred from the file name if omitted)
        #[arg(short, long)]
        lang: Option<String>,

        /// Input codec: UTF-8, UTF-16LE or UTF-16BE (detected if omitted)
        #[arg(long)]
        encoding: Option<String>,

        /// Ignore `#.` comments in the input
        #[arg(long)]
        no_comments: bool,
    },

    /// Export one language of a catalog to a PO file.
    Export {
        /// The JSON catalog to read
        #[arg(short, long)]
        catalog: String,

        /// The PO file (or directory) to write
        #[arg(short, long)]
        output: String,

        /// Language code to export (inferred from the file name, then the base language)
        #[arg(short, long)]
        lang: Option<String>,

        /// Only export rows carrying one of these tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Also export rows without tags when filtering by tag
        #[arg(long)]
        untagged: bool,

        /// Output codec: UTF-8, UTF-16LE or UTF-16BE
        #[arg(long)]
        encoding: Option<String>,

        /// Skip rows with no translation instead of writing the base language
        #[arg(long)]
        no_fallback: bool,
    },

    /// Check whether a directory holds PO files.
    Detect {
        /// The directory to inspect
        dir: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Import {
            catalog,
            input,
            lang,
            encoding,
            no_comments,
        } => run_import_command(ImportOptions {
            catalog,
            input,
            lang,
            encoding,
            consume_comments: !no_comments,
        }),
        Commands::Export {
            catalog,
            output,
            lang,
            tags,
            untagged,
            encoding,
            no_fallback,
        } => run_export_command(ExportOptions {
            catalog,
            output,
            lang,
            tags,
            include_untagged: untagged,
            encoding,
            fallback_to_base: !no_fallback,
        }),
        Commands::Detect { dir } => run_detect_command(&dir).map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
