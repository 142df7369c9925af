mod config;
mod normalizer;
mod output;
mod parser;

use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use std::fs::File;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file to normalize
    #[arg(value_name = "FILE")]
    file: String,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let output_path = run(&args)?;
    println!("Created normalized csv: {output_path}");
    Ok(())
}

fn run(args: &Args) -> Result<String> {
    let file = File::open(&args.file).with_context(|| format!("failed to open {}", args.file))?;
    let metadata = file.metadata()?;

    // mmap the file; the OS rejects zero-length maps
    let mmap;
    let input: &str = if metadata.len() == 0 {
        ""
    } else {
        mmap = unsafe { Mmap::map(&file)? };
        std::str::from_utf8(&mmap)
            .with_context(|| format!("{} is not valid UTF-8", args.file))?
    };

    let records = parser::parse(input);
    tracing::debug!("parsed {} rows from {}", records.len(), args.file);

    let records = normalizer::normalize(records);

    let output_path = output::write_normalized(&args.file, &records)
        .with_context(|| format!("failed to write {}", output::output_filename(&args.file)))?;
    tracing::info!("normalized {} rows into {}", records.len(), output_path);

    Ok(output_path)
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "csvnorm=debug,info"
    } else {
        "csvnorm=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // logs go to stderr so stdout stays a single confirmation line
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
