//! VEX Log Reader CLI Application
//!
//! This is the command-line interface for the VEX SD card log reader.
//! It uses the vex-log-decoder library and adds:
//! - Log file discovery on the SD card directory
//! - Configuration (vex-log.toml)
//! - Parallel decoding of several files
//! - Text and JSON output

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use vex_log_decoder::{DecodedLine, Decoder, ACTIONS, DEVICES};

mod config;
mod files;
mod output;

use config::{AppConfig, OutputFormat};

/// VEX Log Reader - Decode robot controller SD card logs
#[derive(Parser, Debug)]
#[command(name = "vex-log")]
#[command(about = "Decode VEX robot controller SD card event logs", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (default: ./vex-log.toml if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one or more log files
    Decode {
        /// Log file(s) to decode
        #[arg(value_name = "FILE", required_unless_present = "stdin")]
        files: Vec<PathBuf>,

        /// Read records from standard input
        #[arg(long, conflicts_with = "files")]
        stdin: bool,

        /// Output format (default from config, else text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file for decoded lines (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Exit with an error if any record failed to decode
        #[arg(long)]
        strict: bool,

        /// Do not print per-file headers
        #[arg(long)]
        no_header: bool,
    },

    /// Decode a single record
    Line {
        /// The raw record, e.g. 0000000000000P12EX1
        record: String,
    },

    /// List log files in the log directory
    List {
        /// Directory to scan (default from config)
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show the device registry
    Devices,

    /// Show the action registry
    Actions,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("VEX Log Reader CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", vex_log_decoder::VERSION);

    let config = config::resolve_config(args.config.as_deref())?;
    let decoder = Decoder::new();

    match &args.command {
        Command::Decode {
            files,
            stdin,
            format,
            output,
            strict,
            no_header,
        } => {
            let format = format.unwrap_or(config.output.format);
            let header = config.output.header && !no_header;
            let mut out = open_output(output.as_deref())?;

            let invalid = if *stdin {
                decode_stdin(&decoder, &mut out, format)?
            } else {
                decode_files(&decoder, files, &mut out, format, header)?
            };
            out.flush()?;

            if *strict && invalid > 0 {
                bail!("{} record(s) failed to decode", invalid);
            }
        }
        Command::Line { record } => {
            let decoded = decoder
                .decode_line(record)
                .with_context(|| format!("Failed to decode record {:?}", record))?;
            println!("{}", decoded);
        }
        Command::List { dir } => list_mode(&config, dir.as_deref())?,
        Command::Devices => {
            for (code, name) in DEVICES {
                println!("{}  {}", code, name);
            }
        }
        Command::Actions => {
            for (code, description) in ACTIONS {
                println!("{}  {}", code, description);
            }
        }
    }

    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Decode files in parallel, print them in argument order
///
/// Returns the number of isolated invalid records. A file that cannot be
/// read stops the run after the files before it have been printed.
fn decode_files(
    decoder: &Decoder,
    files: &[PathBuf],
    out: &mut dyn Write,
    format: OutputFormat,
    header: bool,
) -> Result<usize> {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| {
            log::info!("Decoding log file: {:?}", path);
            decoder.decode_file_records(path)
        })
        .collect();

    let show_headers = header && files.len() > 1;
    let mut invalid = 0;

    for (idx, (path, result)) in files.iter().zip(results).enumerate() {
        let lines = result.with_context(|| format!("Failed to decode {}", path.display()))?;
        invalid += report_invalid(&path.display().to_string(), &lines);

        if show_headers {
            output::write_header(out, &path.display().to_string(), idx == 0)?;
        }
        output::write_lines(out, &lines, format)?;
    }

    Ok(invalid)
}

fn decode_stdin(decoder: &Decoder, out: &mut dyn Write, format: OutputFormat) -> Result<usize> {
    let lines = decoder
        .decode_reader(io::stdin().lock())
        .context("Failed to read standard input")?;
    let invalid = report_invalid("<stdin>", &lines);
    output::write_lines(out, &lines, format)?;
    Ok(invalid)
}

fn report_invalid(source: &str, lines: &[DecodedLine]) -> usize {
    let mut invalid = 0;
    for line in lines {
        if let DecodedLine::Invalid { raw, reason } = line {
            log::warn!("{}: invalid record {:?}: {}", source, raw, reason);
            invalid += 1;
        }
    }
    log::debug!("{}: {} line(s), {} invalid", source, lines.len(), invalid);
    invalid
}

fn list_mode(config: &AppConfig, dir: Option<&Path>) -> Result<()> {
    let dir = dir.unwrap_or(config.log_dir.as_path());
    for path in files::list_log_files(dir, &config.extension)? {
        match path.file_name() {
            Some(name) => println!("{}", name.to_string_lossy()),
            None => println!("{}", path.display()),
        }
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
