use chordshift::{retune_sheet, transpose_chord_sheet, Key, TransposeConfig, TransposeError};
use clap::Parser;
use env_logger::Builder as LoggerBuilder;
use log::LevelFilter;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Transpose the chords in a chord sheet
#[derive(Parser, Debug)]
#[command(name = "chordshift", version)]
struct Args {
    /// Chord sheet to read
    input: PathBuf,

    /// Where to write the result (stdout if omitted)
    output: Option<PathBuf>,

    /// Key the sheet is written in (defaults to the sheet's `Key:` header)
    #[arg(long)]
    from: Option<Key>,

    /// Key the chords should sound in (defaults to the source key)
    #[arg(long)]
    to: Option<Key>,

    /// Capo fret
    #[arg(long)]
    capo: Option<u32>,

    /// YAML file with source-key, target-key, capo, update-header
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also rewrite the `Key:`, `(AG:)` and `Capo:` header fields
    #[arg(long)]
    update_header: bool,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_env_logger(log_level_filter: LevelFilter) {
    let mut logger_builder = LoggerBuilder::new();
    logger_builder.filter(None, log_level_filter);

    if let Ok(rust_log) = env::var("RUST_LOG") {
        logger_builder.parse_filters(&rust_log);
    }

    logger_builder.init();
}

fn init_env_logger_verbosity(verbosity_level: u8) {
    let log_level_filter = match verbosity_level {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    init_env_logger(log_level_filter);
}

fn merge_config(args: &Args) -> Result<TransposeConfig, TransposeError> {
    let mut config = match &args.config {
        Some(path) => TransposeConfig::load(path)?,
        None => TransposeConfig::default(),
    };
    if args.from.is_some() {
        config.source_key = args.from;
    }
    if args.to.is_some() {
        config.target_key = args.to;
    }
    if let Some(capo) = args.capo {
        config.capo = capo;
    }
    config.update_header |= args.update_header;
    Ok(config)
}

fn transpose(sheet: &str, config: &TransposeConfig) -> Result<String, TransposeError> {
    let (source, target) = config.resolve(sheet)?;
    log::info!("Transposing from {} to {} with capo {}", source, target, config.capo);

    let (source, target) = (source.to_string(), target.to_string());
    let result = if config.update_header {
        retune_sheet(sheet, &source, &target, config.capo)
    } else {
        transpose_chord_sheet(sheet, &source, &target, (config.capo % 12) as i32)
    };
    Ok(result)
}

fn run(args: &Args) -> Result<(), TransposeError> {
    let config = merge_config(args)?;
    let bytes = fs::read(&args.input)?;

    let output = match String::from_utf8(bytes) {
        Ok(sheet) => transpose(&sheet, &config)?.into_bytes(),
        Err(e) => {
            let err = TransposeError::MalformedInput(format!(
                "'{}' is not valid UTF-8",
                args.input.display()
            ));
            log::warn!("{}; copying it through unchanged", err);
            e.into_bytes()
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            eprintln!("Wrote chord sheet to {}", path.display());
        }
        None => io::stdout().write_all(&output)?,
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_env_logger_verbosity(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
