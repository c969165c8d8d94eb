use clap::Parser;
use codetok::datagen::{DEFAULT_OUTPUT_PREFIX, DataGenConfig, generate_training_data};
use codetok::windows::{DEFAULT_WINDOW_SIZE, OffsetPolicy, WindowOptions};
use std::path::PathBuf;

/// Generate sliding-window training pairs from keywords and token lists.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the keyword file.
    #[arg(value_name = "KEYWORD_FILE")]
    pub keyword_file: PathBuf,

    /// Path to the token lists file.
    #[arg(value_name = "TOKEN_LISTS_FILE")]
    pub token_lists_file: PathBuf,

    /// Window size of the generated training examples.
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Keep non-keyword ids as-is instead of renumbering them per window.
    #[arg(short = 'm', long, default_value = "false")]
    pub no_remap: bool,

    /// Number renumbered non-keywords by discovery order instead of first position.
    #[arg(short = 'i', long, default_value = "false")]
    pub discovery_order: bool,

    /// Output file prefix.
    #[arg(short, long = "outfile-prefix", default_value = DEFAULT_OUTPUT_PREFIX)]
    pub outfile_prefix: String,

    /// Rng seed, for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable verbose output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Args {
    fn window_options(&self) -> WindowOptions {
        let offset_policy = if self.discovery_order {
            OffsetPolicy::Discovery
        } else {
            OffsetPolicy::Position
        };
        WindowOptions::default()
            .with_window_size(self.window_size)
            .with_remap(!self.no_remap)
            .with_offset_policy(offset_policy)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .format_target(false)
        .format_timestamp(None)
        .filter_level(level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    log::debug!("{args:#?}");

    let config = DataGenConfig::new(&args.keyword_file, &args.token_lists_file)
        .with_output_prefix(args.outfile_prefix.clone())
        .with_window(args.window_options())
        .with_seed(args.seed);

    let summary = generate_training_data(&config)?;
    log::debug!("{summary:#?}");

    Ok(())
}
