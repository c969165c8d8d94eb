use clap::Parser;
use codetok::io::{keywords_path, save_json, token_lists_path};
use codetok::keywords::builder::DEFAULT_MAX_KEYWORDS;
use codetok::keywords::{KeywordOptions, find_frequent_tokens, suffixes_for_langs};
use std::path::PathBuf;

/// Analyze and tokenize source code files into a keyword vocabulary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Paths to find source code in.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Languages or file suffixes, comma separated; `c`, `cpp` and `py` are known languages.
    #[arg(short, long, value_delimiter = ',', default_value = "py")]
    pub langs: Vec<String>,

    /// Number of keywords to keep.
    #[arg(short, long, default_value_t = DEFAULT_MAX_KEYWORDS)]
    pub num: usize,

    /// Keep every token seen at least this often; `--num` is then ignored.
    #[arg(short, long)]
    pub min_count: Option<u64>,

    /// Output file prefix.
    #[arg(short, long = "outfile-prefix", default_value = "keywords")]
    pub outfile_prefix: String,

    /// Skip writing the per-file token lists.
    #[arg(long, default_value = "false")]
    pub no_token_lists: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
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

    let options = KeywordOptions::default()
        .with_suffixes(suffixes_for_langs(&args.langs))
        .with_max_keywords(args.num)
        .with_min_count(args.min_count)
        .with_keep_token_lists(!args.no_token_lists);

    let results = find_frequent_tokens(&args.paths, options)?;
    let vocab_size = results.vocab.len();

    let path = keywords_path(&args.outfile_prefix, vocab_size);
    save_json(&results.vocab, &path)?;
    log::info!("result written to file {}", path.display());

    if let Some(token_lists) = &results.token_lists {
        let path = token_lists_path(&args.outfile_prefix, token_lists.len(), vocab_size);
        save_json(token_lists, &path)?;
        log::info!("training data written to file {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let args = Args::parse_from(["codetok-keywords", "src"]);
        assert_eq!(args.langs, vec!["py"]);
        assert_eq!(args.num, 1000);
        assert_eq!(args.min_count, None);
        assert_eq!(args.outfile_prefix, "keywords");

        let args = Args::parse_from(["codetok-keywords", "a", "b", "-l", "c,py", "-n", "50", "-m", "3", "-o", "out/kw"]);
        assert_eq!(args.paths, vec![PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.langs, vec!["c", "py"]);
        assert_eq!(args.num, 50);
        assert_eq!(args.min_count, Some(3));
        assert_eq!(args.outfile_prefix, "out/kw");

        assert!(Args::try_parse_from(["codetok-keywords"]).is_err());
    }
}
