use std::env;
use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::{Context, Result};
use backtrack_grep::cli::Config;
use backtrack_grep::search::Searcher;
use backtrack_grep::Pattern;
use clap::error::ErrorKind;

// Parses the pattern, searches stdin or the given paths and prints matches.
fn run(config: &Config) -> Result<bool> {
    let pattern = Pattern::new(&config.pattern)
        .with_context(|| format!("invalid pattern '{}'", config.pattern))?;
    let searcher = Searcher::new(pattern);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let matched = searcher.run(config, io::stdin().lock(), &mut out)?;
    out.flush()?;
    Ok(matched)
}

// Usage: backtrack-grep [-r] -E <pattern> [path...]
fn main() {
    let config = match Config::try_parse_from(env::args_os()) {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    match run(&config) {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("backtrack-grep: {:#}", e);
            process::exit(2);
        }
    }
}
