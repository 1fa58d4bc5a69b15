use clap::Parser;
use crossings_core::search::{find_all_crossings, SearchConfig};
use crossings_core::word_list::{WordList, WordListSourceConfig};
use crossings_core::RequiredWords;
use std::fmt::{Debug, Formatter};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

/// crossings: find pairs of entries that can cross each other symmetrically
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a word list file, one entry per line (anything after a `;` is ignored)
    wordlist: String,

    /// Only report multicrossings using this word (may be given more than once)
    #[arg(long = "require", value_name = "WORD")]
    required_words: Vec<String>,

    /// Skip entries longer than this
    #[arg(long)]
    max_length: Option<usize>,

    /// Search word length combinations in parallel
    #[arg(long)]
    parallel: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

struct Error(String);

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0) // Print error unquoted
    }
}

fn setup_logging(verbosity: u8, quiet: bool) {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    setup_logging(args.verbose, args.quiet);

    let word_list = WordList::new(
        vec![WordListSourceConfig::File {
            id: "0".into(),
            path: args.wordlist.into(),
        }],
        args.max_length,
    );

    #[allow(clippy::comparison_chain)]
    if let Some(errors) = word_list.get_source_errors().get("0") {
        if errors.len() == 1 {
            return Err(Error(format!("{}", errors[0])));
        } else if errors.len() > 1 {
            let mut full_error: String = "".into();
            for error in errors {
                full_error.push_str(&format!("\n- {error}"));
            }
            return Err(Error(full_error));
        }
    }

    if word_list.is_empty() {
        return Err(Error("Word list is empty".into()));
    }

    let config = SearchConfig {
        required_words: RequiredWords::new(&args.required_words),
        parallel: args.parallel,
    };

    let result =
        find_all_crossings(&word_list, &config).map_err(|error| Error(error.to_string()))?;

    info!("{:?}", result.statistics);

    for multicrossing in &result.multicrossings {
        println!("{multicrossing}");
    }

    Ok(())
}
