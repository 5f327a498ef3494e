use anyhow::{Context, Result};
use log::*;
use structopt::StructOpt;

use pwfz::{ClipboardCommand, Config, Fzf, Outcome, PassworkClient};

/// Search Passwork, pick an entry with fzf and copy its password.
///
/// Configured through PASSWORK_BASE_URL, PASSWORK_API_KEY, FZF_BIN and CLIP_BIN.
#[derive(Debug, StructOpt)]
#[structopt(name = "pwfz")]
struct Opt {
    /// More logging on stderr (-v debug, -vv trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Search query; words are joined with spaces, none matches everything
    query: Vec<String>,
}

fn main() {
    let opt = Opt::from_args();
    init_logging(opt.verbose);

    if let Err(e) = try_main(&opt.query.join(" ")) {
        eprintln!("pwfz: {:#}", e);
        std::process::exit(1);
    }
}

fn try_main(query: &str) -> Result<()> {
    let config = Config::from_env().context("invalid configuration")?;
    debug!("Using {:?}", config);

    let client = PassworkClient::new(&config.base_url)?;
    let session = client.login(&config.api_key)?;
    let fzf = Fzf::new(&config.fzf_bin);
    let clipboard = Lazy(config.clip_bin.as_deref());

    match pwfz::run(&session, query, &fzf, &clipboard)? {
        Outcome::NoMatches => eprintln!("no passwords found for query {:?}", query),
        Outcome::NoUsableEntries => eprintln!("no usable password entries"),
        Outcome::Cancelled => debug!("Nothing selected"),
        Outcome::Copied { name } => println!("Copied password for {:?} to clipboard.", name),
    }
    Ok(())
}

/// Looks for a clipboard program only once there's something to copy.
struct Lazy<'a>(Option<&'a [String]>);

impl pwfz::Clipboard for Lazy<'_> {
    fn copy(&self, text: &str) -> pwfz::Result<()> {
        let command = ClipboardCommand::resolve(self.0)?;
        debug!("Copying with {:?}", command);
        command.copy(text)
    }
}

fn init_logging(verbose: u8) {
    let mut builder = pretty_env_logger::formatted_builder();
    match (verbose, std::env::var("RUST_LOG")) {
        (0, Ok(filters)) => {
            builder.parse_filters(&filters);
        }
        (0, Err(_)) => {
            builder.filter_level(LevelFilter::Warn);
        }
        (1, _) => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    if let Err(e) = builder.try_init() {
        eprintln!("pwfz: cannot set up logging: {}", e);
    }
}
