//! Build a DFA from a program listing.
//!
//! Usage: `regex-dfa <PROGRAM> [--state-limit N] [--dump]`

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info};

use regex_dfa::{Builder, Config, Program, STATE_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "regex-dfa")]
#[command(about = "Compile a byte program listing into a DFA")]
struct Args {
    /// Path to the program listing, one instruction per line
    program: PathBuf,

    /// Fail once the DFA holds more than this many states
    #[arg(long, default_value_t = STATE_LIMIT)]
    state_limit: usize,

    /// Print every state and its transitions
    #[arg(long)]
    dump: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let listing = match fs::read_to_string(&args.program) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to read {}: {}", args.program.display(), e);
            process::exit(1);
        }
    };
    let program: Program = match listing.parse() {
        Ok(p) => p,
        Err(e) => {
            error!("{}: {}", args.program.display(), e);
            process::exit(1);
        }
    };

    let config = Config::default().state_limit(args.state_limit);
    let dfa = match Builder::with_config(program, config).build() {
        Ok(dfa) => dfa,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    info!(states = dfa.len(), "dfa built");
    if args.dump {
        print!("{}", dfa);
    } else {
        println!("{}", dfa.len());
    }
}
