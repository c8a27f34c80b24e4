mod cli;

use std::error::Error;
use std::io::BufRead;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser as _;
use itertools::Itertools;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::{Cli, Command};
use shino::engine::Parser;
use shino::error_handling::Location;
use shino::grammar::Grammar;
use shino::{generator, loader};

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn load(file: &Path, start: Option<String>) -> Result<Grammar> {
    let mut grammar = loader::parse_file(file)?;
    if let Some(start) = start {
        grammar = grammar.with_start(start);
    }

    for error in loader::verify_rules(&grammar, &Location::in_file(file.to_path_buf(), 0)) {
        warn!("{}", error);
    }
    Ok(grammar)
}

// Parses each non-blank line of stdin, reporting failures without stopping
fn parse_stdin(parser: &dyn Parser) -> Result<()> {
    let mut failures = 0;
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let tokens = line.split_whitespace().collect_vec();
        if tokens.is_empty() {
            continue;
        }

        match parser.parse(&tokens) {
            Ok(tree) => println!("{}", tree),
            Err(error) => {
                eprintln!("{}: {}", line.trim(), error);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} sentence(s) failed to parse", failures).into());
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse { file, sentence, strategy, start } => {
            let grammar = load(&file, start)?;
            let parser = strategy.parser(&grammar);
            info!("parsing with {:?}", strategy);

            match sentence {
                Some(sentence) => println!("{}", parser.parse(&sentence.split_whitespace().collect_vec())?),
                None => parse_stdin(parser.as_ref())?,
            }
        }
        Command::Generate { file, start, amount, seed } => {
            let grammar = load(&file, start)?;
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            for _ in 0..amount.unwrap_or(1) {
                println!("{}", generator::generate(&grammar, &mut rng)?.join(" "));
            }
        }
        Command::Check { file } => {
            let grammar = loader::parse_file(&file)?;
            print!("{}", grammar);

            let errors = loader::verify_rules(&grammar, &Location::in_file(file.clone(), 0));
            for error in &errors {
                eprintln!("{}", error);
            }
            if !errors.is_empty() {
                return Err(format!("{} undefined nonterminal(s)", errors.len()).into());
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
