use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use errors::Diagnostics;
use itertools::Itertools;
use log::info;
use scanner::{Literal, Token};

const EXIT_USAGE: u8 = 64;
const EXIT_DATA_ERROR: u8 = 65;

#[derive(clap::Parser)]
#[command(about = "Scans and parses Lox expressions and prints them back")]
struct Args {
    /// What to print for each successfully processed input
    #[arg(long, value_enum, default_value_t = Emit::Lisp)]
    emit: Emit,

    /// Script to read. Without it, an interactive prompt is started.
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Emit {
    /// Parenthesized tree dump, e.g. `(+ 1 (group 2))`
    Lisp,
    /// Infix form with no spaces, e.g. `1+(2)`
    Infix,
    /// Reverse Polish (postfix) notation, e.g. `12+`
    Polish,
    /// One line per scanned token
    Tokens,
}

fn describe(token: &Token) -> String {
    let literal = match token.literal() {
        Some(Literal::Number(n)) => n.to_string(),
        Some(Literal::Str(s)) => s.to_string(),
        None => "null".to_string(),
    };
    format!("{} {} {}", token.kind(), token.lexeme, literal)
}

fn tokens(source: &str) -> Result<String, Diagnostics> {
    let scanned = scanner::scan(source);
    if scanned.diagnostics.had_error() {
        return Err(scanned.diagnostics);
    }
    Ok(scanned.tokens.iter().map(describe).join("\n"))
}

fn render(source: &str, emit: Emit) -> Result<String, Diagnostics> {
    let parse = || parser::parse_source(source);
    Ok(match emit {
        Emit::Tokens => tokens(source)?,
        Emit::Lisp => parse()?.to_string(),
        Emit::Infix => printer::infix(&parse()?),
        Emit::Polish => printer::polish(&parse()?),
    })
}

/// Returns whether the source had any error.
fn run(source: &str, emit: Emit) -> anyhow::Result<bool> {
    match render(source, emit) {
        Ok(output) => {
            writeln!(stdout(), "{output}")?;
            Ok(false)
        }
        Err(diagnostics) => {
            eprintln!("{diagnostics}");
            Ok(true)
        }
    }
}

fn run_file(path: PathBuf, emit: Emit) -> anyhow::Result<ExitCode> {
    info!("running {}", path.display());
    let source = std::fs::read_to_string(path)?;
    Ok(if run(&source, emit)? { ExitCode::from(EXIT_DATA_ERROR) } else { ExitCode::SUCCESS })
}

fn run_prompt(emit: Emit) -> anyhow::Result<ExitCode> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }
        // Every line is a run of its own, errors don't carry over.
        run(line.trim_end_matches(['\n', '\r']), emit)?;
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            e.print()?;
            return Ok(ExitCode::from(EXIT_USAGE));
        }
        Err(e) => e.exit(),
    };

    match args.file {
        Some(file) => run_file(file, args.emit),
        None => run_prompt(args.emit),
    }
}
