//! Monkey CLI - token dump front end for the scanner
//!
//! Usage:
//!   monkey-cli <FILE>            Tokenize a file
//!   monkey-cli -e <CODE>         Tokenize inline source
//!   monkey-cli -o <FORMAT>       Output format: text (default), json, jsonl
//!   cat file | monkey-cli        Read source from stdin

mod output;

use clap::Parser;
use output::{format_error_json, format_tokens_json, JsonlWriter, OutputMode};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use monkey_lang::lexer::{Scanner, Token};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter (tracing-subscriber `EnvFilter` syntax).
const LOG_ENV: &str = "MONKEY_LOG";

fn print_help() {
    println!(
        r#"monkey CLI {}

USAGE:
    monkey-cli <FILE>               Tokenize a file
    monkey-cli -e <CODE>            Tokenize inline source
    monkey-cli -o <FORMAT>          Output format (text, json, jsonl)
    monkey-cli -h                   Show this help
    cat file | monkey-cli           Read from stdin

OPTIONS:
    -e, --eval <CODE>       Tokenize inline source
    -o, --output <FORMAT>   Output format: text (default), json, jsonl
    -d, --verbose           Log scanner diagnostics to stderr
    -h, --help              Show this help message
    -v, --version           Display version information

ENVIRONMENT:
    MONKEY_LOG              Log filter, e.g. monkey_lang=trace"#,
        VERSION
    );
}

fn print_version() {
    println!("monkey {}", VERSION);
}

/// Monkey token dump
#[derive(Parser, Debug)]
#[command(name = "monkey-cli")]
#[command(version, about = "Monkey scanner", long_about = None)]
#[command(disable_version_flag = true, disable_help_flag = true)]
struct Args {
    /// Print version
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Show help message
    #[arg(short = 'h', long = "help")]
    help: bool,

    /// The source file to tokenize (optional if using -e or stdin)
    file: Option<PathBuf>,

    /// Tokenize inline source
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Output format: text (default), json, jsonl
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    output: Option<String>,

    /// Log scanner diagnostics to stderr
    #[arg(short = 'd', long = "verbose")]
    verbose: bool,
}

/// Parse the output mode from CLI args.
fn parse_output_mode(args: &Args) -> Result<OutputMode, String> {
    match args.output.as_deref() {
        None | Some("text") => Ok(OutputMode::Text),
        Some("json") => Ok(OutputMode::Json),
        Some("jsonl") => Ok(OutputMode::Jsonl),
        Some(other) => Err(format!("Invalid output format: '{}'. Use: text, json, jsonl", other)),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Handle --help flag
    if args.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    // Handle --version flag
    if args.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    // Parse output mode early
    let output_mode = match parse_output_mode(&args) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    // Determine source: -e flag > file argument > stdin
    let input = match open_source(&args) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };
    let scanner = Scanner::new(input);

    let result = match output_mode {
        OutputMode::Text => run_text_mode(scanner),
        OutputMode::Json => run_json_mode(scanner),
        OutputMode::Jsonl => run_jsonl_mode(scanner),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::from(1)
        }
    }
}

fn open_source(args: &Args) -> Result<Box<dyn BufRead>, String> {
    // Priority: -e flag > file argument > stdin
    if let Some(ref code) = args.eval {
        return Ok(Box::new(io::Cursor::new(code.clone().into_bytes())));
    }

    if let Some(ref path) = args.file {
        let file = File::open(path).map_err(|e| format!("Error reading file {:?}: {}", path, e))?;
        return Ok(Box::new(BufReader::new(file)));
    }

    // Try stdin if not a TTY
    if !atty::is(atty::Stream::Stdin) {
        return Ok(Box::new(io::stdin().lock()));
    }

    Err("No input provided. Use: monkey-cli <FILE>, monkey-cli -e <CODE>, or pipe to stdin".to_string())
}

/// Run in text mode (default, one token per line).
fn run_text_mode<R: BufRead>(scanner: Scanner<R>) -> io::Result<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for result in scanner {
        match result {
            Ok(token) => writeln!(out, "{}", token)?,
            Err(e) => {
                out.flush()?;
                eprintln!("{}", e);
                return Ok(ExitCode::from(2));
            }
        }
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

/// Run in JSON mode (single document once scanning completes).
fn run_json_mode<R: BufRead>(scanner: Scanner<R>) -> io::Result<ExitCode> {
    let tokens: Result<Vec<Token>, _> = scanner.collect();

    match tokens {
        Ok(tokens) => {
            println!("{}", format_tokens_json(&tokens)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", format_error_json(&e)?);
            Ok(ExitCode::from(2))
        }
    }
}

/// Run in JSONL mode (one line per token as it is scanned).
fn run_jsonl_mode<R: BufRead>(scanner: Scanner<R>) -> io::Result<ExitCode> {
    let stdout = io::stdout();
    let mut writer = JsonlWriter::new(stdout.lock());

    for result in scanner {
        match result {
            Ok(token) => writer.write_token(&token)?,
            Err(e) => {
                writer.write_error(&e)?;
                return Ok(ExitCode::from(2));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
