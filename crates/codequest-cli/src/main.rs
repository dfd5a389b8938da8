use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use codequest_cli::grade::{self, SubmissionError};
use codequest_ast::ast::Stmt;
use codequest_cli::{run_with_config, RunConfig, RunError};
use codequest_parse::{parse_str, ParsedLine};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Maximum source file size in bytes (1MB)
const MAX_SOURCE_SIZE: usize = 1_000_000;

/// Step limit applied when `--max-steps` is not given
const DEFAULT_MAX_STEPS: u64 = 100_000;

#[derive(Parser, Debug)]
#[command(name = "codequest")]
#[command(about = "CodeQuest: run and check lesson programs written in a small Python subset")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a program and print its output
    Run {
        /// Path to the source file
        file: String,

        /// Abort after this many statements and loop iterations
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: u64,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },

    /// Run a program and compare its output with the expected answer
    Check {
        /// Path to the source file
        file: String,

        /// Expected output text (lines separated by newlines)
        #[arg(long, conflicts_with = "expected_file", required_unless_present = "expected_file")]
        expected: Option<String>,

        /// Read the expected output from a file
        #[arg(long)]
        expected_file: Option<String>,

        /// Abort after this many statements and loop iterations
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: u64,
    },

    /// Classify every line of a program without running it
    Parse {
        /// Path to the source file
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum Format {
    Pretty,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    install_tracing(cli.verbose);

    let ok = match cli.command {
        Commands::Run {
            file,
            max_steps,
            format,
        } => cmd_run(&file, max_steps, format)?,

        Commands::Check {
            file,
            expected,
            expected_file,
            max_steps,
        } => cmd_check(&file, expected, expected_file.as_deref(), max_steps)?,

        Commands::Parse { file, format } => cmd_parse(&file, format)?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn install_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env("CODEQUEST_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load_source(path: &str) -> Result<String> {
    let src =
        std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))?;

    if src.len() > MAX_SOURCE_SIZE {
        bail!(
            "source file exceeds {}MB limit ({} bytes)",
            MAX_SOURCE_SIZE / 1_000_000,
            src.len()
        );
    }
    Ok(src)
}

fn cmd_run(file: &str, max_steps: u64, format: Format) -> Result<bool> {
    let src = load_source(file)?;
    if let Err(e) = grade::validate_source(&src) {
        eprintln!("Error: {}", e);
        return Ok(false);
    }

    let config = RunConfig::default().with_max_steps(max_steps);
    let result = run_with_config(&src, &config);

    match format {
        Format::Pretty => {
            for line in &result.output {
                println!("{}", line);
            }
            if let Some(err) = &result.error {
                eprintln!("Error: {}", err);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(result.is_ok())
}

fn cmd_check(
    file: &str,
    expected: Option<String>,
    expected_file: Option<&str>,
    max_steps: u64,
) -> Result<bool> {
    let src = load_source(file)?;
    let expected = match (expected, expected_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read expected output '{}'", path))?,
        (None, None) => bail!("one of --expected or --expected-file is required"),
    };
    let expected = expected.trim_end_matches(['\r', '\n']);

    let config = RunConfig::default().with_max_steps(max_steps);
    let graded = match grade::grade(&src, expected, &config) {
        Ok(g) => g,
        Err(SubmissionError::Empty) => {
            eprintln!("Error: {}", SubmissionError::Empty);
            return Ok(false);
        }
    };

    println!("> Running code for: {}", file);
    for line in &graded.transcript {
        println!("{}", line);
    }

    if graded.passed {
        println!();
        println!("Success! Output matches the expected answer.");
    } else {
        println!();
        println!("Not quite. Expected output:");
        for line in expected.lines() {
            println!("  {}", line);
        }
    }
    Ok(graded.passed)
}

fn cmd_parse(file: &str, format: Format) -> Result<bool> {
    let src = load_source(file)?;
    let lines = parse_str(&src);
    let problems: Vec<Option<RunError>> =
        (0..lines.len()).map(|i| line_problem(&lines, i)).collect();
    let ok = problems.iter().all(Option::is_none);

    match format {
        Format::Pretty => {
            for (parsed, problem) in lines.iter().zip(&problems) {
                let kind = match (&parsed.stmt, problem) {
                    (_, Some(_)) => "error",
                    (Ok(Stmt::Unrecognized { .. }), None) => "else",
                    (Ok(stmt), None) => stmt.kind(),
                    (Err(_), None) => "error",
                };
                match problem {
                    None => println!(
                        "{:>4} [{:>2}] {:<12} {}",
                        parsed.line.number(),
                        parsed.line.indent(),
                        kind,
                        parsed.line.trimmed()
                    ),
                    Some(e) => println!(
                        "{:>4} [{:>2}] {:<12} {}  <- {}",
                        parsed.line.number(),
                        parsed.line.indent(),
                        kind,
                        parsed.line.trimmed(),
                        e
                    ),
                }
            }
        }
        Format::Json => {
            let records: Vec<serde_json::Value> = lines
                .iter()
                .zip(&problems)
                .map(|(parsed, problem)| match (&parsed.stmt, problem) {
                    (Ok(stmt), None) => json!({ "span": parsed.line.span(), "stmt": stmt }),
                    (_, Some(e)) => json!({ "span": parsed.line.span(), "error": e.to_string() }),
                    (Err(e), None) => json!({ "span": parsed.line.span(), "error": e.to_string() }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(ok)
}

/// The error executing line `idx` would raise, if any.
fn line_problem(lines: &[ParsedLine<'_>], idx: usize) -> Option<RunError> {
    match &lines[idx].stmt {
        Err(e) => Some(RunError::Syntax(e.clone())),
        Ok(Stmt::Unrecognized { text }) if !closes_if(lines, idx) => {
            Some(RunError::UnsupportedSyntax { line: text.clone() })
        }
        Ok(_) => None,
    }
}

/// `else:` whose nearest non-blank line at or left of its indent is an `if`
/// header at the same indent, i.e. it directly follows that `if`'s body.
fn closes_if(lines: &[ParsedLine<'_>], idx: usize) -> bool {
    let line = lines[idx].line;
    if line.trimmed() != "else:" {
        return false;
    }
    let indent = line.indent();
    lines[..idx]
        .iter()
        .rev()
        .find(|p| !p.line.is_blank() && p.line.indent() <= indent)
        .is_some_and(|p| p.line.indent() == indent && matches!(p.stmt, Ok(Stmt::If { .. })))
}
