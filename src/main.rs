use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use tracing::{error, info};

use monkey_parser::{
    errors::errors::{Error, ErrorTip},
    get_line_at_position,
    lexer::lexer::tokenize,
    logger::{self, LogLevel},
    parse_source,
};

#[derive(Parser, Debug)]
#[command(name = "monkey-parser")]
#[command(about = "Parse a Monkey source file and print its canonical form")]
struct Args {
    /// Path to the source file
    file: PathBuf,

    /// Print the token stream before parsing
    #[arg(long)]
    tokens: bool,

    /// Minimum level of log events written to stderr
    #[arg(long = "log-level", value_enum, default_value = "warn")]
    log_level: LogLevel,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_with_level(args.log_level);

    let contents = match read_to_string(&args.file) {
        Ok(contents) => contents,
        Err(err) => {
            error!("Failed to read {}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "shell".to_string());

    if args.tokens {
        for token in tokenize(&contents, Some(file_name.clone())) {
            println!("{}", token);
        }
    }

    let start = Instant::now();
    let (program, errors) = parse_source(&contents, Some(file_name));
    info!("Parsed in {:?}", start.elapsed());

    if !errors.is_empty() {
        for err in &errors {
            display_error(err, &args.file, &contents);
        }
        eprintln!("{} error(s) found", errors.len());
        return ExitCode::FAILURE;
    }

    println!("{}", program);
    ExitCode::SUCCESS
}

fn display_error(error: &Error, file: &Path, contents: &str) {
    /*
        error: message
        -> final.monkey
           |
        20 | let a = @;
           | --------^
    */

    if let ErrorTip::None = error.get_tip() {
        eprintln!("Error: {}: {}", error.get_error_name(), error);
    } else {
        eprintln!("Error: {}: {} ({})", error.get_error_name(), error, error.get_tip());
    }
    eprintln!("-> {}", file.display());

    let Some((line, line_text, line_pos)) = get_line_at_position(contents, error.get_position().0)
    else {
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    eprintln!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
