use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use clap::{ArgAction, Parser};
use ibex::{errors::errors::Error, lexer::lexer::tokenize, parse};
use tracing::{debug, level_filters::LevelFilter, trace};
use tracing_subscriber::EnvFilter;

/// Parses an Ibex source file and prints its syntax tree.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// The source file to parse
    file: PathBuf,
    /// Name of the file in diagnostics, defaults to the file name of `file`
    #[arg(long)]
    filename: Option<String>,
    /// Print the token stream instead of the syntax tree
    #[arg(long)]
    tokens: bool,
    /// More logging, may be repeated
    #[arg(short = 'v', action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    /// Less logging, may be repeated
    #[arg(short = 'q', action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl Args {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used.
    fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    fn display_name(&self) -> Option<String> {
        self.filename.clone().or_else(|| {
            self.file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
    }
}

/// `RUST_LOG` directives take precedence over the `-v`/`-q` level.
fn init_logging(level_filter: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn display_error(error: &Error) {
    eprint!("{}", error);
    debug!(phase = %error.phase(), kind = error.get_error_name(), "Failed");
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level_filter());
    trace!("starting ibex with args: {args:?}");

    let source = match read_to_string(&args.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", args.file.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    if args.tokens {
        match tokenize(source, args.display_name()) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{}:{}\t{}", token.line, token.column, token);
                }
            }
            Err(error) => {
                display_error(&error);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match parse(source, args.display_name()) {
            Ok(ast) => println!("{:#?}", ast),
            Err(error) => {
                display_error(&error);
                return ExitCode::FAILURE;
            }
        }
    }

    debug!("Finished in {:?}", start.elapsed());
    ExitCode::SUCCESS
}
