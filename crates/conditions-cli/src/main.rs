use crate::{commands::SyntaxArgs, error::CliError};
use chrono::{DateTime, Utc};
use clap::Parser;
use commands::Commands;
use condition_engine::{Evaluator, Expression, FixedClock};
use condition_syntax::{BooleanCase, SyntaxOptions, compile_with, lexer::Lexer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod record;

#[derive(Parser)]
#[command(name = "conditions", version = "0.1.0", about = "Compile and evaluate conditions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ast { expr, syntax } => {
            let tree = compile(&expr, &syntax)?;
            let json = serde_json::to_string_pretty(&tree).map_err(CliError::JsonSerialize)?;
            println!("{json}");
        }
        Commands::Tokens { expr, syntax } => {
            let options = syntax_options(&syntax);
            for token in Lexer::with_boolean_case(&expr, options.boolean_case) {
                println!(
                    "{:>3}:{:<3} {:<12} {}",
                    token.line,
                    token.column,
                    token.kind.to_string(),
                    token.lexeme
                );
            }
        }
        Commands::Eval {
            expr,
            record,
            json,
            parse_timestamps,
            now,
            syntax,
        } => {
            let tree = compile(&expr, &syntax)?;
            let data = record::load(record.as_deref(), json.as_deref(), parse_timestamps)?;

            let result = match now {
                Some(now) => {
                    let now = DateTime::parse_from_rfc3339(&now)
                        .map_err(CliError::InvalidNow)?
                        .with_timezone(&Utc);
                    info!("Evaluating with fixed clock at {now}");
                    Evaluator::with_clock(FixedClock(now)).evaluate(&tree, &data)?
                }
                None => Evaluator::new().evaluate(&tree, &data)?,
            };

            println!("{result}");
        }
    }

    Ok(())
}

fn syntax_options(args: &SyntaxArgs) -> SyntaxOptions {
    let mut options = SyntaxOptions::default();
    if args.strict_booleans {
        options = options.with_boolean_case(BooleanCase::Exact);
    }
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }
    options
}

fn compile(expr: &str, args: &SyntaxArgs) -> Result<Expression, CliError> {
    compile_with(expr, &syntax_options(args)).map_err(|err| CliError::Compile(err.format_error(expr)))
}
