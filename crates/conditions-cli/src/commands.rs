use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Print the compiled expression tree as JSON
    Ast {
        #[arg(long, help = "Condition text")]
        expr: String,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },
    /// Print the token stream produced by the lexer
    Tokens {
        #[arg(long, help = "Condition text")]
        expr: String,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },
    /// Evaluate a condition against a JSON record
    Eval {
        #[arg(long, help = "Condition text")]
        expr: String,

        #[arg(long, conflicts_with = "json", help = "Path to a JSON file holding the record")]
        record: Option<String>,

        #[arg(long, help = "Inline JSON record")]
        json: Option<String>,

        #[arg(
            long,
            help = "Treat RFC 3339 strings in the record as timestamps so BEFORE can use them"
        )]
        parse_timestamps: bool,

        #[arg(long, help = "Evaluate as if the current time were this RFC 3339 instant")]
        now: Option<String>,

        #[command(flatten)]
        syntax: SyntaxArgs,
    },
}

#[derive(Args)]
pub struct SyntaxArgs {
    #[arg(long, help = "Only accept lowercase `true` and `false`")]
    pub strict_booleans: bool,

    #[arg(long, help = "Maximum parenthesis nesting depth")]
    pub max_depth: Option<usize>,
}
