//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse, build, and format nginx configuration files
#[derive(Parser)]
#[command(name = "ngx-config")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tokenize a config file and print the tokens as JSON
    Lex(LexArgs),

    /// Parse a config file (and its includes) into a JSON payload
    Parse(ParseArgs),

    /// Rebuild config files from a JSON payload
    Build(BuildArgs),

    /// Reformat a config file with canonical indentation
    Format(FormatArgs),

    /// Strip comments and whitespace from a config file
    Minify(MinifyArgs),
}

#[derive(clap::Args)]
pub struct LexArgs {
    /// Input config file
    pub input: PathBuf,

    /// Emit [text, line] pairs instead of bare token strings
    #[arg(short = 'n', long)]
    pub line_numbers: bool,

    /// Pretty-print the JSON with this many spaces
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ParseArgs {
    /// Input config file
    pub input: PathBuf,

    /// Inline every include into one virtual file
    #[arg(long)]
    pub combine: bool,

    /// Do not follow include directives
    #[arg(long)]
    pub single_file: bool,

    /// Keep comments in the parsed tree
    #[arg(long)]
    pub include_comments: bool,

    /// Fail on directives absent from the catalog
    #[arg(long)]
    pub strict: bool,

    /// Directives to skip entirely, blocks included
    #[arg(long, value_delimiter = ',', value_name = "DIRECTIVE")]
    pub ignore: Vec<String>,

    /// Stop at the first error instead of collecting them
    #[arg(long)]
    pub no_catch: bool,

    /// Attach each error's stringified form as its callback value
    #[arg(long)]
    pub tb_onerror: bool,

    /// Pretty-print the JSON with this many spaces
    #[arg(short, long)]
    pub indent: Option<usize>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct BuildArgs {
    /// JSON payload file, as produced by `parse`
    pub input: PathBuf,

    /// Directory to write config files into
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,

    /// Spaces per indent level
    #[arg(short, long, default_value = "4")]
    pub indent: usize,

    /// Indent with tabs instead of spaces
    #[arg(short, long)]
    pub tabs: bool,

    /// Do not add generated-file header comments
    #[arg(long)]
    pub no_headers: bool,

    /// Print the built files instead of writing them
    #[arg(long)]
    pub stdout: bool,
}

#[derive(clap::Args)]
pub struct FormatArgs {
    /// Input config file
    pub input: PathBuf,

    /// Spaces per indent level
    #[arg(short, long, default_value = "4")]
    pub indent: usize,

    /// Indent with tabs instead of spaces
    #[arg(short, long)]
    pub tabs: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct MinifyArgs {
    /// Input config file
    pub input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
