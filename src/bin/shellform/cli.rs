//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use shellform::OutputFormat;

/// Shellform - shell-correct formatting of paths and arguments for build-system generators
#[derive(Parser)]
#[command(name = "shellform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read the generator environment and topology from a TOML file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Escape arguments for a target shell, make tool, or IDE project file
    Escape(EscapeArgs),

    /// Compute the relative form of a path across the source/binary topology
    Relative(RelativeArgs),

    /// Escape strings as configuration-language literals
    ConfigEscape(ConfigEscapeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Target shell family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellKind {
    /// A POSIX shell
    Unix,
    /// cmd.exe
    Windows,
    /// An MSYS shell on Windows
    Msys,
}

/// Build tool consuming the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToolKind {
    /// Plain make
    Make,
    /// NMake
    Nmake,
    /// MinGW make
    Mingw,
    /// Watcom WMake
    Wmake,
    /// Ninja
    Ninja,
    /// A Visual Studio project file
    Vside,
}

#[derive(Args)]
pub struct EscapeArgs {
    /// Arguments to escape
    #[arg(required = true)]
    pub args: Vec<String>,

    /// Target shell family (defaults to the config file, then unix)
    #[arg(long, value_enum)]
    pub shell: Option<ShellKind>,

    /// Build tool consuming the generated file
    #[arg(long, value_enum)]
    pub tool: Option<ToolKind>,

    /// Output format: shell, ninja-multi, or response
    #[arg(long, default_value = "shell")]
    pub format: OutputFormat,

    /// Quote with the extra single quotes Watcom tools expect
    #[arg(long)]
    pub watcom_quote: bool,

    /// Escape for the Windows built-in echo
    #[arg(long)]
    pub echo: bool,

    /// Escape $(NAME) make-variable references instead of passing them through
    #[arg(long)]
    pub no_make_vars: bool,

    /// Emit for a link script rather than a makefile recipe
    #[arg(long)]
    pub link_script: bool,

    /// Emit machine-readable JSON, one object per argument
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RelativeArgs {
    /// Directory the result should be relative to
    pub local: String,

    /// Path to relativize
    pub remote: String,

    /// Highest source directory of the generation scope
    #[arg(long)]
    pub source_top: Option<String>,

    /// Highest binary directory of the generation scope
    #[arg(long)]
    pub binary_top: Option<String>,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigEscapeArgs {
    /// Strings to escape
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Emit only the escaped content, without surrounding quotes
    #[arg(long)]
    pub no_wrap: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
