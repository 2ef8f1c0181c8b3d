//! Command line surface of `primer`: flags, subcommands and help text.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "primer",
    version,
    author,
    about = "Turn a fresh copy of the template into your project",
    long_about = "Primer rewrites a freshly created copy of the template \
                  repository: it points the manifest and readme at your \
                  repository, renames the placeholder package and removes \
                  itself when done.",
    after_help = "EXAMPLES:\n\
        \x20 primer setup\n\
        \x20 primer setup --repo-url https://github.com/good-org/amazing-project.git\n\
        \x20 primer setup --interactive --commit-as-you-go\n\
        \x20 primer guess https://github.com/good-org/amazing-project.git",
    arg_required_else_help = true,
    subcommand_required = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rewrite the template into a named project.
    #[command(
        about = "Set up the project from the template",
        after_help = "EXAMPLES:\n\
            \x20 primer setup                                   # use the origin remote\n\
            \x20 primer setup --package-name amazing_project\n\
            \x20 primer setup --interactive --keep-setup-files"
    )]
    Setup(SetupArgs),

    /// Show what would be derived from a repository URL.
    #[command(
        about = "Print the names derived from a repository URL",
        after_help = "EXAMPLES:\n\
            \x20 primer guess\n\
            \x20 primer guess https://github.com/good-org/amazing-project.git\n\
            \x20 primer --output-format json guess"
    )]
    Guess(GuessArgs),

    /// Inspect or create the configuration file.
    #[command(
        about = "Show, locate or create the configuration file",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 primer config show\n\
            \x20 primer config path\n\
            \x20 primer config init --force"
    )]
    Config(ConfigCommands),

    /// Print a completion script for a shell.
    #[command(about = "Print a shell completion script to stdout")]
    Completions(CompletionsArgs),
}

/// Arguments for `primer setup`.
#[derive(Debug, Args)]
pub struct SetupArgs {
    /// Repository URL. Defaults to the `origin` remote.
    #[arg(long = "repo-url", value_name = "URL", help = "Repository URL of the new project")]
    pub repo_url: Option<String>,

    /// Package name. Defaults to one derived from the repository URL.
    #[arg(long = "package-name", value_name = "NAME", help = "Name of the package")]
    pub package_name: Option<String>,

    /// Ask for the URL, the package name and whether to remove the tool.
    #[arg(short = 'i', long = "interactive", help = "Prompt for every choice")]
    pub interactive: bool,

    /// Commit after each step.
    #[arg(long = "commit-as-you-go", help = "Commit after each setup step")]
    pub commit_as_you_go: bool,

    /// Leave the tool's own files in place.
    #[arg(long = "keep-setup-files", help = "Do not remove the setup tool afterwards")]
    pub keep_setup_files: bool,

    /// Directory inside the template repository.
    #[arg(
        long = "path",
        value_name = "DIR",
        help = "Repository to set up (default: current directory)"
    )]
    pub path: Option<PathBuf>,
}

/// Arguments for `primer guess`.
#[derive(Debug, Args)]
pub struct GuessArgs {
    /// URL to derive names from. Defaults to the `origin` remote.
    #[arg(value_name = "URL", help = "Repository URL")]
    pub url: Option<String>,

    #[arg(
        long = "path",
        value_name = "DIR",
        help = "Repository to read the origin remote from"
    )]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show,
    /// Print where the global configuration file lives.
    Path,
    /// Write the default configuration to the global location.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}
