use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "List directories and render them as trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the immediate entries of a directory
    Ls {
        #[clap(default_value = ".")]
        path: PathBuf,
        /// Keep only entries whose path contains this
        #[clap(long, short)]
        pattern: Option<String>,
        /// Include hidden entries
        #[clap(long, short)]
        all: bool,
    },
    /// List every file below a directory
    Rls {
        #[clap(default_value = ".")]
        path: PathBuf,
        /// Keep only entries whose name ends with this, e.g. `.rs`
        #[clap(long, short)]
        suffix: Option<String>,
        /// Keep only entries whose path contains this
        #[clap(long, short)]
        pattern: Option<String>,
        /// Stop descending after this many levels
        #[clap(long, short)]
        depth: Option<usize>,
        /// Report directories as entries too
        #[clap(long)]
        dirs: bool,
        /// Include hidden entries
        #[clap(long, short)]
        all: bool,
    },
    /// Print a directory as an indented tree
    Tree {
        #[clap(default_value = ".")]
        path: PathBuf,
        /// Levels to render below the root
        #[clap(long, short)]
        depth: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_rls_flags() {
        let cli = Cli::parse_from([
            "pathlist", "rls", "src", "--suffix", ".rs", "-d", "2", "--dirs", "-l", "debug",
        ]);
        match cli.command {
            Command::Rls {
                path,
                suffix,
                depth,
                dirs,
                all,
                ..
            } => {
                assert_eq!(path, PathBuf::from("src"));
                assert_eq!(suffix.as_deref(), Some(".rs"));
                assert_eq!(depth, Some(2));
                assert!(dirs);
                assert!(!all);
            }
            other => panic!("Expected rls, got {other:?}"),
        }
        assert!(matches!(cli.log_level, LogLevel::Debug));
    }

    #[test]
    fn cli_defaults_to_current_directory() {
        let cli = Cli::parse_from(["pathlist", "tree"]);
        assert!(matches!(
            cli.command,
            Command::Tree { ref path, depth: None } if path == &PathBuf::from(".")
        ));
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }

    #[test]
    fn cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
