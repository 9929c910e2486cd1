use std::path::PathBuf;

use pathlist::{ListOptions, TreeOptions};
use supports_color::Stream;

use crate::cli::{Cli, Command};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List { root: PathBuf, options: ListOptions },
    Tree { root: PathBuf, options: TreeOptions },
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub action: Action,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let action = match cli.command {
            Command::Ls { path, pattern, all } => Action::List {
                root: path,
                options: ListOptions::shallow()
                    .with_pattern(pattern)
                    .with_hidden_skipped(!all),
            },
            Command::Rls {
                path,
                suffix,
                pattern,
                depth,
                dirs,
                all,
            } => Action::List {
                root: path,
                options: ListOptions::recursive()
                    .with_suffix(suffix)
                    .with_pattern(pattern)
                    .with_max_depth(depth)
                    .with_dirs(dirs)
                    .with_hidden_skipped(!all),
            },
            Command::Tree { path, depth } => Action::Tree {
                root: path,
                options: TreeOptions {
                    indent: 0,
                    max_depth: depth,
                },
            },
        };

        Self {
            action,
            color: supports_color::on(Stream::Stdout).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn ls_skips_hidden_unless_all() {
        let config: RuntimeConfig = Cli::parse_from(["pathlist", "ls", "dir"]).into();
        assert_eq!(
            config.action,
            Action::List {
                root: PathBuf::from("dir"),
                options: ListOptions::shallow().with_hidden_skipped(true),
            }
        );

        let config: RuntimeConfig = Cli::parse_from(["pathlist", "ls", "-a"]).into();
        match config.action {
            Action::List { options, .. } => assert!(!options.skip_hidden),
            other => panic!("Expected a listing, got {other:?}"),
        }
    }

    #[test]
    fn rls_maps_every_flag() {
        let cli = Cli::parse_from([
            "pathlist", "rls", "src", "-s", ".rs", "-p", "tests", "-d", "3", "--dirs",
        ]);
        let config = RuntimeConfig::from(cli);
        assert_eq!(
            config.action,
            Action::List {
                root: PathBuf::from("src"),
                options: ListOptions {
                    max_depth: Some(3),
                    suffix: Some(".rs".to_string()),
                    pattern: Some("tests".to_string()),
                    include_dirs: true,
                    skip_hidden: true,
                },
            }
        );
    }

    #[test]
    fn tree_maps_depth() {
        let config = RuntimeConfig::from(Cli::parse_from(["pathlist", "tree", "-d", "1"]));
        assert_eq!(
            config.action,
            Action::Tree {
                root: PathBuf::from("."),
                options: TreeOptions {
                    indent: 0,
                    max_depth: Some(1),
                },
            }
        );
    }
}
