use std::path::PathBuf;

use colored::Colorize;
use pathlist::{DirectoryTree, PathError, SlashPathExt, TreeLine};
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{Action, RuntimeConfig};

pub struct Application;

impl Application {
    pub fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);
        colored::control::set_override(app_config.color);

        match app_config.action {
            Action::List { root, options } => {
                let entries = pathlist::Path::new(&root)
                    .list(&options)
                    .context(ListingSnafu { root: &root })?;
                info!("Found {} entries", entries.n());
                for entry in entries {
                    println!("{entry}");
                }
            }
            Action::Tree { root, options } => {
                let tree = DirectoryTree::scan(&root, &options).context(TreeSnafu { root: &root })?;
                for line in tree.lines() {
                    println!(
                        "{:width$}|--{} {}",
                        "",
                        Self::paint_marker(&line),
                        line.name,
                        width = tree.indent_of(line.depth)
                    );
                }
            }
        }

        Ok(())
    }

    fn paint_marker(line: &TreeLine<'_>) -> colored::ColoredString {
        if line.is_dir {
            line.marker().blue().bold()
        } else {
            line.marker().normal()
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to list {}", root.slash_display()))]
    ListingError { root: PathBuf, source: PathError },
    #[snafu(display("Failed to render the tree of {}", root.slash_display()))]
    TreeError { root: PathBuf, source: PathError },
}
