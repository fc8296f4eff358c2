//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(version)]
#[command(about = "Query a documentation site's sidebar, toolbar, search and history")]
pub struct Cli {
    /// Site configuration: `.json`, `.toml` or the generator's `.js` payload
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Action,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the whole sidebar tree
    Tree,
    /// Print the sidebar filtered by a query
    Sidebar {
        /// Words of the query; none prints the unfiltered sidebar
        query: Vec<String>,
    },
    /// Print the toolbar links filtered by a query
    Toolbar {
        /// Words of the query; none prints every link
        query: Vec<String>,
    },
    /// Search member names
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Select targets in order, then print the history
    Visit {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}
