//! docnav — query a documentation site's navigation from the command line.
//!
//! This binary loads a site configuration, starts one navigation session
//! and prints the result of a single command to stdout.

mod cli;
mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use docnav_core::{Command, ConfigModel, Event, NavigationController, Surface};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Action, Cli};
use crate::render::{render_history, render_hits, render_toolbar, render_tree};

fn main() {
    // Logs go to stderr so stdout stays clean for results.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = ConfigModel::load_file(&cli.config).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config.display()
        )
    })?;
    let mut nav = NavigationController::new(Arc::new(config));
    tracing::debug!(command = ?cli.command, "running command");

    let output = match cli.command {
        Action::Tree => render_tree(nav.index(), nav.index().flatten()),
        Action::Sidebar { query } => query_surface(&mut nav, Surface::Sidebar, query.join(" ")),
        Action::Toolbar { query } => query_surface(&mut nav, Surface::Toolbar, query.join(" ")),
        Action::Search { query } => query_surface(&mut nav, Surface::Search, query.join(" ")),
        Action::Visit { ids } => {
            for id in ids {
                nav.handle(Command::ItemSelected(id));
            }
            render_history(&nav.history())
        }
    };
    Ok(output)
}

fn query_surface(nav: &mut NavigationController, surface: Surface, query: String) -> String {
    let (body, message) = match nav.handle(Command::QueryChanged { surface, query }) {
        Event::SidebarFiltered { nodes, message, .. } => {
            (render_tree(nav.index(), &nodes), message)
        }
        Event::ToolbarFiltered { links, message, .. } => (render_toolbar(&links), message),
        Event::SearchCompleted { hits, message, .. } => (render_hits(&hits), message),
        Event::Navigated(_) => (String::new(), None),
    };
    match message {
        Some(message) => format!("{message}\n"),
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SITE: &str = r#"var __DOCS_CONFIG__ = {"maxHistoryItems":3,"filterNotFoundMsg":"Nothing matches \"{query}\"","toolbarLinks":[{"id":"methods","label":"Methods"}],"sidebar":[{"n":"tutorials","l":"Tutorials","i":[{"n":"basics","l":"Basics"},{"n":"motoko_playground","l":"Motoko playground"}]}],"search":{"minChars":2,"maxResults":20}};"#;

    fn site(tmp: &TempDir) -> PathBuf {
        let path = tmp.path().join("config.js");
        fs::write(&path, SITE).unwrap();
        path
    }

    fn invoke(config: PathBuf, command: Action) -> anyhow::Result<String> {
        run(Cli { config, command })
    }

    fn words(query: &str) -> Vec<String> {
        query.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn sidebar_filter_prints_connected_tree() {
        let tmp = TempDir::new().unwrap();
        let out = invoke(site(&tmp), Action::Sidebar { query: words("play") }).unwrap();
        assert_eq!(
            out,
            "Tutorials/  [tutorials]\n  Motoko playground  [tutorials/motoko_playground]\n"
        );
    }

    #[test]
    fn sidebar_miss_prints_not_found_message() {
        let tmp = TempDir::new().unwrap();
        let out = invoke(site(&tmp), Action::Sidebar { query: words("zzz") }).unwrap();
        assert_eq!(out, "Nothing matches \"zzz\"\n");
    }

    #[test]
    fn visit_prints_bounded_history() {
        let tmp = TempDir::new().unwrap();
        let ids = ["a", "b", "c", "a", "d"].iter().map(|s| s.to_string()).collect();
        let out = invoke(site(&tmp), Action::Visit { ids }).unwrap();

        let targets: Vec<&str> = out
            .lines()
            .map(|l| l.split_whitespace().nth(1).unwrap())
            .collect();
        assert_eq!(targets, vec!["d", "a", "c"]);
    }

    #[test]
    fn search_joins_query_words() {
        let tmp = TempDir::new().unwrap();
        let out = invoke(
            site(&tmp),
            Action::Search {
                query: words("motoko play"),
            },
        )
        .unwrap();
        assert_eq!(out, "  1. Motoko playground  [tutorials/motoko_playground]\n");
    }

    #[test]
    fn missing_config_reports_path() {
        let tmp = TempDir::new().unwrap();
        let err = invoke(tmp.path().join("missing.json"), Action::Tree).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }
}
