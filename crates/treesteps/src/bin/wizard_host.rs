//! Demo host driving a sample sign-up wizard from stdin.
//!
//! Guarded by the `host` feature. Each line is one command:
//!
//! ```text
//! next [target...]   forward; targets are child names or indices, one per level
//! prev [n|name]      backward by count or to a named ancestor
//! root               back to the first step
//! back | forward     browser-style history moves
//! commit <text>      store text as the current step's data
//! error [text]       set (or clear) the pending error
//! show               print the navigator state
//! quit
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use treesteps::{
    ChildTarget, MemoryHistory, NavigateOptions, Navigator, NavigatorConfig, NextSelector,
    PreviousSelector, StepNode,
};

#[derive(Parser)]
#[command(name = "wizard-host")]
#[command(about = "Drive a sample sign-up wizard over an in-memory history", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Navigator config file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location the history starts at
    #[arg(short, long, default_value = "/")]
    start: String,
}

fn signup_wizard() -> StepNode<&'static str> {
    let confirm = || StepNode::node("Review and confirm", "/signup/confirm");
    StepNode::node("Welcome", "/")
        .child(
            "account",
            StepNode::node("Email and password", "/signup/account")
                .allow_direct_access()
                .child(
                    "plan",
                    StepNode::tunnel("Choose a plan")
                        .child(
                            "free",
                            StepNode::node("Free plan", "/signup/free").child("confirm", confirm()),
                        )
                        .child(
                            "pro",
                            StepNode::node("Pro plan", "/signup/pro")
                                .child(
                                    "billing",
                                    StepNode::node("Billing details", "/signup/billing")
                                        .child("confirm", confirm()),
                                ),
                        ),
                ),
        )
}

fn load_config(path: Option<&PathBuf>) -> Result<NavigatorConfig> {
    let mut config = match path {
        Some(path) => NavigatorConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => NavigatorConfig::default(),
    };
    config.merge_with_env()?;
    Ok(config)
}

fn parse_next(args: &[&str]) -> NextSelector {
    let targets: Vec<ChildTarget> = args
        .iter()
        .map(|arg| match arg.parse::<usize>() {
            Ok(index) => ChildTarget::Index(index),
            Err(_) => ChildTarget::from(*arg),
        })
        .collect();
    if targets.is_empty() {
        NextSelector::default()
    } else {
        NextSelector::Path(targets)
    }
}

fn parse_previous(arg: Option<&str>) -> PreviousSelector {
    match arg {
        None => PreviousSelector::default(),
        Some(arg) => match arg.parse::<usize>() {
            Ok(count) => PreviousSelector::Count(count),
            Err(_) => PreviousSelector::from(arg),
        },
    }
}

fn show(nav: &Navigator<&'static str, String, String>) {
    let node = nav.current_node();
    println!("[{}] {} at {}", node.name, node.renderable, nav.location());
    if !nav.data().is_empty() {
        println!("  data: {}", nav.data());
    }
    if let Some(error) = nav.error() {
        println!("  error: {error}");
    }
    let names: Vec<_> = node
        .children
        .iter()
        .map(|&child| nav.tree().node(child).name.as_str())
        .collect();
    if !names.is_empty() {
        println!("  next: {}", names.join(", "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let config = load_config(cli.config.as_ref())?;
    let history = MemoryHistory::new(cli.start.as_str());
    let mut nav = Navigator::builder(signup_wizard(), String::new())
        .config(config)
        .history(Arc::new(history.clone()))
        .build::<String>()?;

    show(&nav);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let rest: Vec<&str> = words.collect();

        let moved = match command {
            "next" => nav.to_next(&parse_next(&rest), NavigateOptions::default()),
            "prev" => {
                let selector = parse_previous(rest.first().copied());
                nav.to_previous(&selector, NavigateOptions::default())
            }
            "root" => nav.to_root(NavigateOptions::default()),
            "back" => {
                history.back();
                nav.sync()
            }
            "forward" => {
                history.forward();
                nav.sync()
            }
            "commit" => {
                nav.commit(rest.join(" "));
                false
            }
            "error" => {
                let text = rest.join(" ");
                nav.update_error(|_| (!text.is_empty()).then_some(text), None);
                false
            }
            "show" => {
                println!("{}", serde_json::to_string_pretty(&nav.snapshot())?);
                println!("  history: {} entries, at {}", history.len(), history.index());
                false
            }
            "quit" | "exit" => break,
            other => {
                println!("unknown command: {other}");
                continue;
            }
        };

        if moved {
            if let Some(transition) = nav.transition() {
                tracing::debug!(direction = ?transition.direction, "Moved");
            }
        }
        show(&nav);
        stdout.flush()?;
    }
    Ok(())
}
