//! Interactive event loop.
//!
//! Widget state lives on this task only. Fetches run on spawned tasks and
//! report back over a channel, so the user can keep typing (or start a new
//! search) while one is in flight.

use std::sync::Arc;

use anyhow::Context;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use wxlookup_core::{
    CompletedSearch, PendingSearch, PreferenceStore, SearchHistory, SearchOutcome,
    WeatherProvider, Widget,
};

const HELP: &str = "\
Type a city name and press Enter to search.
  :unit           toggle Celsius / Fahrenheit
  :recent         list recent searches
  :pick <n|name>  search a recent city again
  :help           show this help
  :quit           exit";

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Search(&'a str),
    ToggleUnit,
    Recent,
    Pick(&'a str),
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Input::Search(line);
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "u" | "unit" => Input::ToggleUnit,
            "r" | "recent" => Input::Recent,
            "p" | "pick" => Input::Pick(arg),
            "h" | "help" => Input::Help,
            "q" | "quit" => Input::Quit,
            _ => Input::Unknown(trimmed),
        }
    }
}

/// Resolve a `:pick` argument: a 1-based position or an exact city name.
fn resolve_pick<'h>(history: &'h SearchHistory, arg: &str) -> Option<&'h str> {
    match arg.parse::<usize>() {
        Ok(position) => history.get(position),
        Err(_) => history.iter().find(|city| *city == arg),
    }
}

pub async fn run<S: PreferenceStore>(mut widget: Widget<S>) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<CompletedSearch>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    tracing::info!(unit = %widget.unit(), "Interactive widget started");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };

                match Input::parse(&line) {
                    Input::Search(text) => {
                        widget.set_input(text);
                        if let Some(pending) = widget.begin_submit() {
                            spawn_search(widget.provider(), pending, tx.clone());
                            render(&widget);
                        }
                    }
                    Input::ToggleUnit => {
                        widget.toggle_unit();
                        render(&widget);
                    }
                    Input::Recent => render(&widget),
                    Input::Pick(arg) => {
                        let city = resolve_pick(widget.history(), arg).map(str::to_owned);
                        match city.and_then(|city| widget.begin_search(&city)) {
                            Some(pending) => {
                                spawn_search(widget.provider(), pending, tx.clone());
                                render(&widget);
                            }
                            None => println!("'{arg}' is not in the recent searches (:recent)"),
                        }
                    }
                    Input::Help => println!("{HELP}"),
                    Input::Quit => break,
                    Input::Unknown(cmd) => println!("Unknown command {cmd}, try :help"),
                }
            }
            Some(done) = rx.recv() => {
                if apply_completed(&mut widget, done) {
                    render(&widget);
                }
            }
        }
    }

    Ok(())
}

fn spawn_search(
    provider: Arc<dyn WeatherProvider>,
    pending: PendingSearch,
    tx: mpsc::UnboundedSender<CompletedSearch>,
) {
    tokio::spawn(async move {
        let done = pending.run(provider.as_ref()).await;
        // Receiver only goes away when the loop exits.
        let _ = tx.send(done);
    });
}

/// Hand a finished fetch to the widget. Returns false when it was stale.
fn apply_completed<S: PreferenceStore>(widget: &mut Widget<S>, done: CompletedSearch) -> bool {
    let request = done.id();
    let outcome = widget.finish_search(done);
    tracing::debug!(%request, ?outcome, "Search completed");
    outcome != SearchOutcome::Stale
}

fn render<S: PreferenceStore>(widget: &Widget<S>) {
    println!("{}", "-".repeat(40));
    print!("{}", widget.view());
}
