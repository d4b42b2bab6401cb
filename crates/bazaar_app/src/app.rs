use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use bazaar_core::{update, AppState, Msg, PageMove, SessionConfig, SortKey, Tab};
use bazaar_engine::{EngineConfig, FetchError};

use crate::effects::EffectRunner;
use crate::persistence::LocalStore;
use crate::ui;

pub struct AppConfig {
    pub base_url: String,
    pub state_dir: PathBuf,
    pub page_size: usize,
}

enum Command {
    Dispatch(Msg),
    Recent(usize),
    Back,
    Forward,
    Link,
    Help,
    Quit,
    Invalid(&'static str),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "" => Command::Invalid(""),
        "search" => Command::Dispatch(Msg::QuerySubmitted(rest.to_string())),
        "tab" => match Tab::from_param(rest) {
            Some(tab) => Command::Dispatch(Msg::TabSelected(tab)),
            None => Command::Invalid("usage: tab all|active|sold"),
        },
        "sort" => match SortKey::from_param(rest) {
            Some(sort) => Command::Dispatch(Msg::SortSelected(sort)),
            None => Command::Invalid("usage: sort latest|priceAsc|priceDesc"),
        },
        "next" => Command::Dispatch(Msg::PageRequested(PageMove::Next)),
        "prev" => Command::Dispatch(Msg::PageRequested(PageMove::Prev)),
        "fav" => match rest.parse() {
            Ok(id) => Command::Dispatch(Msg::FavoriteToggled(id)),
            Err(_) => Command::Invalid("usage: fav <listing id>"),
        },
        "favs" => match rest {
            "on" => Command::Dispatch(Msg::OnlyFavoritesToggled(true)),
            "off" => Command::Dispatch(Msg::OnlyFavoritesToggled(false)),
            _ => Command::Invalid("usage: favs on|off"),
        },
        "recent" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => Command::Recent(n - 1),
            _ => Command::Invalid("usage: recent <1-5>"),
        },
        "retry" => Command::Dispatch(Msg::RetryClicked),
        "back" => Command::Back,
        "forward" => Command::Forward,
        "link" => Command::Link,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Invalid("unknown command; type `help`"),
    }
}

fn print_help() {
    println!("commands:");
    println!("  search <text>                 keyword search");
    println!("  tab all|active|sold           status tab");
    println!("  sort latest|priceAsc|priceDesc");
    println!("  next / prev                   page navigation");
    println!("  fav <id>                      toggle a favorite");
    println!("  favs on|off                   favorites-only filter");
    println!("  recent <1-5>                  re-run a recent query");
    println!("  retry                         retry a failed load");
    println!("  back / forward                history navigation");
    println!("  link                          show the shareable link");
    println!("  quit");
}

pub fn run(config: AppConfig) -> Result<(), FetchError> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let store = LocalStore::new(config.state_dir);
    let mut runner = EffectRunner::new(msg_tx, EngineConfig::new(config.base_url), store)?;

    let mut state = AppState::with_config(SessionConfig {
        page_size: config.page_size,
    });

    // Ledgers first, then the URL restore that kicks off the initial fetch.
    for msg in runner.restore_messages() {
        state = dispatch(state, msg, &mut runner);
    }
    state = dispatch(state, Msg::UrlRestored(String::new()), &mut runner);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        // Let in-flight fetch results land before prompting again.
        while let Ok(msg) = msg_rx.recv_timeout(Duration::from_millis(200)) {
            state = dispatch(state, msg, &mut runner);
        }
        render_if_dirty(&mut state);

        print!("> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = lines.next() else { break };

        match parse_command(&line) {
            Command::Dispatch(msg) => state = dispatch(state, msg, &mut runner),
            Command::Recent(index) => {
                match state.view().recent_queries.get(index).cloned() {
                    Some(query) => {
                        state = dispatch(state, Msg::RecentQueryPicked(query), &mut runner);
                    }
                    None => println!("no such recent query"),
                }
            }
            Command::Back => match runner.history_back() {
                Some(query) => state = dispatch(state, Msg::NavigatedBack(query), &mut runner),
                None => println!("already at the oldest entry"),
            },
            Command::Forward => match runner.history_forward() {
                Some(query) => state = dispatch(state, Msg::NavigatedBack(query), &mut runner),
                None => println!("already at the newest entry"),
            },
            Command::Link => {
                let query = runner.current_url();
                if query.is_empty() {
                    println!("(default view)");
                } else {
                    println!("?{query}");
                }
            }
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Invalid(usage) => {
                if !usage.is_empty() {
                    println!("{usage}");
                }
            }
        }
    }

    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &mut EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

fn render_if_dirty(state: &mut AppState) {
    if state.consume_dirty() {
        for line in ui::render(&state.view()) {
            println!("{line}");
        }
    }
}
