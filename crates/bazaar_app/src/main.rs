use std::path::PathBuf;

use bazaar_app::app::{run, AppConfig};
use bazaar_app::logging::{initialize, LogDestination};
use bazaar_core::DEFAULT_PAGE_SIZE;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

fn main() {
    initialize(LogDestination::File);

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let state_dir = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("state");

    let config = AppConfig {
        base_url,
        state_dir,
        page_size: DEFAULT_PAGE_SIZE,
    };
    if let Err(err) = run(config) {
        eprintln!("failed to start: {err}");
        std::process::exit(1);
    }
}
