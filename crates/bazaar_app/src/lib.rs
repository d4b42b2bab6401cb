//! Platform glue for the bazaar listings browser: logging, ledger
//! persistence, address-bar history, effect execution, and a line-oriented
//! terminal presenter.
pub mod app;
pub mod effects;
pub mod history;
pub mod logging;
pub mod persistence;
pub mod ui;
