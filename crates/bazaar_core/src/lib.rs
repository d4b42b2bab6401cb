//! Bazaar core: pure state machine for the marketplace listings browser.
//!
//! Everything in this crate is synchronous and side-effect free. IO wishes
//! (fetches, ledger persistence, address-bar updates) are returned from
//! [`update`] as [`Effect`] values for the platform layer to execute.
mod chart;
mod effect;
mod ledger;
mod listing;
mod msg;
mod pipeline;
mod state;
mod update;
mod url_state;
mod view_model;

pub use chart::{ChartKey, PriceHistory};
pub use effect::{Effect, HistoryMode};
pub use ledger::RECENT_QUERY_CAP;
pub use listing::{Listing, ListingId, ListingStatus};
pub use msg::{Msg, PageMove};
pub use pipeline::{visible_page, PageView};
pub use state::{
    AppState, FilterState, LoadStatus, SessionConfig, SortKey, Tab, DEFAULT_PAGE_SIZE,
};
pub use update::update;
pub use url_state::{decode_query_string, encode_query_string, UrlState};
pub use view_model::{AppViewModel, Banner, ChartView, ListingCard};
