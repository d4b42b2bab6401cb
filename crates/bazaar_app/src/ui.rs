//! Line-oriented presenter for the view model. Replaceable glue; nothing
//! here feeds back into the state machine.

use bazaar_core::{AppViewModel, Banner, ListingCard, ListingStatus};
use chrono::NaiveDate;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    match view.banner {
        Banner::Loading => lines.push("Loading listings...".to_string()),
        Banner::Error => {
            lines.push("Failed to load listings. Type `retry` to try again.".to_string())
        }
        Banner::Ready => {}
    }

    lines.push(format!(
        "query: {:?}  tab: {}  sort: {}  favorites-only: {}",
        view.query,
        view.tab.as_param(),
        view.sort.as_param(),
        if view.only_favorites { "on" } else { "off" },
    ));

    if let Some(chart) = &view.chart {
        lines.push(format!(
            "price history: {} points, latest average {}",
            chart.avg.len(),
            format_price_krw(chart.latest_avg),
        ));
    }

    if view.items.is_empty() && view.banner == Banner::Ready {
        lines.push("No results.".to_string());
    }
    for card in &view.items {
        lines.push(render_card(card));
    }

    lines.push(format!(
        "page {} / {}{}{}",
        view.page,
        view.total_pages,
        if view.has_prev { "  [prev]" } else { "" },
        if view.has_next { "  [next]" } else { "" },
    ));

    if !view.recent_queries.is_empty() {
        lines.push(format!("recent: {}", view.recent_queries.join(", ")));
    }

    lines
}

fn render_card(card: &ListingCard) -> String {
    let marker = if card.favorite { "*" } else { " " };
    let status = match card.status {
        ListingStatus::Active => "active",
        ListingStatus::Sold => "sold",
    };
    format!(
        "{} [{}] {}  {}  {}  {}  {}",
        marker,
        card.id,
        card.title,
        format_price_krw(card.price),
        status,
        format_date(card.listed_at),
        card.platform,
    )
}

/// KRW display amount: no decimals, thousands grouping.
pub fn format_price_krw(amount: f64) -> String {
    let whole = amount.max(0.0).floor() as u64;
    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("\u{20A9} {grouped}")
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y.%m.%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_price_krw(1_234_567.0), "\u{20A9} 1,234,567");
        assert_eq!(format_price_krw(0.0), "\u{20A9} 0");
        assert_eq!(format_price_krw(999.9), "\u{20A9} 999");
        assert_eq!(format_price_krw(-5.0), "\u{20A9} 0");
    }

    #[test]
    fn formats_dates_with_dots() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1);
        assert_eq!(format_date(date), "2024.05.01");
        assert_eq!(format_date(None), "");
    }
}
