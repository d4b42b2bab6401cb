/// Recognized price-history documents, selected by a substring match on the
/// current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKey {
    Iphone13,
    SonyA7c,
}

impl ChartKey {
    /// Maps a search query to the price-history document it should show,
    /// if any.
    pub fn for_query(query: &str) -> Option<Self> {
        let q = query.to_lowercase();
        if q.contains("iphone 13") {
            Some(Self::Iphone13)
        } else if q.contains("a7c") {
            Some(Self::SonyA7c)
        } else {
            None
        }
    }
}

/// Averaged price series: `labels` and `avg` are parallel sequences.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceHistory {
    pub labels: Vec<String>,
    pub avg: Vec<f64>,
}

impl PriceHistory {
    /// A series is usable only when both sequences are non-empty and of
    /// equal length; anything else hides the chart.
    pub fn is_well_formed(&self) -> bool {
        !self.labels.is_empty() && self.labels.len() == self.avg.len()
    }
}
