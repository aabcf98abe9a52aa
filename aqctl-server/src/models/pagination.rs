//! List query parameters

/// Maximum rows per list call
pub const MAX_LIMIT: i64 = 1000;

/// Rows per list call when `limit` is absent or out of range
pub const DEFAULT_LIMIT: i64 = 20;

/// Raw `/aq/list` query parameters.
///
/// `limit` and `offset` stay strings so that garbage falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub aq: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Normalized list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring filter on `aq`
    pub filter: Option<String>,
    /// Rows to return, in 1..=1000
    pub limit: i64,
    /// Rows to skip, >= 0
    pub offset: i64,
}

impl ListQuery {
    /// Create a list query with normalization.
    ///
    /// - Empty filter means no filter
    /// - Limit outside 1..=1000 falls back to 20
    /// - Negative offset falls back to 0
    pub fn new(filter: Option<String>, limit: i64, offset: i64) -> Self {
        Self {
            filter: filter.filter(|f| !f.is_empty()),
            limit: if (1..=MAX_LIMIT).contains(&limit) {
                limit
            } else {
                DEFAULT_LIMIT
            },
            offset: offset.max(0),
        }
    }

    /// Whether `key` passes the filter, matching `ILIKE '%filter%'`.
    pub fn matches(&self, key: &str) -> bool {
        match &self.filter {
            Some(f) => key.to_lowercase().contains(&f.to_lowercase()),
            None => true,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        let limit = params
            .limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_LIMIT);
        let offset = params
            .offset
            .and_then(|o| o.trim().parse::<i64>().ok())
            .unwrap_or(0);
        Self::new(params.aq, limit, offset)
    }
}
