use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: u64,
    pub limit: u64,
}

/// Prev/next descriptors derived from the page index bounds and the total
/// document count. Serializes to `{}` when neither side exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

impl Pagination {
    pub fn build(page: u64, limit: u64, total: u64) -> Self {
        // Saturating: page and limit come straight from the query string.
        let start_index = page.saturating_sub(1).saturating_mul(limit);
        let end_index = page.saturating_mul(limit);

        Pagination {
            next: (end_index < total).then_some(PageRef {
                page: page + 1,
                limit,
            }),
            prev: (start_index > 0).then_some(PageRef {
                page: page - 1,
                limit,
            }),
        }
    }
}
