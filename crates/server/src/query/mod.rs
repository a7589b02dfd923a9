//! Typed list-query handling: filter expressions parsed from request query
//! parameters, plus projection, sort, and pagination directives.

mod filter;
mod pagination;

pub use filter::{Comparison, Condition, Filter, QueryError};
pub use pagination::{PageRef, Pagination};

use std::collections::HashMap;

/// Query parameters with a meaning of their own, excluded from filtering.
pub(crate) const RESERVED_PARAMS: [&str; 4] = ["select", "sort", "page", "limit"];

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 25;
const DEFAULT_SORT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(field) => SortKey {
                field: field.to_string(),
                descending: true,
            },
            None => SortKey {
                field: raw.to_string(),
                descending: false,
            },
        }
    }

    fn default_sort() -> Vec<SortKey> {
        vec![SortKey {
            field: DEFAULT_SORT_FIELD.to_string(),
            descending: true,
        }]
    }
}

/// Everything a list endpoint needs: the filter plus select/sort/page/limit.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub filter: Filter,
    pub select: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub page: u64,
    pub limit: u64,
}

impl ListParams {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, QueryError> {
        let filter = Filter::from_params(params)?;

        let select = params.get("select").and_then(|raw| {
            let fields: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|field| !field.is_empty())
                .map(str::to_string)
                .collect();
            if fields.is_empty() {
                None
            } else {
                Some(fields)
            }
        });

        let sort = params
            .get("sort")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty() && *key != "-")
                    .map(SortKey::parse)
                    .collect::<Vec<_>>()
            })
            .filter(|keys| !keys.is_empty())
            .unwrap_or_else(SortKey::default_sort);

        // Non-numeric or zero page/limit fall back to the defaults.
        let page = params
            .get("page")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = params
            .get("limit")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|limit| *limit >= 1)
            .unwrap_or(DEFAULT_LIMIT);

        Ok(ListParams {
            filter,
            select,
            sort,
            page,
            limit,
        })
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}
