use serde::{Deserialize, Serialize};

/// Page/limit pair taken from list query strings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl Pagination {
    /// Build from optional query parameters, falling back to the defaults
    pub fn from_query(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            limit: limit.unwrap_or_else(default_limit),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Standard envelope for paged list responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

impl<T> Paged<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total_items: u64) -> Self {
        let total_pages = if pagination.limit == 0 {
            0
        } else {
            total_items.div_ceil(pagination.limit)
        };
        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total_pages,
            total_items,
        }
    }
}
