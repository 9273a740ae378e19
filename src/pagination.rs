//! Offset/limit pagination shared by every list screen.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_PAGE_SIZE;

/// Zero-based page cursor as the tables keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Query-string pagination sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageQuery {
    pub limit: usize,
    pub offset: usize,
}

impl PageState {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        PageState {
            page_index,
            page_size,
        }
    }

    pub fn query(&self) -> PageQuery {
        PageQuery {
            limit: self.page_size,
            offset: self.page_index.saturating_mul(self.page_size),
        }
    }

    pub fn next(&mut self) {
        self.page_index += 1;
    }

    pub fn prev(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// A new search term or filter always starts from the first page.
    pub fn reset(&mut self) {
        self.page_index = 0;
    }
}

/// List envelope returned by the admin API: `{ data, total, limit, offset }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page {
            data: Vec::new(),
            total: None,
            limit: None,
            offset: None,
        }
    }
}

impl<T> Page<T> {
    /// Total row count, falling back to the rows in hand when the server omits it.
    pub fn total(&self) -> u64 {
        self.total.unwrap_or(self.data.len() as u64)
    }

    pub fn page_count(&self, page_size: usize) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total().div_ceil(page_size as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
