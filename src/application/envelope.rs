//! Wire format of the categories collection endpoint.

use serde::Deserialize;
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Category;

/// Status value that, like an absent status, means success.
pub const STATUS_OK: i64 = 200;

/// Pagination block of the `meta` object. Decoded for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub total: u64,
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Meta {
    pagination: Option<Pagination>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envelope {
    status: i64,
    data: Option<Vec<Category>>,
    meta: Option<Meta>,
}

/// One decoded page of categories.
///
/// A page may carry data *and* a non-success status at the same time; callers
/// decide whether such partial data is usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
    pub page: u32,
    pub categories: Vec<Category>,
    /// Envelope status, `None` when absent or 0
    pub status: Option<i64>,
    pub pagination: Option<Pagination>,
}

impl CategoryPage {
    pub fn empty(page: u32) -> Self {
        Self {
            page,
            categories: Vec::new(),
            status: None,
            pagination: None,
        }
    }

    /// Decode a response body.
    ///
    /// An empty or whitespace-only body is a page without categories.
    /// Malformed JSON is an [`ApplicationError::Decode`] carrying the raw body.
    pub fn decode(page: u32, body: &str) -> ApplicationResult<Self> {
        if body.trim().is_empty() {
            return Ok(Self::empty(page));
        }

        let envelope: Envelope = serde_json::from_str(body).map_err(|source| {
            debug!("undecodable body for page {}:\n{}", page, pretty_body(body));
            ApplicationError::Decode {
                page,
                body: body.to_string(),
                source,
            }
        })?;

        Ok(Self {
            page,
            categories: envelope.data.unwrap_or_default(),
            status: (envelope.status != 0).then_some(envelope.status),
            pagination: envelope.meta.and_then(|m| m.pagination),
        })
    }

    /// True unless the envelope carried a status other than 0 or 200.
    pub fn is_success(&self) -> bool {
        matches!(self.status, None | Some(STATUS_OK))
    }

    /// Take the categories, turning a non-success status into an error that
    /// still holds the decoded data.
    pub fn into_categories(self) -> ApplicationResult<Vec<Category>> {
        match self.status {
            Some(status) if status != STATUS_OK => Err(ApplicationError::NonSuccessStatus {
                page: self.page,
                status,
                partial: self.categories,
            }),
            _ => Ok(self.categories),
        }
    }
}

/// Indent a JSON body for logging, falling back to the raw text.
fn pretty_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .and_then(|v| serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| body.to_string())
}
