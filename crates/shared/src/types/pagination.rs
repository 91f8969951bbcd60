//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::PaginationConfig;

/// Errors from interpreting client-supplied pagination values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    /// The limit was zero or negative.
    #[error("limit must be a positive integer")]
    InvalidLimit,

    /// The offset was negative.
    #[error("offset must not be negative")]
    InvalidOffset,
}

/// Configured bounds applied when building a [`PageRequest`].
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    /// Page size used when the client sends no limit.
    pub default_limit: u64,
    /// Largest page size a client can request.
    pub max_limit: u64,
}

impl From<PaginationConfig> for PageLimits {
    fn from(config: PaginationConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }
}

/// Validated limit/offset pair for a list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Maximum rows to return.
    pub limit: u64,
    /// Rows to skip before the first returned row.
    pub offset: u64,
}

impl PageRequest {
    /// Builds a page request from raw query values.
    ///
    /// A missing limit takes the configured default; a limit above the
    /// configured ceiling is clamped to it, not rejected. A missing offset
    /// is zero.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidLimit` for a non-positive limit and
    /// `PageError::InvalidOffset` for a negative offset.
    pub fn from_query(
        limit: Option<i64>,
        offset: Option<i64>,
        limits: PageLimits,
    ) -> Result<Self, PageError> {
        let limit = match limit {
            None => limits.default_limit,
            Some(raw) if raw < 1 => return Err(PageError::InvalidLimit),
            Some(raw) => u64::try_from(raw)
                .unwrap_or(u64::MAX)
                .min(limits.max_limit),
        };

        let offset = match offset {
            None => 0,
            Some(raw) if raw < 0 => return Err(PageError::InvalidOffset),
            Some(raw) => u64::try_from(raw).unwrap_or(0),
        };

        Ok(Self { limit, offset })
    }
}

/// Pagination metadata echoed in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Limit that was applied after defaulting and clamping.
    pub limit: u64,
    /// Offset that was applied.
    pub offset: u64,
    /// Number of rows actually returned.
    pub count: u64,
}

impl PageMeta {
    /// Builds metadata for a page of `count` returned rows.
    #[must_use]
    pub const fn new(page: PageRequest, count: u64) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            count,
        }
    }
}
