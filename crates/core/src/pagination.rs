//! Page windowing for list endpoints.
//!
//! Pages are 1-based and fixed-size. A page whose first row lies beyond the
//! available rows is an error rather than an empty result.

use crate::error::CoreError;

/// Rows per page on every list endpoint.
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// A resolved `[start, start + size)` window over the storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub size: i64,
    pub start: i64,
}

impl PageWindow {
    /// Compute the window for a 1-based page number.
    ///
    /// Returns [`CoreError::PageOutOfRange`] when `page < 1`.
    pub fn new(page: i64, size: i64) -> Result<Self, CoreError> {
        if page < 1 || size < 1 {
            return Err(CoreError::PageOutOfRange { page, total: 0 });
        }
        Ok(Self {
            page,
            size,
            start: (page - 1).saturating_mul(size),
        })
    }

    /// Exclusive end offset of the window.
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.size)
    }

    /// Reject the window when its first row does not exist.
    ///
    /// A table with `total` rows has rows `0..total`, so the window is valid
    /// only if `start < total`. This also rejects page 1 of an empty table.
    pub fn check_against(&self, total: i64) -> Result<(), CoreError> {
        if self.start >= total {
            return Err(CoreError::PageOutOfRange {
                page: self.page,
                total,
            });
        }
        Ok(())
    }
}
