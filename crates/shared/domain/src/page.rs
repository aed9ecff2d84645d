//! Page window for multi-document reads.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// The `(limit, offset)` pair applied to a multi-document read.
///
/// No default bound is imposed: a `limit` of zero is handed to the driver
/// unchanged, which the server treats as "no limit". Callers that read
/// untrusted collections should always pass an explicit limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageWindow {
    pub limit: u64,
    pub offset: u64,
}

impl PageWindow {
    /// Create a page window.
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    /// Limit in the signed form the driver expects.
    pub fn driver_limit(&self) -> DomainResult<i64> {
        i64::try_from(self.limit)
            .map_err(|_| DomainError::validation(format!("Limit {} is too large", self.limit)))
    }

    /// Apply the window to an in-order sequence of matches.
    pub fn apply<I>(&self, matches: I) -> Vec<I::Item>
    where
        I: IntoIterator,
    {
        let skipped = matches.into_iter().skip(self.offset as usize);
        if self.limit == 0 {
            skipped.collect()
        } else {
            skipped.take(self.limit as usize).collect()
        }
    }
}
