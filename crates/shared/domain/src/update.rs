//! Single-field updates and their outcome.

use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use crate::constants::{ID_FIELD, OPERATOR_PREFIX, SET_OPERATOR};
use crate::error::{DomainError, DomainResult};

/// A `$set` of one field to one value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: String,
    pub value: Bson,
}

impl FieldUpdate {
    /// Create a field update.
    pub fn set(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check that the update can be sent to the server as-is.
    pub fn validate(&self) -> DomainResult<()> {
        if self.field.is_empty() {
            return Err(DomainError::validation("Update field must not be empty"));
        }
        if self.field.starts_with(OPERATOR_PREFIX) {
            return Err(DomainError::validation(format!(
                "Update field '{}' is an operator",
                self.field
            )));
        }
        if self.field == ID_FIELD {
            return Err(DomainError::validation("The _id field is immutable"));
        }
        Ok(())
    }

    /// Render as an update document: `{ "$set": { field: value } }`.
    pub fn to_document(&self) -> Document {
        let mut fields = Document::new();
        fields.insert(self.field.clone(), self.value.clone());

        let mut update = Document::new();
        update.insert(SET_OPERATOR, fields);
        update
    }
}

/// Raw counts reported by a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateOutcome {
    /// Documents that matched the filter (0 or 1)
    pub matched_count: u64,
    /// Documents whose stored value actually changed (0 or 1)
    pub modified_count: u64,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self {
            matched_count,
            modified_count,
        }
    }

    /// Exactly one document was modified.
    pub fn modified_one(&self) -> bool {
        self.modified_count == 1
    }

    /// A document matched but already held the requested value.
    pub fn unchanged(&self) -> bool {
        self.matched_count > 0 && self.modified_count == 0
    }

    /// No document matched the filter.
    pub fn no_match(&self) -> bool {
        self.matched_count == 0
    }
}
