//! Single-field equality filter.

use bson::{Bson, Document};

use crate::constants::OPERATOR_PREFIX;
use crate::error::{DomainError, DomainResult};

/// Selects the documents a call applies to.
///
/// A filter matches either every document in a collection or the documents
/// whose top-level `field` equals `value`. Compound, range and operator
/// queries are not expressible.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Filter {
    /// Match every document
    #[default]
    All,
    /// Match documents where `field == value`
    Equals { field: String, value: Bson },
}

impl Filter {
    /// Create an equality filter.
    pub fn equals(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Check that the filter can be sent to the server as-is.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            Filter::All => Ok(()),
            Filter::Equals { field, .. } if field.is_empty() => Err(DomainError::validation(
                "Filter field must not be empty; use Filter::All to match every document",
            )),
            Filter::Equals { field, .. } if field.starts_with(OPERATOR_PREFIX) => Err(
                DomainError::validation(format!("Filter field '{}' is an operator", field)),
            ),
            Filter::Equals { .. } => Ok(()),
        }
    }

    /// Render the filter as a query document.
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => Document::new(),
            Filter::Equals { field, value } => {
                let mut document = Document::new();
                document.insert(field.clone(), value.clone());
                document
            }
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::All => write!(f, "*"),
            Filter::Equals { field, value } => write!(f, "{} = {}", field, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_all_renders_empty_document() {
        assert!(Filter::All.to_document().is_empty());
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn test_equals_renders_single_field() {
        let filter = Filter::equals("name", "a");
        assert_eq!(filter.to_document(), doc! { "name": "a" });
    }

    #[test]
    fn test_empty_field_rejected() {
        let filter = Filter::equals("", "a");
        assert!(filter.validate().is_err());
    }

    #[test]
    fn test_operator_field_rejected() {
        let filter = Filter::equals("$where", "1 == 1");
        assert!(filter.validate().is_err());
        assert!(Filter::equals("name", 1).validate().is_ok());
    }
}
