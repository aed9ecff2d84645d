//! Results of insert operations.

use bson::Bson;

use crate::constants::ID_FIELD;
use crate::filter::Filter;

/// Identifier the server assigned to an inserted document.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedId(pub Bson);

impl InsertedId {
    /// The raw identifier value.
    pub fn as_bson(&self) -> &Bson {
        &self.0
    }

    /// Filter selecting exactly the inserted document.
    pub fn to_filter(&self) -> Filter {
        Filter::equals(ID_FIELD, self.0.clone())
    }
}

impl From<Bson> for InsertedId {
    fn from(value: Bson) -> Self {
        InsertedId(value)
    }
}

impl std::fmt::Display for InsertedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Bson::ObjectId(oid) => write!(f, "{}", oid.to_hex()),
            Bson::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}
