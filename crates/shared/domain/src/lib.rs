//! Domain layer - Value types shared by the gateway and its callers.
//!
//! This crate has no driver or runtime dependencies. It describes what a
//! call selects (filters, page windows), what it changes (field updates)
//! and what it reports back (update outcomes, inserted ids, deadlines).

pub mod constants;
pub mod deadline;
pub mod error;
pub mod filter;
pub mod page;
pub mod update;
pub mod write;

pub use constants::*;
pub use deadline::Deadline;
pub use error::{validate_namespace, DomainError, DomainResult};
pub use filter::Filter;
pub use page::PageWindow;
pub use update::{FieldUpdate, UpdateOutcome};
pub use write::InsertedId;
