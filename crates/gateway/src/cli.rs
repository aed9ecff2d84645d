//! CLI argument definitions.
//!
//! Filter, update and document values are read as extended JSON. A value
//! that does not parse as JSON is taken as a plain string, so
//! `--value alice` and `--value '"alice"'` are equivalent.

use bson::{Bson, Document};
use clap::{Args, Parser, Subcommand};

use common::{GatewayError, GatewayResult};
use domain::{FieldUpdate, Filter};

/// Document Gateway - generic CRUD against a MongoDB deployment
#[derive(Parser, Debug)]
#[command(name = "document-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Connection URI (overrides MONGODB_URI)
    #[arg(long, global = true)]
    pub uri: Option<String>,

    /// Deadline for the document operation, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the server answers
    Ping,

    /// List database names
    ListDbs,

    /// Print the first matching document
    FindOne {
        #[command(flatten)]
        namespace: NamespaceArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print a window of matching documents
    FindMany {
        #[command(flatten)]
        namespace: NamespaceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum number of documents (0 for no limit)
        #[arg(long, default_value_t = 0)]
        limit: u64,
        /// Number of matches to skip
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Insert one document and print its id
    Insert {
        #[command(flatten)]
        namespace: NamespaceArgs,
        /// Document as a JSON object
        #[arg(long)]
        document: String,
    },

    /// Set one field on the first matching document
    Update {
        #[command(flatten)]
        namespace: NamespaceArgs,
        #[command(flatten)]
        filter: FilterArgs,
        /// Field to set
        #[arg(long)]
        set_field: String,
        /// New value
        #[arg(long)]
        set_value: String,
    },

    /// Delete the first matching document
    Delete {
        #[command(flatten)]
        namespace: NamespaceArgs,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// Database and collection selection
#[derive(Args, Debug, Clone)]
pub struct NamespaceArgs {
    /// Database name
    #[arg(long)]
    pub db: String,

    /// Collection name
    #[arg(short, long)]
    pub collection: String,
}

/// Optional single-field equality filter
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Field to match (omit to match every document)
    #[arg(long, requires = "value")]
    pub field: Option<String>,

    /// Value the field must equal
    #[arg(long, requires = "field")]
    pub value: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> Filter {
        match (&self.field, &self.value) {
            (Some(field), Some(value)) => Filter::equals(field.clone(), parse_value(value)),
            _ => Filter::All,
        }
    }
}

/// Parse a command-line value as extended JSON, falling back to a string.
pub fn parse_value(raw: &str) -> Bson {
    serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|json| Bson::try_from(json).ok())
        .unwrap_or_else(|| Bson::String(raw.to_string()))
}

/// Parse a `--document` argument, which must be a JSON object.
pub fn parse_document(raw: &str) -> GatewayResult<Document> {
    let json: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| GatewayError::invalid_argument(format!("document is not JSON: {}", e)))?;

    match Bson::try_from(json) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(GatewayError::invalid_argument(format!(
            "document must be a JSON object, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(GatewayError::invalid_argument(format!(
            "document is not valid extended JSON: {}",
            e
        ))),
    }
}

/// Build the `$set` for `update` from its arguments.
pub fn field_update(field: &str, value: &str) -> FieldUpdate {
    FieldUpdate::set(field, parse_value(value))
}
