//! Document Gateway Library
//!
//! This crate exposes generic CRUD operations against a MongoDB deployment,
//! parameterized by database, collection, a single equality filter and a
//! page window. Every call is one driver round trip bounded by a deadline.
//!
//! # Example
//!
//! ```rust,no_run
//! use document_gateway::{config::GatewayConfig, DocumentGateway};
//! use domain::{Deadline, Filter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = DocumentGateway::open(&GatewayConfig::from_env()).await?;
//!
//! let id = gateway
//!     .insert("app", "people", &bson::doc! { "name": "a" }, Deadline::Configured)
//!     .await?;
//! let person: bson::Document = gateway
//!     .fetch_one("app", "people", &id.to_filter(), Deadline::Configured)
//!     .await?;
//! assert_eq!(person.get_str("name")?, "a");
//!
//! gateway
//!     .delete("app", "people", &Filter::equals("name", "a"), Deadline::Configured)
//!     .await?;
//! gateway.close(Deadline::Configured).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod gateway;
pub mod infra;

pub use config::GatewayConfig;
pub use gateway::DocumentGateway;
pub use infra::{DocumentStore, MongoStore};
