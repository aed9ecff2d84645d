//! Command execution for the `document-gateway` binary.
//!
//! Each invocation opens one gateway, runs one command and closes the
//! gateway again. Documents are printed as relaxed extended JSON, one per
//! line for `find-many`.

use bson::{Bson, Document};
use tracing::{info, warn};

use common::GatewayResult;
use domain::{Deadline, PageWindow};

use crate::cli::{field_update, parse_document, Commands};
use crate::config::GatewayConfig;
use crate::gateway::DocumentGateway;

/// Execute a command against the configured deployment
pub async fn execute(command: Commands, config: GatewayConfig) -> GatewayResult<()> {
    let gateway = DocumentGateway::open(&config).await?;

    for line in run_and_close(&gateway, command).await? {
        println!("{}", line);
    }
    Ok(())
}

/// Run one command, then close the gateway whatever the outcome.
///
/// A command failure takes precedence; a close failure alongside it is
/// logged. A close failure after a successful command is returned.
pub async fn run_and_close(
    gateway: &DocumentGateway,
    command: Commands,
) -> GatewayResult<Vec<String>> {
    let result = run(gateway, command).await;
    let closed = gateway.close(Deadline::Configured).await;

    match (result, closed) {
        (Ok(lines), Ok(())) => Ok(lines),
        (Ok(_), Err(close_err)) => {
            warn!(code = close_err.code(), "Failed to close gateway: {}", close_err);
            Err(close_err)
        }
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            warn!(
                code = close_err.code(),
                "Failed to close gateway after command error: {}", close_err
            );
            Err(e)
        }
    }
}

/// Run one command and render its output lines.
pub async fn run(gateway: &DocumentGateway, command: Commands) -> GatewayResult<Vec<String>> {
    let deadline = Deadline::Configured;

    match command {
        Commands::Ping => {
            gateway.ping(deadline).await?;
            Ok(vec!["ok".to_string()])
        }
        Commands::ListDbs => gateway.list_databases(deadline).await,
        Commands::FindOne { namespace, filter } => {
            let document: Document = gateway
                .fetch_one(
                    &namespace.db,
                    &namespace.collection,
                    &filter.to_filter(),
                    deadline,
                )
                .await?;
            Ok(vec![render(document)])
        }
        Commands::FindMany {
            namespace,
            filter,
            limit,
            offset,
        } => {
            let documents: Vec<Document> = gateway
                .fetch_many(
                    &namespace.db,
                    &namespace.collection,
                    &filter.to_filter(),
                    PageWindow::new(limit, offset),
                    deadline,
                )
                .await?;
            Ok(documents.into_iter().map(render).collect())
        }
        Commands::Insert {
            namespace,
            document,
        } => {
            let document = parse_document(&document)?;
            let id = gateway
                .insert(&namespace.db, &namespace.collection, &document, deadline)
                .await?;
            info!(
                database = %namespace.db,
                collection = %namespace.collection,
                %id,
                "Inserted document"
            );
            Ok(vec![id.to_string()])
        }
        Commands::Update {
            namespace,
            filter,
            set_field,
            set_value,
        } => {
            let outcome = gateway
                .update_detailed(
                    &namespace.db,
                    &namespace.collection,
                    &filter.to_filter(),
                    &field_update(&set_field, &set_value),
                    deadline,
                )
                .await?;
            Ok(vec![serde_json::json!({
                "updated": outcome.modified_one(),
                "matched_count": outcome.matched_count,
                "modified_count": outcome.modified_count,
            })
            .to_string()])
        }
        Commands::Delete { namespace, filter } => {
            let deleted = gateway
                .delete(
                    &namespace.db,
                    &namespace.collection,
                    &filter.to_filter(),
                    deadline,
                )
                .await?;
            Ok(vec![serde_json::json!({ "deleted": deleted }).to_string()])
        }
    }
}

fn render(document: Document) -> String {
    Bson::Document(document).into_relaxed_extjson().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use clap::Parser;
    use common::{DeadlineConfig, ErrorKind, GatewayError};

    use crate::cli::Cli;
    use crate::infra::memory::MemoryStore;
    use crate::infra::MockDocumentStore;

    fn gateway() -> DocumentGateway {
        DocumentGateway::with_store(Arc::new(MemoryStore::new()), DeadlineConfig::default())
    }

    /// Parse a whitespace-separated command line.
    fn command(line: &str) -> Commands {
        let argv = std::iter::once("document-gateway").chain(line.split_whitespace());
        Cli::try_parse_from(argv).unwrap().command
    }

    #[tokio::test]
    async fn test_insert_then_find_one() {
        let gateway = gateway();

        let inserted = run(
            &gateway,
            command(r#"insert --db app -c people --document {"name":"a","age":3}"#),
        )
        .await
        .unwrap();
        assert_eq!(inserted.len(), 1);

        let found = run(
            &gateway,
            command("find-one --db app -c people --field age --value 3"),
        )
        .await
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&found[0]).unwrap();
        assert_eq!(json["name"], "a");
        assert_eq!(json["age"], 3);
        assert_eq!(json["_id"]["$oid"], inserted[0].as_str());
    }

    #[tokio::test]
    async fn test_find_many_prints_one_line_per_document() {
        let gateway = gateway();
        for name in ["a", "b", "c"] {
            let line = format!(
                r#"insert --db app -c people --document {{"name":"{}","team":"x"}}"#,
                name
            );
            run(&gateway, command(&line)).await.unwrap();
        }

        let lines = run(
            &gateway,
            command("find-many --db app -c people --field team --value x --limit 2 --offset 1"),
        )
        .await
        .unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""name":"b""#));
        assert!(lines[1].contains(r#""name":"c""#));
    }

    #[tokio::test]
    async fn test_update_and_delete_report_outcome() {
        let gateway = gateway();
        run(
            &gateway,
            command(r#"insert --db app -c people --document {"name":"a"}"#),
        )
        .await
        .unwrap();

        let updated = run(
            &gateway,
            command(
                "update --db app -c people --field name --value a --set-field age --set-value 4",
            ),
        )
        .await
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&updated[0]).unwrap();
        assert_eq!(json["updated"], true);
        assert_eq!(json["matched_count"], 1);

        let deleted = run(
            &gateway,
            command("delete --db app -c people --field name --value a"),
        )
        .await
        .unwrap();
        assert_eq!(deleted, vec![r#"{"deleted":true}"#.to_string()]);

        let err = run(&gateway, command("find-one --db app -c people"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_ping_and_list_dbs() {
        let gateway = gateway();
        run(&gateway, command("insert --db app -c people --document {}"))
            .await
            .unwrap();

        assert_eq!(run(&gateway, command("ping")).await.unwrap(), vec!["ok"]);
        assert_eq!(run(&gateway, command("list-dbs")).await.unwrap(), vec!["app"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_non_object_document() {
        let gateway = gateway();
        let err = run(&gateway, command("insert --db app -c people --document [1]"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_run_and_close_closes_after_success() {
        let store = Arc::new(MemoryStore::new());
        let gateway = DocumentGateway::with_store(store.clone(), DeadlineConfig::default());

        let lines = run_and_close(&gateway, command("ping")).await.unwrap();

        assert_eq!(lines, vec!["ok"]);
        assert!(gateway.is_closed().await);
        assert_eq!(store.shutdown_count(), 1);
    }

    #[tokio::test]
    async fn test_run_and_close_returns_close_error_after_success() {
        let mut store = MockDocumentStore::new();
        store.expect_ping().times(1).returning(|| Ok(()));
        store
            .expect_shutdown()
            .times(1)
            .returning(|| Err(GatewayError::connection("socket reset")));
        let gateway = DocumentGateway::with_store(Arc::new(store), DeadlineConfig::default());

        let err = run_and_close(&gateway, command("ping")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Connection);
        assert!(gateway.is_closed().await);
    }

    #[tokio::test]
    async fn test_run_and_close_keeps_command_error_when_close_also_fails() {
        let mut store = MockDocumentStore::new();
        store
            .expect_find_one()
            .times(1)
            .returning(|_, _, _| Ok(None));
        store
            .expect_shutdown()
            .times(1)
            .returning(|| Err(GatewayError::connection("socket reset")));
        let gateway = DocumentGateway::with_store(Arc::new(store), DeadlineConfig::default());

        let err = run_and_close(&gateway, command("find-one --db app -c people"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(gateway.is_closed().await);
    }
}
