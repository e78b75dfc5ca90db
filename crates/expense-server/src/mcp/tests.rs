use rmcp::{handler::server::wrapper::Parameters, model::ResourceContents, ServerHandler};
use serde_json::{json, Value};

use super::*;

fn setup() -> (ExpenseMcpServer, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let categories = dir.path().join("categories.json");
    std::fs::write(&categories, r#"{"categories": [{"name": "Food"}]}"#).unwrap();
    let db = Database::in_memory().unwrap();
    (ExpenseMcpServer::new(db, categories), dir)
}

/// Pull the JSON document out of a tool result's text content
fn body(result: CallToolResult) -> Value {
    let raw = serde_json::to_value(&result).unwrap();
    let text = raw["content"][0]["text"].as_str().unwrap().to_string();
    serde_json::from_str(&text).unwrap()
}

fn params<T: serde::de::DeserializeOwned>(value: Value) -> Parameters<T> {
    Parameters(serde_json::from_value(value).unwrap())
}

#[test]
fn test_server_info_advertises_tools_and_resources() {
    let (server, _dir) = setup();
    let info = server.get_info();
    assert_eq!(info.server_info.name, "expense-tracker");
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());
}

#[test]
fn test_all_six_tools_registered() {
    let (server, _dir) = setup();
    let mut names: Vec<String> = server
        .tool_router
        .list_all()
        .into_iter()
        .map(|t| t.name.to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "add_expense",
            "delete_expense",
            "edit_expense",
            "list_expenses",
            "search_expenses",
            "summarize",
        ]
    );
}

#[tokio::test]
async fn test_tool_round_trip() {
    let (server, _dir) = setup();

    let added = body(
        server
            .add_expense(params(json!({
                "date": "2024-01-15",
                "amount": 42.50,
                "category": "Food",
                "subcategory": "Groceries",
                "note": "Weekly shop"
            })))
            .await
            .unwrap(),
    );
    assert_eq!(added, json!({"status": "ok", "id": 1}));

    let listed = body(
        server
            .list_expenses(params(json!({"start_date": "2024-01-01", "end_date": "2024-01-31"})))
            .await
            .unwrap(),
    );
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["results"][0]["note"], "Weekly shop");

    let summary = body(
        server
            .summarize(params(json!({"start_date": "2024-01-01", "end_date": "2024-01-31"})))
            .await
            .unwrap(),
    );
    assert_eq!(
        summary["results"],
        json!([{"category": "Food", "total_amount": 42.5}])
    );

    let edited = body(
        server
            .edit_expense(params(json!({"id": 1, "subcategory": ""})))
            .await
            .unwrap(),
    );
    assert_eq!(edited, json!({"status": "ok", "id": 1, "updated_fields": 1}));

    let found = body(
        server
            .search_expenses(params(json!({"keyword": "WEEKLY"})))
            .await
            .unwrap(),
    );
    assert_eq!(found["keyword"], "WEEKLY");
    assert_eq!(found["count"], 1);
    assert_eq!(found["results"][0]["subcategory"], "");

    let deleted = body(
        server
            .delete_expense(params(json!({"id": 1})))
            .await
            .unwrap(),
    );
    assert_eq!(deleted["status"], "ok");
}

#[tokio::test]
async fn test_missing_ids_are_error_results_not_failures() {
    let (server, _dir) = setup();

    let edited = body(
        server
            .edit_expense(params(json!({"id": 5, "amount": 3.0})))
            .await
            .unwrap(),
    );
    assert_eq!(
        edited,
        json!({"status": "error", "message": "Expense with id 5 not found"})
    );

    let deleted = body(
        server
            .delete_expense(params(json!({"id": 5})))
            .await
            .unwrap(),
    );
    assert_eq!(deleted["status"], "error");
}

#[test]
fn test_resource_list() {
    let resources = ExpenseMcpServer::resource_list();
    let uris: Vec<&str> = resources.iter().map(|r| r.uri.as_str()).collect();
    assert_eq!(uris, vec![CATEGORIES_URI, INSTRUCTIONS_URI]);
}

#[test]
fn test_categories_resource_reads_file_each_time() {
    let (server, dir) = setup();

    let first = server.resource_contents(CATEGORIES_URI).unwrap();
    let ResourceContents::TextResourceContents {
        text, mime_type, ..
    } = first
    else {
        panic!("expected text contents");
    };
    assert_eq!(text, r#"{"categories": [{"name": "Food"}]}"#);
    assert_eq!(mime_type.as_deref(), Some("application/json"));

    std::fs::write(dir.path().join("categories.json"), "{}").unwrap();
    let second = server.resource_contents(CATEGORIES_URI).unwrap();
    let ResourceContents::TextResourceContents { text, .. } = second else {
        panic!("expected text contents");
    };
    assert_eq!(text, "{}");
}

#[test]
fn test_missing_categories_file_is_an_error() {
    let db = Database::in_memory().unwrap();
    let server = ExpenseMcpServer::new(db, "/nonexistent/categories.json");
    assert!(server.resource_contents(CATEGORIES_URI).is_err());
}

#[test]
fn test_instructions_resource() {
    let (server, _dir) = setup();
    let contents = server.resource_contents(INSTRUCTIONS_URI).unwrap();
    let ResourceContents::TextResourceContents {
        text, mime_type, ..
    } = contents
    else {
        panic!("expected text contents");
    };
    assert!(text.contains("current_date: "));
    assert_eq!(mime_type.as_deref(), Some("text/plain"));
}

#[test]
fn test_unknown_resource() {
    let (server, _dir) = setup();
    assert!(server.resource_contents("expense://missing").is_err());
}
