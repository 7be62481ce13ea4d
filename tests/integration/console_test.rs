//! Console command dispatch against a real database.

use super::common::seeded_client;
use sql_sandbox::config::OutputFormat;
use sql_sandbox::console::{CommandOutput, Console};

#[tokio::test]
async fn test_console_renders_query_table() {
    let client = seeded_client().await;
    let console = Console::new(&client, OutputFormat::Table);

    let output = console
        .handle_line("SELECT name FROM students WHERE grade = 12")
        .await;
    let rendered = output.render(console.format());

    assert!(rendered.contains("Grace Lee"));
    assert!(rendered.contains("1 row(s) in"));
}

#[tokio::test]
async fn test_console_renders_json() {
    let client = seeded_client().await;
    let console = Console::new(&client, OutputFormat::Json);

    let rendered = console
        .handle_line("SELECT COUNT(*) AS total_students FROM students;")
        .await
        .render(console.format());
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(json["columns"][0], "total_students");
    assert_eq!(json["rows"][0][0], 8);
    assert_eq!(json["totalRows"], 1);
}

#[tokio::test]
async fn test_console_keeps_going_after_error() {
    let client = seeded_client().await;
    let console = Console::new(&client, OutputFormat::Table);

    let failed = console.handle_line("SELEC * FROM students").await;
    assert!(failed.is_error());
    assert!(failed
        .render(OutputFormat::Table)
        .starts_with("Execution Error: "));

    let next = console.handle_line("SELECT 1").await;
    assert!(matches!(next, CommandOutput::Query(_)));
}

#[tokio::test]
async fn test_console_stats_command() {
    let client = seeded_client().await;
    let console = Console::new(&client, OutputFormat::Table);

    match console.handle_line("STATS").await {
        CommandOutput::Stats(stats) => assert_eq!(stats.total_orders, 14),
        other => panic!("unexpected output: {other:?}"),
    }
}

#[tokio::test]
async fn test_console_record_commands() {
    let client = seeded_client().await;
    let console = Console::new(&client, OutputFormat::Json);

    match console.handle_line("students").await {
        CommandOutput::Students(students) => assert_eq!(students[0].name, "Alice Johnson"),
        other => panic!("unexpected output: {other:?}"),
    }
    match console.handle_line("books").await {
        CommandOutput::Books(books) => assert_eq!(books.len(), 8),
        other => panic!("unexpected output: {other:?}"),
    }

    let rendered = console.handle_line("orders").await.render(console.format());
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(14));
    assert!(json[0]["studentName"].is_string());
    assert!(json[0]["bookPrice"].is_f64());
}
