//! Console output types and rendering.
//!
//! Command handlers return a [`CommandOutput`]; the loop renders it as a
//! bordered table or as pretty JSON depending on the configured format.

use crate::catalog::NamedQuery;
use crate::config::OutputFormat;
use crate::db::QueryResult;
use crate::error::SandboxError;
use crate::health::HealthReport;
use crate::records::{Book, Order, Student};
use crate::stats::DatabaseStats;
use comfy_table::{presets, Cell, ContentArrangement, Table};
use serde::Serialize;

/// Message printed when the console exits.
pub const GOODBYE: &str = "Happy learning! Goodbye!";

/// Output from a console command.
#[derive(Debug, Clone)]
pub enum CommandOutput {
    /// Plain text (help, banners).
    Info(String),

    /// A failed command, printed as `<category>: <message>`.
    Error {
        category: &'static str,
        message: String,
    },

    /// Result of an executed statement.
    Query(QueryResult),

    /// The sample query catalog.
    Samples(Vec<NamedQuery>),

    /// Tables of the practice schema.
    Tables(Vec<&'static str>),

    /// Database statistics.
    Stats(DatabaseStats),

    /// Typed student listing.
    Students(Vec<Student>),

    /// Typed book listing.
    Books(Vec<Book>),

    /// Orders joined with student and book details.
    Orders(Vec<Order>),

    /// Connectivity report.
    Health(HealthReport),

    /// Nothing to print.
    Empty,

    /// Leave the console.
    Exit,
}

impl CommandOutput {
    /// Creates an info message.
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    /// Returns true for failed commands.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns true if the console should stop.
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Renders the output in the requested format.
    pub fn render(&self, format: OutputFormat) -> String {
        match (self, format) {
            (Self::Info(msg), _) => msg.clone(),
            (Self::Error { category, message }, _) => format!("{category}: {message}"),
            (Self::Empty, _) => String::new(),
            (Self::Exit, _) => GOODBYE.to_string(),

            (Self::Query(result), OutputFormat::Json) => to_json(result),
            (Self::Samples(queries), OutputFormat::Json) => to_json(queries),
            (Self::Tables(names), OutputFormat::Json) => to_json(names),
            (Self::Stats(stats), OutputFormat::Json) => to_json(stats),
            (Self::Health(report), OutputFormat::Json) => to_json(report),
            (Self::Students(students), OutputFormat::Json) => to_json(students),
            (Self::Books(books), OutputFormat::Json) => to_json(books),
            (Self::Orders(orders), OutputFormat::Json) => to_json(orders),

            (Self::Query(result), OutputFormat::Table) => render_query(result),
            (Self::Samples(queries), OutputFormat::Table) => render_table(
                &["title", "sql"],
                queries
                    .iter()
                    .map(|q| vec![q.title.to_string(), q.sql.to_string()]),
            ),
            (Self::Tables(names), OutputFormat::Table) => {
                render_table(&["table"], names.iter().map(|n| vec![n.to_string()]))
            }
            (Self::Stats(stats), OutputFormat::Table) => render_stats(stats),
            (Self::Health(report), OutputFormat::Table) => render_health(report),
            (Self::Students(students), OutputFormat::Table) => render_table(
                &["id", "name", "age", "grade", "email", "enrolled"],
                students.iter().map(|s| {
                    vec![
                        s.id.to_string(),
                        s.name.clone(),
                        s.age.to_string(),
                        s.grade.to_string(),
                        optional(s.email.as_ref()),
                        optional(s.enrollment_date.as_ref()),
                    ]
                }),
            ),
            (Self::Books(books), OutputFormat::Table) => render_table(
                &["id", "title", "author", "genre", "price", "year", "available"],
                books.iter().map(|b| {
                    vec![
                        b.id.to_string(),
                        b.title.clone(),
                        b.author.clone(),
                        optional(b.genre.as_ref()),
                        optional(b.price.map(|p| format!("{p:.2}")).as_ref()),
                        optional(b.publication_year.as_ref()),
                        optional(b.available.as_ref()),
                    ]
                }),
            ),
            (Self::Orders(orders), OutputFormat::Table) => render_table(
                &["id", "date", "student", "book", "quantity", "price"],
                orders.iter().map(|o| {
                    vec![
                        o.id.to_string(),
                        o.order_date.clone(),
                        o.student_name.clone(),
                        o.book_title.clone(),
                        o.quantity.to_string(),
                        optional(o.book_price.map(|p| format!("{p:.2}")).as_ref()),
                    ]
                }),
            ),
        }
    }
}

impl From<SandboxError> for CommandOutput {
    fn from(error: SandboxError) -> Self {
        Self::Error {
            category: error.category(),
            message: error.message().to_string(),
        }
    }
}

/// Footer printed under a statement result.
pub fn footer(result: &QueryResult) -> String {
    format!(
        "{} row(s) in {} ms",
        result.total_rows(),
        result.execution_time_ms()
    )
}

fn render_query(result: &QueryResult) -> String {
    let rows = result
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect::<Vec<_>>());
    let columns: Vec<&str> = result.columns().iter().map(String::as_str).collect();
    format!("{}\n{}", render_table(&columns, rows), footer(result))
}

fn render_stats(stats: &DatabaseStats) -> String {
    let summary = render_table(
        &["statistic", "value"],
        [
            ("total students", stats.total_students.to_string()),
            ("total books", stats.total_books.to_string()),
            ("total orders", stats.total_orders.to_string()),
            ("average student age", stats.average_student_age.to_string()),
            ("average book price", stats.average_book_price.to_string()),
        ]
        .into_iter()
        .map(|(name, value)| vec![name.to_string(), value]),
    );
    let genres = render_table(
        &["genre", "count"],
        stats
            .books_by_genre
            .iter()
            .map(|g| vec![g.genre.clone(), g.count.to_string()]),
    );
    format!("{summary}\n{genres}")
}

fn render_health(report: &HealthReport) -> String {
    let status = if report.connected { "connected" } else { "disconnected" };
    format!("{status}: {}", report.message)
}

fn optional<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| "NULL".to_string(), ToString::to_string)
}

fn render_table<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(Cell::new));
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
