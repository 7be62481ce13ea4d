//! Typed access to the sample tables.
//!
//! Listings decode shaped rows into structs; registration binds its values
//! as statement parameters rather than splicing them into SQL text.

use crate::db::{DatabaseClient, Row, Value};
use crate::error::{Result, SandboxError};
use serde::{Deserialize, Serialize};

/// A row of the `students` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub grade: i64,
    pub email: Option<String>,
    /// `YYYY-MM-DD`.
    pub enrollment_date: Option<String>,
}

/// A row of the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub price: Option<f64>,
    pub publication_year: Option<i64>,
    pub available: Option<bool>,
}

/// A row of `orders` joined with its student and book.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub student_id: i64,
    pub book_id: i64,
    /// `YYYY-MM-DD`.
    pub order_date: String,
    pub quantity: i64,
    pub student_name: String,
    pub book_title: String,
    pub book_price: Option<f64>,
}

/// Input for [`add_student`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub grade: i64,
    pub email: Option<String>,
}

const LIST_STUDENTS: &str =
    "SELECT id, name, age, grade, email, enrollment_date FROM students ORDER BY name";
const LIST_BOOKS: &str =
    "SELECT id, title, author, genre, price, publication_year, available FROM books ORDER BY title";
const LIST_ORDERS: &str = "SELECT o.id, o.student_id, o.book_id, o.order_date, o.quantity, \
     s.name AS student_name, b.title AS book_title, b.price AS book_price \
     FROM orders o \
     JOIN students s ON o.student_id = s.id \
     JOIN books b ON o.book_id = b.id \
     ORDER BY o.order_date DESC, o.id";
const INSERT_STUDENT: &str = "INSERT INTO students (name, age, grade, email) VALUES (?, ?, ?, ?)";

/// All students ordered by name.
pub async fn list_students(client: &dyn DatabaseClient) -> Result<Vec<Student>> {
    client
        .execute_query(LIST_STUDENTS)
        .await?
        .into_rows()
        .into_iter()
        .map(student_from_row)
        .collect()
}

/// All books ordered by title.
pub async fn list_books(client: &dyn DatabaseClient) -> Result<Vec<Book>> {
    client
        .execute_query(LIST_BOOKS)
        .await?
        .into_rows()
        .into_iter()
        .map(book_from_row)
        .collect()
}

/// All orders with student and book details, newest first.
pub async fn list_orders(client: &dyn DatabaseClient) -> Result<Vec<Order>> {
    client
        .execute_query(LIST_ORDERS)
        .await?
        .into_rows()
        .into_iter()
        .map(order_from_row)
        .collect()
}

/// Inserts one student, returning whether a row was written.
pub async fn add_student(client: &dyn DatabaseClient, student: &NewStudent) -> Result<bool> {
    let name = student.name.trim();
    if name.is_empty() {
        return Err(SandboxError::invalid_input("Student name is required"));
    }

    let params = [
        Value::from(name),
        Value::from(student.age),
        Value::from(student.grade),
        Value::from(student.email.clone()),
    ];
    let result = client.execute_with_params(INSERT_STUDENT, &params).await?;
    Ok(result.total_rows() > 0)
}

fn student_from_row(row: Row) -> Result<Student> {
    match row.as_slice() {
        [id, name, age, grade, email, enrollment_date] => Ok(Student {
            id: int(id, "id")?,
            name: text(name, "name")?,
            age: int(age, "age")?,
            grade: int(grade, "grade")?,
            email: email.as_str().map(String::from),
            enrollment_date: enrollment_date.as_str().map(String::from),
        }),
        other => Err(unexpected("students", other.len())),
    }
}

fn book_from_row(row: Row) -> Result<Book> {
    match row.as_slice() {
        [id, title, author, genre, price, year, available] => Ok(Book {
            id: int(id, "id")?,
            title: text(title, "title")?,
            author: text(author, "author")?,
            genre: genre.as_str().map(String::from),
            price: float(price, "price")?,
            publication_year: year.as_i64(),
            available: match available {
                Value::Bool(b) => Some(*b),
                _ => None,
            },
        }),
        other => Err(unexpected("books", other.len())),
    }
}

fn order_from_row(row: Row) -> Result<Order> {
    match row.as_slice() {
        [id, student_id, book_id, order_date, quantity, student_name, book_title, book_price] => {
            Ok(Order {
                id: int(id, "id")?,
                student_id: int(student_id, "student_id")?,
                book_id: int(book_id, "book_id")?,
                order_date: text(order_date, "order_date")?,
                quantity: int(quantity, "quantity")?,
                student_name: text(student_name, "student_name")?,
                book_title: text(book_title, "book_title")?,
                book_price: float(book_price, "book_price")?,
            })
        }
        other => Err(unexpected("orders", other.len())),
    }
}

fn int(value: &Value, field: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| SandboxError::internal(format!("Expected integer {field}, got {value}")))
}

fn float(value: &Value, field: &str) -> Result<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Float(f) => Ok(Some(*f)),
        other => Err(SandboxError::internal(format!(
            "Expected decimal {field}, got {other}"
        ))),
    }
}

fn text(value: &Value, field: &str) -> Result<String> {
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| SandboxError::internal(format!("Expected text {field}, got {value}")))
}

fn unexpected(table: &str, width: usize) -> SandboxError {
    SandboxError::internal(format!("Unexpected {table} row with {width} columns"))
}
