//! Sample schema and fixture data.
//!
//! Recreates the `students`, `books` and `orders` tables from scratch and
//! fills them with the practice data learners query against. Every statement
//! runs through the regular execution path.

use crate::db::DatabaseClient;
use crate::error::Result;
use serde::Serialize;
use tracing::info;

/// Tables are dropped child-first so foreign keys never dangle.
const DROP_TABLES: &[&str] = &[
    "DROP TABLE IF EXISTS orders",
    "DROP TABLE IF EXISTS students",
    "DROP TABLE IF EXISTS books",
];

const CREATE_STUDENTS: &str = r#"
CREATE TABLE students (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name VARCHAR(100) NOT NULL,
    age INT NOT NULL,
    grade INT NOT NULL,
    email VARCHAR(100),
    enrollment_date DATE DEFAULT CURRENT_DATE
)"#;

const CREATE_BOOKS: &str = r#"
CREATE TABLE books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(200) NOT NULL,
    author VARCHAR(100) NOT NULL,
    genre VARCHAR(50),
    price DECIMAL(10,2),
    publication_year INT,
    available BOOLEAN DEFAULT TRUE
)"#;

const CREATE_ORDERS: &str = r#"
CREATE TABLE orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id INT,
    book_id INT,
    order_date DATE DEFAULT CURRENT_DATE,
    quantity INT DEFAULT 1,
    FOREIGN KEY (student_id) REFERENCES students(id),
    FOREIGN KEY (book_id) REFERENCES books(id)
)"#;

const INSERT_STUDENTS: &str = r#"
INSERT INTO students (name, age, grade, email) VALUES
    ('Alice Johnson', 13, 8, 'alice.j@school.edu'),
    ('Bob Smith', 15, 10, 'bob.s@school.edu'),
    ('Charlie Brown', 12, 7, 'charlie.b@school.edu'),
    ('Diana Prince', 16, 11, 'diana.p@school.edu'),
    ('Eve Wilson', 14, 9, 'eve.w@school.edu'),
    ('Frank Miller', 13, 8, 'frank.m@school.edu'),
    ('Grace Lee', 17, 12, 'grace.l@school.edu'),
    ('Henry Davis', 15, 10, 'henry.d@school.edu')"#;

const INSERT_BOOKS: &str = r#"
INSERT INTO books (title, author, genre, price, publication_year) VALUES
    ('The Great Adventure', 'Jane Author', 'Fiction', 12.99, 2020),
    ('Math Made Easy', 'Prof. Numbers', 'Education', 24.50, 2021),
    ('Science Wonders', 'Dr. Lab', 'Science', 18.75, 2019),
    ('History Heroes', 'Time Keeper', 'History', 15.99, 2022),
    ('Art and Creativity', 'Brush Master', 'Art', 22.00, 2020),
    ('Coding for Kids', 'Tech Guru', 'Technology', 29.99, 2023),
    ('Mystery Island', 'Secret Writer', 'Mystery', 13.50, 2021),
    ('Space Explorers', 'Astro Naut', 'Science Fiction', 16.25, 2022)"#;

const INSERT_ORDERS: &str = r#"
INSERT INTO orders (student_id, book_id, quantity) VALUES
    (1, 1, 1), (1, 3, 1),
    (2, 2, 1), (2, 6, 1),
    (3, 1, 2), (3, 7, 1),
    (4, 4, 1), (4, 5, 1),
    (5, 2, 1), (5, 8, 1),
    (6, 6, 1), (7, 3, 1),
    (8, 4, 1), (8, 7, 1)"#;

/// Rows inserted per table by [`bootstrap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub students: u64,
    pub books: u64,
    pub orders: u64,
}

/// Drops, recreates and repopulates the sample tables.
pub async fn bootstrap(client: &dyn DatabaseClient) -> Result<SeedReport> {
    for sql in DROP_TABLES {
        client.execute_query(sql).await?;
    }
    for sql in [CREATE_STUDENTS, CREATE_BOOKS, CREATE_ORDERS] {
        client.execute_query(sql).await?;
    }

    let report = SeedReport {
        students: client.execute_query(INSERT_STUDENTS).await?.total_rows(),
        books: client.execute_query(INSERT_BOOKS).await?.total_rows(),
        orders: client.execute_query(INSERT_ORDERS).await?.total_rows(),
    };

    info!(
        students = report.students,
        books = report.books,
        orders = report.orders,
        "Sample tables created"
    );

    Ok(report)
}
