//! Built-in sample queries and table listing for the practice schema.

use serde::Serialize;

/// A titled example statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedQuery {
    pub title: &'static str,
    pub sql: &'static str,
}

const SAMPLE_QUERIES: &[NamedQuery] = &[
    NamedQuery {
        title: "Find All Students",
        sql: "SELECT * FROM students;",
    },
    NamedQuery {
        title: "Find Students by Grade",
        sql: "SELECT name, age FROM students WHERE grade = 7;",
    },
    NamedQuery {
        title: "Find Unique Students by Grade",
        sql: "SELECT DISTINCT name, age FROM students WHERE grade = 7;",
    },
    NamedQuery {
        title: "Count Students",
        sql: "SELECT COUNT(*) AS total_students FROM students;",
    },
    NamedQuery {
        title: "Group Students by Grade",
        sql: "SELECT grade, COUNT(*) AS grade_students FROM students GROUP BY grade ORDER BY grade;",
    },
    NamedQuery {
        title: "Order Students by Age",
        sql: "SELECT * FROM students ORDER BY age DESC;",
    },
    NamedQuery {
        title: "Join Orders",
        sql: "SELECT s.name, b.title, o.quantity FROM students s \
              JOIN orders o ON s.id = o.student_id \
              JOIN books b ON o.book_id = b.id \
              WHERE s.id = 1;",
    },
    NamedQuery {
        title: "Insert One Student",
        sql: "INSERT INTO students (name, age, grade, email) \
              VALUES ('Your Name', 15, 10, 'you@school.edu');",
    },
    NamedQuery {
        title: "Update Book Price",
        sql: "UPDATE books SET price = 19.99 WHERE id = 1;",
    },
    NamedQuery {
        title: "Books per Genre",
        sql: "SELECT genre, COUNT(*) AS books, AVG(price) AS average_price \
              FROM books GROUP BY genre ORDER BY genre;",
    },
];

/// Sample statements in display order.
pub fn sample_queries() -> &'static [NamedQuery] {
    SAMPLE_QUERIES
}

/// Tables created by the fixture bootstrap.
pub fn table_names() -> &'static [&'static str] {
    &["books", "orders", "students"]
}

/// Worked examples shown by the console `help` command.
pub fn examples_help() -> &'static str {
    r#"SQL examples to try:

1. Basic SELECT:
   SELECT * FROM students;
   SELECT name, age FROM students;

2. WHERE clause:
   SELECT * FROM students WHERE age > 14;
   SELECT * FROM books WHERE price < 20;

3. ORDER BY:
   SELECT * FROM students ORDER BY age;
   SELECT * FROM books ORDER BY price DESC;

4. COUNT and GROUP BY:
   SELECT grade, COUNT(*) FROM students GROUP BY grade;
   SELECT genre, AVG(price) FROM books GROUP BY genre;

5. JOINs:
   SELECT s.name, b.title FROM students s
   JOIN orders o ON s.id = o.student_id
   JOIN books b ON o.book_id = b.id;

6. INSERT new data:
   INSERT INTO students (name, age, grade, email)
   VALUES ('Your Name', 15, 10, 'you@school.edu');

7. UPDATE data:
   UPDATE books SET price = 19.99 WHERE id = 1;

Console commands: help, samples, tables, students, books, orders, stats, health, quit"#
}
