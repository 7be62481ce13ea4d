//! Typed listings and parameterized registration.

use super::common::seeded_client;
use pretty_assertions::assert_eq;
use sql_sandbox::db::{DatabaseClient, Value};
use sql_sandbox::error::SandboxError;
use sql_sandbox::records::{self, NewStudent};

#[tokio::test]
async fn test_list_students_sorted_by_name() {
    let client = seeded_client().await;

    let students = records::list_students(&client).await.unwrap();

    assert_eq!(students.len(), 8);
    assert_eq!(students[0].name, "Alice Johnson");
    assert_eq!(students[7].name, "Henry Davis");
    assert_eq!(students[0].email.as_deref(), Some("alice.j@school.edu"));
    assert!(students.iter().all(|s| s.enrollment_date.is_some()));
}

#[tokio::test]
async fn test_list_books_decodes_prices() {
    let client = seeded_client().await;

    let books = records::list_books(&client).await.unwrap();
    let art = books
        .iter()
        .find(|b| b.title == "Art and Creativity")
        .unwrap();
    let coding = books.iter().find(|b| b.title == "Coding for Kids").unwrap();

    assert_eq!(books.len(), 8);
    assert_eq!(art.price, Some(22.0));
    assert_eq!(coding.price, Some(29.99));
    assert_eq!(coding.available, Some(true));
}

#[tokio::test]
async fn test_list_orders_joins_details() {
    let client = seeded_client().await;
    let date = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();

    let orders = records::list_orders(&client).await.unwrap();

    assert_eq!(orders.len(), 14);
    assert!(orders.iter().all(|o| date.is_match(&o.order_date)));
    let charlie = orders.iter().find(|o| o.id == 5).unwrap();
    assert_eq!(charlie.student_name, "Charlie Brown");
    assert_eq!(charlie.book_title, "The Great Adventure");
    assert_eq!(charlie.book_price, Some(12.99));
    assert_eq!(charlie.quantity, 2);
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let client = seeded_client().await;
    client
        .execute_query("UPDATE orders SET order_date = '2020-01-15' WHERE id <> 9")
        .await
        .unwrap();

    let orders = records::list_orders(&client).await.unwrap();

    assert_eq!(orders[0].id, 9);
    assert_eq!(orders[0].student_name, "Eve Wilson");
    assert_eq!(orders[0].book_title, "Math Made Easy");
    assert_eq!(orders[0].book_price, Some(24.5));
    assert_eq!(orders[1].order_date, "2020-01-15");
}

#[tokio::test]
async fn test_add_student_binds_values_verbatim() {
    let client = seeded_client().await;
    let name = "Robert'); DROP TABLE students;--";

    let inserted = records::add_student(
        &client,
        &NewStudent {
            name: name.to_string(),
            age: 14,
            grade: 9,
            email: Some("bobby@school.edu".into()),
        },
    )
    .await
    .unwrap();
    assert!(inserted);

    let result = client
        .execute_with_params(
            "SELECT age, grade FROM students WHERE name = ?",
            &[Value::from(name)],
        )
        .await
        .unwrap();
    assert_eq!(result.rows(), &[vec![Value::Int(14), Value::Int(9)]]);
}

#[tokio::test]
async fn test_add_student_rejects_blank_name() {
    let client = seeded_client().await;

    let err = records::add_student(
        &client,
        &NewStudent {
            name: String::new(),
            age: 14,
            grade: 9,
            email: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SandboxError::InvalidInput(_)));
    assert_eq!(records::list_students(&client).await.unwrap().len(), 8);
}
