//! End-to-end walk through the category/task lifecycle over HTTP.

use super::test_helpers::{assert_redirect, spawn_app};

#[tokio::test]
async fn deleting_category_makes_its_task_unreachable() {
    let app = spawn_app().await;

    let resp = app
        .post_form("/add_category", &[("category_name", "Work")])
        .await;
    assert_redirect(&resp, "/categories");
    let work = app.categories().list_all().await.expect("list")[0].clone();
    let category_id = work.id.to_string();

    let resp = app
        .post_form(
            "/add_task",
            &[
                ("task_name", "Write report"),
                ("task_description", "Q3 summary"),
                ("due_date", "2024-06-01"),
                ("category_id", &category_id),
            ],
        )
        .await;
    assert_redirect(&resp, "/");
    let task = app.tasks().list_all().await.expect("list")[0].clone();
    assert!(!task.is_urgent);

    let edit = app.get(&format!("/edit_task/{}", task.id)).await;
    assert_eq!(edit.status().as_u16(), 200);

    let resp = app.get(&format!("/delete_category/{}", work.id)).await;
    assert_redirect(&resp, "/categories");

    let edit = app.get(&format!("/edit_task/{}", task.id)).await;
    assert_eq!(edit.status().as_u16(), 404);

    let home = app.get("/").await.text().await.expect("body");
    assert!(!home.contains("Write report"));
}
