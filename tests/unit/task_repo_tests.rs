//! Unit tests for `TaskRepo`: store-enforced constraints, ordering,
//! full-replace updates, and explicit category lookups.

use std::sync::Arc;

use chrono::NaiveDate;
use taskmanager::models::{Category, CategoryFields, TaskFields};
use taskmanager::persistence::category_repo::CategoryRepo;
use taskmanager::persistence::db;
use taskmanager::persistence::task_repo::TaskRepo;
use taskmanager::AppError;

async fn setup() -> (CategoryRepo, TaskRepo, Category) {
    let pool = Arc::new(db::connect_memory().await.expect("db"));
    let categories = CategoryRepo::new(Arc::clone(&pool));
    let work = categories
        .create(&CategoryFields::new("Work"))
        .await
        .expect("work");
    (categories, TaskRepo::new(pool), work)
}

fn report(category_id: i64) -> TaskFields {
    TaskFields::new("Write report", "Q3 summary", "2024-06-01", category_id)
}

fn assert_constraint(result: taskmanager::Result<impl std::fmt::Debug>) {
    match result {
        Err(AppError::ConstraintViolation(_)) => {}
        other => panic!("expected constraint violation, got {other:?}"),
    }
}

// ─── create ──────────────────────────────────────────────────────────

#[tokio::test]
async fn create_persists_all_fields() {
    let (_, tasks, work) = setup().await;

    let task = tasks.create(&report(work.id)).await.expect("create");

    assert!(task.id > 0);
    assert_eq!(task.task_name, "Write report");
    assert_eq!(task.task_description, "Q3 summary");
    assert!(!task.is_urgent);
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(task.category_id, work.id);
}

#[tokio::test]
async fn urgent_flag_round_trips() {
    let (_, tasks, work) = setup().await;
    let task = tasks
        .create(&report(work.id).urgent(true))
        .await
        .expect("create");
    assert!(tasks.get_by_id(task.id).await.expect("fetch").is_urgent);
}

#[tokio::test]
async fn unknown_category_is_constraint_violation() {
    let (_, tasks, work) = setup().await;
    assert_constraint(tasks.create(&report(work.id + 100)).await);
    assert_eq!(tasks.count().await.expect("count"), 0);
}

#[tokio::test]
async fn missing_category_is_constraint_violation() {
    let (_, tasks, work) = setup().await;
    let mut fields = report(work.id);
    fields.category_id = None;
    assert_constraint(tasks.create(&fields).await);
}

#[tokio::test]
async fn duplicate_task_name_is_constraint_violation() {
    let (_, tasks, work) = setup().await;
    tasks.create(&report(work.id)).await.expect("first");
    assert_constraint(tasks.create(&report(work.id)).await);
}

#[tokio::test]
async fn empty_required_text_is_constraint_violation() {
    let (_, tasks, work) = setup().await;

    let mut no_name = report(work.id);
    no_name.task_name = String::new();
    assert_constraint(tasks.create(&no_name).await);

    let mut no_description = report(work.id);
    no_description.task_description = String::new();
    assert_constraint(tasks.create(&no_description).await);
}

#[tokio::test]
async fn task_name_limit_is_fifty_characters() {
    let (_, tasks, work) = setup().await;

    let mut fits = report(work.id);
    fits.task_name = "x".repeat(50);
    tasks.create(&fits).await.expect("50 characters fit");

    let mut too_long = report(work.id);
    too_long.task_name = "y".repeat(51);
    assert_constraint(tasks.create(&too_long).await);
}

#[tokio::test]
async fn malformed_due_date_is_rejected_by_store() {
    let (_, tasks, work) = setup().await;
    for bad in ["", "tomorrow", "2024-13-01", "2024-02-30", "06/01/2024", "2024-6-1"] {
        let mut fields = report(work.id);
        fields.due_date = bad.to_owned();
        fields.task_name = format!("bad date {bad}");
        assert_constraint(tasks.create(&fields).await);
    }
}

#[tokio::test]
async fn leap_day_is_a_valid_due_date() {
    let (_, tasks, work) = setup().await;
    let mut fields = report(work.id);
    fields.due_date = "2024-02-29".into();
    let task = tasks.create(&fields).await.expect("leap day");
    assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

// ─── read ────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_is_not_found() {
    let (_, tasks, _) = setup().await;
    assert!(matches!(tasks.get_by_id(77).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_all_is_ordered_by_id() {
    let (_, tasks, work) = setup().await;
    for name in ["Zeta", "Alpha", "Mu"] {
        tasks
            .create(&TaskFields::new(name, "desc", "2024-01-01", work.id))
            .await
            .expect("create");
    }

    let listed = tasks.list_all().await.expect("list");
    let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    let names: Vec<&str> = listed.iter().map(|t| t.task_name.as_str()).collect();
    assert_eq!(names, ["Zeta", "Alpha", "Mu"]);
}

#[tokio::test]
async fn list_with_category_carries_category_names() {
    let (categories, tasks, work) = setup().await;
    let home = categories
        .create(&CategoryFields::new("Home"))
        .await
        .expect("home");
    tasks.create(&report(work.id)).await.expect("report");
    tasks
        .create(&TaskFields::new("Dishes", "After dinner", "2024-06-03", home.id))
        .await
        .expect("dishes");

    let listed = tasks.list_with_category().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].task.task_name, "Write report");
    assert_eq!(listed[0].category_name, "Work");
    assert_eq!(listed[1].task.task_name, "Dishes");
    assert_eq!(listed[1].category_name, "Home");
}

#[tokio::test]
async fn list_for_category_returns_only_owned_tasks() {
    let (categories, tasks, work) = setup().await;
    let home = categories
        .create(&CategoryFields::new("Home"))
        .await
        .expect("home");
    let first = tasks.create(&report(work.id)).await.expect("report");
    tasks
        .create(&TaskFields::new("Dishes", "After dinner", "2024-06-03", home.id))
        .await
        .expect("dishes");
    let second = tasks
        .create(&TaskFields::new("Review PR", "Team review", "2024-06-02", work.id))
        .await
        .expect("review");

    let owned = tasks.list_for_category(work.id).await.expect("owned");
    let ids: Vec<i64> = owned.iter().map(|t| t.id).collect();
    assert_eq!(ids, [first.id, second.id]);
}

// ─── update ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_every_field() {
    let (categories, tasks, work) = setup().await;
    let home = categories
        .create(&CategoryFields::new("Home"))
        .await
        .expect("home");
    let created = tasks
        .create(&report(work.id).urgent(true))
        .await
        .expect("create");

    let replacement = TaskFields::new("Paint fence", "Two coats", "2025-01-15", home.id);
    let updated = tasks.update(created.id, &replacement).await.expect("update");

    let fetched = tasks.get_by_id(created.id).await.expect("fetch");
    assert_eq!(updated, fetched);
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.task_name, "Paint fence");
    assert_eq!(fetched.task_description, "Two coats");
    assert!(!fetched.is_urgent, "unset flag must overwrite the old value");
    assert_eq!(fetched.due_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    assert_eq!(fetched.category_id, home.id);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let (_, tasks, work) = setup().await;
    assert!(matches!(
        tasks.update(5, &report(work.id)).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn rejected_update_leaves_task_unchanged() {
    let (_, tasks, work) = setup().await;
    let created = tasks.create(&report(work.id)).await.expect("create");

    let mut bad = report(work.id);
    bad.due_date = "not a date".into();
    assert_constraint(tasks.update(created.id, &bad).await);

    assert_eq!(tasks.get_by_id(created.id).await.expect("fetch"), created);
}

// ─── delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_task() {
    let (_, tasks, work) = setup().await;
    let task = tasks.create(&report(work.id)).await.expect("create");

    tasks.delete(task.id).await.expect("delete");
    assert!(matches!(tasks.get_by_id(task.id).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let (_, tasks, _) = setup().await;
    assert!(matches!(tasks.delete(3).await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
    let (_, tasks, work) = setup().await;
    let first = tasks.create(&report(work.id)).await.expect("first");
    tasks.delete(first.id).await.expect("delete");

    let second = tasks.create(&report(work.id)).await.expect("second");
    assert!(second.id > first.id);
}
