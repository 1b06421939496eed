//! PostgreSQL store tests.
//!
//! Each test gets a fresh database created from `DATABASE_URL` with the
//! workspace migrations applied.

use issuetrack_core::activity::ActivityType;
use issuetrack_core::issue::{IssueCounts, IssueStatus};
use issuetrack_core::types::DbId;
use issuetrack_db::models::activity::NewActivity;
use issuetrack_db::models::issue::NewIssue;
use issuetrack_db::stores::{ActivityLog, AttachmentStore, IssueStore, PgStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO users (email, firstname, lastname, role)
         VALUES ($1, 'Test', 'User', 'developer') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("user insert should succeed")
}

async fn seed_project(pool: &PgPool, name: &str, status: i16) -> DbId {
    sqlx::query_scalar("INSERT INTO projects (name, status) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(status)
        .fetch_one(pool)
        .await
        .expect("project insert should succeed")
}

async fn seed_issue(store: &PgStore, project_id: DbId, user_id: DbId, status: IssueStatus) {
    let issue = store
        .create(&NewIssue {
            project_id,
            title: "Title".into(),
            body: "Body".into(),
            created_by: user_id,
            assigned_to: None,
        })
        .await
        .expect("issue insert should succeed");
    IssueStore::save(
        store,
        &issuetrack_db::models::issue::Issue {
            status: status.id(),
            ..issue
        },
    )
    .await
    .expect("issue update should succeed");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn count_treats_closed_project_issues_as_closed(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let user = seed_user(&pool, "counts@test.com").await;
    let p1 = seed_project(&pool, "P1", 1).await;
    let p2 = seed_project(&pool, "P2", 0).await;

    seed_issue(&store, p1, user, IssueStatus::Open).await;
    seed_issue(&store, p1, user, IssueStatus::Closed).await;
    seed_issue(&store, p2, user, IssueStatus::Open).await;
    seed_issue(&store, p2, user, IssueStatus::Closed).await;

    let counts = store.count_open_and_closed().await.unwrap();
    assert_eq!(counts, IssueCounts { open: 1, closed: 3 });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_issue_is_open_and_findable(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let user = seed_user(&pool, "create@test.com").await;
    let project = seed_project(&pool, "P", 1).await;

    let created = store
        .create(&NewIssue {
            project_id: project,
            title: "Crash".into(),
            body: "On save".into(),
            created_by: user,
            assigned_to: Some(user),
        })
        .await
        .unwrap();

    assert!(created.is_open());
    let found = IssueStore::find(&store, created.id).await.unwrap().unwrap();
    assert_eq!(found.title, "Crash");
    assert_eq!(found.assigned_to, Some(user));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_links_matching_attachments(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let user = seed_user(&pool, "claim@test.com").await;
    let other = seed_user(&pool, "other@test.com").await;
    let project = seed_project(&pool, "P", 1).await;
    let issue = store
        .create(&NewIssue {
            project_id: project,
            title: "T".into(),
            body: "B".into(),
            created_by: user,
            assigned_to: None,
        })
        .await
        .unwrap();

    for uploader in [user, other] {
        sqlx::query(
            "INSERT INTO projects_issues_attachments (uploaded_by, filename, upload_token)
             VALUES ($1, 'f.txt', 'tok')",
        )
        .bind(uploader)
        .execute(&pool)
        .await
        .unwrap();
    }

    let claimed = store.claim_for_issue(issue.id, "tok", user).await.unwrap();
    assert_eq!(claimed, 1);
    let listed = AttachmentStore::list_for_issue(&store, issue.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].uploaded_by, user);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_entries_list_in_insertion_order(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let user = seed_user(&pool, "activity@test.com").await;
    let project = seed_project(&pool, "P", 1).await;
    let issue = store
        .create(&NewIssue {
            project_id: project,
            title: "T".into(),
            body: "B".into(),
            created_by: user,
            assigned_to: None,
        })
        .await
        .unwrap();

    store
        .add(&NewActivity::new(ActivityType::Created, user, project, issue.id))
        .await
        .unwrap();
    store
        .add(&NewActivity::new(ActivityType::Reassigned, user, project, issue.id).with_target(user))
        .await
        .unwrap();

    let entries = ActivityLog::list_for_issue(&store, issue.id).await.unwrap();
    let kinds: Vec<_> = entries.iter().filter_map(|e| e.kind()).collect();
    assert_eq!(kinds, vec![ActivityType::Created, ActivityType::Reassigned]);
    assert_eq!(entries[1].target_user_id, Some(user));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_listing_pages_and_filters(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let user = seed_user(&pool, "list@test.com").await;
    let project = seed_project(&pool, "P", 1).await;

    seed_issue(&store, project, user, IssueStatus::Open).await;
    seed_issue(&store, project, user, IssueStatus::Closed).await;
    seed_issue(&store, project, user, IssueStatus::Open).await;

    let open = store
        .list_for_project(project, Some(IssueStatus::Open.id()), 50, 0)
        .await
        .unwrap();
    assert_eq!(open.len(), 2);
    assert!(open.iter().all(|i| i.is_open()));

    let first_page = store.list_for_project(project, None, 2, 0).await.unwrap();
    let second_page = store.list_for_project(project, None, 2, 2).await.unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 1);
    assert!(first_page[1].id > second_page[0].id);
}
