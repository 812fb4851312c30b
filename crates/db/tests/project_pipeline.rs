//! Repository integration tests. Require a live Postgres, like the
//! rest of the sqlx test suite (`DATABASE_URL`).

use renovo_core::status::PipelineStatus;
use renovo_db::models::project::CreateProject;
use renovo_db::repositories::ProjectRepo;
use sqlx::PgPool;

fn sample_input() -> CreateProject {
    CreateProject {
        room_type: Some("kitchen".into()),
        style: Some("modern".into()),
        budget: Some("$5000 high".into()),
        source_image_url: Some("https://cdn.example.com/rooms/1.jpg".into()),
    }
}

#[sqlx::test]
async fn create_starts_unset(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &sample_input()).await.unwrap();
    assert_eq!(project.status().unwrap(), PipelineStatus::Unset);
    assert!(project.error.is_none());
    assert!(project.generated_image_url.is_none());
    assert!(project.processed_at.is_none());
}

#[sqlx::test]
async fn full_pipeline_progression(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &sample_input()).await.unwrap();

    assert!(ProjectRepo::mark_processing(&pool, project.id).await.unwrap());

    let suggestions = serde_json::json!([
        {"item": "Cabinet refacing", "description": "Reface doors", "cost": 2500}
    ]);
    assert!(
        ProjectRepo::record_analysis(&pool, project.id, &suggestions, 6000, 15000, "a modern kitchen")
            .await
            .unwrap()
    );

    let mid = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(mid.status().unwrap(), PipelineStatus::GeneratingImage);
    assert_eq!(mid.estimated_cost, Some(6000));
    assert_eq!(mid.estimated_value_added, Some(15000));
    assert!(mid.suggestions.is_some());

    assert!(
        ProjectRepo::record_outcome(&pool, project.id, "https://bucket.s3/key.png", None)
            .await
            .unwrap()
    );

    let done = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(done.status().unwrap(), PipelineStatus::Completed);
    assert_eq!(done.generated_image_url.as_deref(), Some("https://bucket.s3/key.png"));
    assert!(done.processed_at.is_some());
    assert!(done.error.is_none());
}

#[sqlx::test]
async fn transitions_are_guarded_by_current_status(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &sample_input()).await.unwrap();

    // Outcome before analysis affects zero rows.
    assert!(
        !ProjectRepo::record_outcome(&pool, project.id, "https://x/y.png", None)
            .await
            .unwrap()
    );

    assert!(ProjectRepo::mark_processing(&pool, project.id).await.unwrap());
    // Second mark_processing is a no-op.
    assert!(!ProjectRepo::mark_processing(&pool, project.id).await.unwrap());
    // mark_failed only applies to unset projects.
    assert!(!ProjectRepo::mark_failed(&pool, project.id, "late").await.unwrap());
}

#[sqlx::test]
async fn mark_failed_records_error(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &CreateProject::default()).await.unwrap();
    assert!(
        ProjectRepo::mark_failed(&pool, project.id, "Missing required fields: roomType")
            .await
            .unwrap()
    );
    let failed = ProjectRepo::find_by_id(&pool, project.id).await.unwrap().unwrap();
    assert_eq!(failed.status().unwrap(), PipelineStatus::Failed);
    assert_eq!(
        failed.error.as_deref(),
        Some("Missing required fields: roomType")
    );
}
