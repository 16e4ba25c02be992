use centurion_core::model::{Theme, UserProgress};
use centurion_core::progression::{advance_after_workout, record_new_max};
use centurion_core::time::fixed_now;
use chrono::Duration;
use storage::ProgressRecord;
use storage::repository::{PreferenceRepository, ProgressRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_whole_record() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let now = fixed_now();
    let mut progress = UserProgress::onboard(25, now);
    for offset in 0..4 {
        progress = advance_after_workout(progress, now + Duration::days(offset * 2));
    }
    let progress = record_new_max(progress, 31, false, now + Duration::days(9));

    repo.save_progress(&ProgressRecord::from_progress(&progress))
        .await
        .expect("save");

    let fetched = repo
        .get_progress()
        .await
        .expect("fetch")
        .expect("record present")
        .into_progress(now);
    assert_eq!(fetched, progress);
    assert_eq!(fetched.history.len(), 4);
    assert_eq!(fetched.max_reps_history.len(), 2);
}

#[tokio::test]
async fn sqlite_save_overwrites_and_delete_clears() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let first = UserProgress::onboard(5, fixed_now());
    repo.save_progress(&ProgressRecord::from_progress(&first))
        .await
        .unwrap();
    let second = advance_after_workout(first, fixed_now());
    repo.save_progress(&ProgressRecord::from_progress(&second))
        .await
        .unwrap();

    let fetched = repo.get_progress().await.unwrap().unwrap();
    assert_eq!(fetched.current_day, 2);

    assert!(repo.delete_progress().await.unwrap());
    assert!(!repo.delete_progress().await.unwrap());
    assert!(repo.get_progress().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_loads_records_from_older_versions() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_legacy?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    sqlx::query("INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)")
        .bind("centurionUser")
        .bind(
            r#"{"maxReps":22,"currentPhase":2,"currentWeek":6,"currentDay":1,
                "history":[],"lastProgressUpdate":"Tue Mar 05 2024",
                "startDate":"2024-03-04T08:00:00.000Z"}"#,
        )
        .bind(fixed_now())
        .execute(repo.pool())
        .await
        .expect("insert legacy row");

    let progress = repo
        .get_progress()
        .await
        .unwrap()
        .unwrap()
        .into_progress(fixed_now());
    assert_eq!(progress.daily_goal, 50);
    assert_eq!(progress.max_reps_history.len(), 1);
    assert_eq!(progress.max_reps_history[0].reps, 22);
    assert_eq!(
        progress.last_progress_update,
        chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    );
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied.0, 1);
}

#[tokio::test]
async fn storage_aggregate_keeps_theme_next_to_record() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");

    storage.preferences.save_theme(Theme::Light).await.unwrap();
    storage
        .progress
        .save_progress(&ProgressRecord::from_progress(&UserProgress::onboard(
            40,
            fixed_now(),
        )))
        .await
        .unwrap();

    assert_eq!(
        storage.preferences.get_theme().await.unwrap(),
        Some(Theme::Light)
    );
    storage.progress.delete_progress().await.unwrap();
    assert_eq!(
        storage.preferences.get_theme().await.unwrap(),
        Some(Theme::Light)
    );
}
