use std::sync::Arc;

use async_trait::async_trait;
use centurion_core::progression::{Position, SessionState};
use centurion_core::time::fixed_now;
use chrono::Duration;
use services::{
    AppServices, Clock, CoachBackend, CoachError, CoachReply, ProgressService, ProgressServiceError,
    Speaker,
};
use storage::repository::{InMemoryRepository, ProgressRepository, Storage};

fn service_on_day(repo: &InMemoryRepository, day: i64) -> ProgressService {
    ProgressService::new(
        Clock::fixed(fixed_now() + Duration::days(day)),
        Arc::new(repo.clone()),
    )
}

#[tokio::test]
async fn user_reaches_max_test_and_adapts_plan() {
    let repo = InMemoryRepository::new();

    let progress = service_on_day(&repo, 0).onboard("15").await.unwrap();
    assert_eq!(
        progress.position(),
        Position { phase: 1, week: 3, day: 1 }
    );

    // One workout every other day through week 3 and into week 4.
    for idx in 0..5 {
        service_on_day(&repo, idx * 2)
            .complete_workout()
            .await
            .unwrap();
    }

    let test_day = service_on_day(&repo, 10);
    assert_eq!(
        test_day.session_state().await.unwrap(),
        SessionState::MaxTestDay
    );
    let dashboard = test_day.dashboard().await.unwrap();
    assert!(dashboard.workout.is_test());
    assert_eq!(dashboard.daily_progress, 0);

    let adapted = test_day.record_max("32", true).await.unwrap();
    assert_eq!(
        adapted.position(),
        Position { phase: 2, week: 8, day: 1 }
    );
    assert_eq!(adapted.history.len(), 5);
    assert_eq!(adapted.max_reps_history.len(), 2);

    let chart = test_day.chart().await.unwrap();
    let stats = chart.stats.expect("two tests recorded");
    assert_eq!((stats.start, stats.current), (15, 32));

    let map = test_day.program_map().await.unwrap();
    assert!(map[7].current);
}

#[tokio::test]
async fn second_workout_on_the_same_day_is_rejected() {
    let repo = InMemoryRepository::new();
    let svc = service_on_day(&repo, 0);
    svc.onboard("15").await.unwrap();
    let first = svc.complete_workout().await.unwrap();
    assert_eq!(
        svc.session_state().await.unwrap(),
        SessionState::RecoveryDay
    );

    for _ in 0..8 {
        assert!(matches!(
            svc.complete_workout().await,
            Err(ProgressServiceError::AlreadyTrainedToday)
        ));
    }

    let stored = svc.load().await.unwrap().unwrap();
    assert_eq!(stored.history.len(), 1);
    assert_eq!(stored.daily_progress, 20);
    assert_eq!(stored.position(), first.position());
    assert_eq!(
        stored.position(),
        Position { phase: 1, week: 3, day: 2 }
    );

    let tomorrow = service_on_day(&repo, 1);
    let next = tomorrow.complete_workout().await.unwrap();
    assert_eq!(next.history.len(), 2);
    assert_eq!(next.daily_progress, 20);
}

#[tokio::test]
async fn export_writes_pretty_json() {
    let repo = InMemoryRepository::new();
    let svc = service_on_day(&repo, 0);
    svc.onboard("40").await.unwrap();

    let path = std::env::temp_dir().join(format!(
        "centurion_export_{}.json",
        std::process::id()
    ));
    let bytes = svc.export_to(&path).await.unwrap();
    let written = tokio::fs::read_to_string(&path).await.unwrap();
    tokio::fs::remove_file(&path).await.unwrap();

    assert_eq!(bytes, written.len());
    assert!(written.contains("\n  \"maxReps\": 40"));
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["currentPhase"], 3);
}

struct EchoCoach;

#[async_trait]
impl CoachBackend for EchoCoach {
    fn enabled(&self) -> bool {
        true
    }

    async fn ask(&self, query: &str, stats: &str) -> Result<CoachReply, CoachError> {
        Ok(CoachReply {
            text: format!("{query} | {stats}"),
            citations: Vec::new(),
        })
    }
}

#[tokio::test]
async fn app_services_share_one_storage() {
    let storage = Storage::in_memory();
    let app = AppServices::from_storage(&storage, Clock::fixed(fixed_now()), Arc::new(EchoCoach));

    let progress = app.progress().onboard("42").await.unwrap();
    assert!(storage.progress.get_progress().await.unwrap().is_some());

    let mut session = app.coach_session();
    let answer = session
        .ask("Form check?", &progress.stats_summary())
        .await
        .unwrap();
    assert_eq!(answer.speaker, Speaker::Coach);
    assert_eq!(
        answer.content,
        "Form check? | Max reps: 42, Phase: 3, Week: 11"
    );
}
