//! Session integration tests
//!
//! Drive whole sessions through the real catalog source and the silent
//! audio output, with tokio's clock paused.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use meditation_player::application::ports::CatalogSource;
use meditation_player::application::{SessionCommand, SessionOptions, SessionOrchestrator};
use meditation_player::domain::catalog::{Bucket, Catalog, InstructionType};
use meditation_player::domain::session::{SessionMode, SessionPhase, SessionRequest};
use meditation_player::infrastructure::{FileCatalogSource, SilentAudioOutput};
use tempfile::TempDir;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

const CLIP: Duration = Duration::from_secs(3);

const MANIFEST: &str = r#"{
    "chanting": {
        "2min": [{"file": "namo.mp3", "duration": 121.0}],
        "5min": [],
        "10min": [{"file": "long.mp3", "duration": 598.4}]
    },
    "gong": "gong.mp3",
    "closing": "closing.mp3",
    "instructions": {"short": "guided_short.mp3", "long": "guided_long.mp3"}
}"#;

/// Media directory with a manifest and every file it names
fn media_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("metadata.json"), MANIFEST).unwrap();
    std::fs::create_dir(dir.path().join("chanting")).unwrap();
    for file in ["gong.mp3", "closing.mp3", "guided_short.mp3", "guided_long.mp3"] {
        touch(&dir.path().join(file));
    }
    for file in ["namo.mp3", "long.mp3"] {
        touch(&dir.path().join("chanting").join(file));
    }
    dir
}

fn touch(path: &Path) {
    std::fs::write(path, b"").unwrap();
}

async fn load(dir: &TempDir) -> Arc<Catalog> {
    let source = FileCatalogSource::new(dir.path().join("metadata.json"));
    Arc::new(source.load().await.unwrap())
}

fn orchestrator(dir: &TempDir, catalog: Option<Arc<Catalog>>) -> SessionOrchestrator<SilentAudioOutput> {
    SessionOrchestrator::new(
        catalog,
        dir.path(),
        SilentAudioOutput::with_clip_length(CLIP),
        SessionOptions {
            chant_fade_in_secs: 1.0,
        },
    )
    .with_seed(11)
}

fn record_phases(mut phases: watch::Receiver<SessionPhase>) -> JoinHandle<Vec<SessionPhase>> {
    tokio::spawn(async move {
        let mut seen = Vec::new();
        while phases.changed().await.is_ok() {
            seen.push(*phases.borrow_and_update());
        }
        seen
    })
}

#[tokio::test(start_paused = true)]
async fn custom_session_plays_every_phase() {
    let dir = media_dir();
    let mut session = orchestrator(&dir, Some(load(&dir).await));
    let recorder = record_phases(session.phases());
    let (_commands_tx, mut commands) = mpsc::channel(4);

    let request = SessionRequest {
        intro: Bucket::TwoMin,
        outro: Bucket::TenMin,
        meditation_minutes: 1,
        ..Default::default()
    };
    let started = Instant::now();
    session.start(&request).unwrap();
    assert_eq!(session.config().unwrap().intro_file(), Some("namo.mp3"));
    assert_eq!(session.config().unwrap().outro_file(), Some("long.mp3"));

    let settled = session.drive(&mut commands).await;
    assert_eq!(settled, SessionPhase::Complete);
    // Four clips and one minute of silence
    assert!(started.elapsed() >= Duration::from_secs(72));

    drop(session);
    assert_eq!(
        recorder.await.unwrap(),
        vec![
            SessionPhase::Gong,
            SessionPhase::Intro,
            SessionPhase::Meditation,
            SessionPhase::OutroChanting,
            SessionPhase::Outro,
            SessionPhase::Complete,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn guided_session_plays_instructions() {
    let dir = media_dir();
    let mut session = orchestrator(&dir, Some(load(&dir).await));
    let recorder = record_phases(session.phases());
    let (_commands_tx, mut commands) = mpsc::channel(4);

    let request = SessionRequest {
        mode: SessionMode::Guided,
        instruction_type: InstructionType::Long,
        ..Default::default()
    };
    session.start(&request).unwrap();
    assert_eq!(session.drive(&mut commands).await, SessionPhase::Complete);

    drop(session);
    assert_eq!(
        recorder.await.unwrap(),
        vec![
            SessionPhase::Gong,
            SessionPhase::GuidedSession,
            SessionPhase::Complete,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn missing_files_are_skipped() {
    let dir = media_dir();
    std::fs::remove_file(dir.path().join("gong.mp3")).unwrap();
    std::fs::remove_file(dir.path().join("closing.mp3")).unwrap();
    let mut session = orchestrator(&dir, Some(load(&dir).await));
    let (_commands_tx, mut commands) = mpsc::channel(4);

    let started = Instant::now();
    session.start(&SessionRequest {
        meditation_minutes: 1,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(session.drive(&mut commands).await, SessionPhase::Complete);
    // Only the countdown took time
    assert!(started.elapsed() >= Duration::from_secs(60));
    assert!(started.elapsed() < Duration::from_secs(61));
}

#[tokio::test(start_paused = true)]
async fn empty_bucket_refuses_start() {
    let dir = media_dir();
    let mut session = orchestrator(&dir, Some(load(&dir).await));

    let result = session.start(&SessionRequest {
        outro: Bucket::FiveMin,
        ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn absent_catalog_refuses_start() {
    let dir = media_dir();
    let mut session = orchestrator(&dir, None);
    assert!(!session.can_start());
    assert!(session.start(&SessionRequest::default()).is_err());
    assert_eq!(session.phase(), SessionPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn stop_during_meditation_returns_to_idle() {
    let dir = media_dir();
    let mut session = orchestrator(&dir, Some(load(&dir).await));
    let remaining = session.countdown_remaining();
    let (commands_tx, mut commands) = mpsc::channel(4);

    session
        .start(&SessionRequest {
            enable_gong: false,
            meditation_minutes: 5,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(session.phase(), SessionPhase::Meditation);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(30)).await;
        commands_tx.send(SessionCommand::Stop).await.unwrap();
    });

    assert_eq!(session.drive(&mut commands).await, SessionPhase::Idle);
    assert!(session.config().is_none());
    assert_eq!(*remaining.borrow(), 0);
}

#[tokio::test(start_paused = true)]
async fn skip_moves_through_phases_and_new_session_restarts() {
    let dir = media_dir();
    let mut session = orchestrator(&dir, Some(load(&dir).await));
    let (commands_tx, mut commands) = mpsc::channel(8);

    session
        .start(&SessionRequest {
            meditation_minutes: 60,
            ..Default::default()
        })
        .unwrap();

    // gong, meditation, outro
    for _ in 0..3 {
        commands_tx.send(SessionCommand::Skip).await.unwrap();
    }
    let started = Instant::now();
    assert_eq!(session.drive(&mut commands).await, SessionPhase::Complete);
    assert!(started.elapsed() < Duration::from_secs(1));

    session.new_session().unwrap();
    assert_eq!(session.phase(), SessionPhase::Idle);
    assert_eq!(
        session.start(&SessionRequest::default()).unwrap(),
        SessionPhase::Gong
    );
}
