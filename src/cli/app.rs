//! Main app runner for sessions and the catalog listing

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::application::ports::{AudioOutput, CatalogSource, ConfigStore};
use crate::application::{
    AudioProgress, SessionError, SessionOptions, SessionOrchestrator, WakeLockCoordinator,
};
use crate::domain::catalog::{has_available, Bucket, Catalog, InstructionType};
use crate::domain::config::AppConfig;
use crate::domain::session::{SessionMode, SessionPhase, SessionRequest};
use crate::infrastructure::{
    create_audio_output, create_catalog_source, create_screen_wake, XdgConfigStore,
};

use super::args::{Cli, PlayerOptions};
use super::controls::{self, Control};
use super::presenter::Presenter;
use super::signals;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the media directory
pub const ENV_MEDIA_DIR: &str = "MEDITATION_MEDIA_DIR";
/// Environment variable overriding the catalog location
pub const ENV_CATALOG: &str = "MEDITATION_CATALOG";

const CONTROL_BUFFER: usize = 16;

/// Config layer built from command-line arguments
pub fn config_from_args(cli: &Cli) -> AppConfig {
    AppConfig {
        mode: cli.mode.map(|m| SessionMode::from(m).to_string()),
        gong: cli.no_gong.then_some(false),
        intro: cli.intro.map(|b| Bucket::from(b).to_string()),
        outro: cli.outro.map(|b| Bucket::from(b).to_string()),
        minutes: cli.minutes,
        instructions: cli.instructions.map(|i| InstructionType::from(i).to_string()),
        fade_in_secs: cli.fade_in,
        media_dir: cli.media_dir.clone(),
        catalog: cli.catalog.clone(),
        wake_lock: cli.no_wake_lock.then_some(false),
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %store.path().display(), error = %e, "ignoring config file");
            AppConfig::empty()
        }
    };

    let env_config = AppConfig {
        media_dir: env::var(ENV_MEDIA_DIR).ok().filter(|s| !s.is_empty()),
        catalog: env::var(ENV_CATALOG).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Resolve merged config into options for a run
pub fn player_options(config: &AppConfig, dry_run: bool) -> PlayerOptions {
    PlayerOptions {
        request: config.session_request(),
        fade_in_secs: config.fade_in_secs_or_default(),
        media_dir: config.media_dir_or_default().to_string(),
        catalog: config.catalog_or_default().to_string(),
        wake_lock: config.wake_lock_or_default(),
        dry_run,
    }
}

/// Read the catalog once. A failure is reported and leaves it absent.
pub async fn load_catalog(source: &dyn CatalogSource, presenter: &Presenter) -> Option<Arc<Catalog>> {
    match source.load().await {
        Ok(catalog) => {
            tracing::debug!(location = %source.location(), "catalog loaded");
            Some(Arc::new(catalog))
        }
        Err(e) => {
            presenter.warn(&format!("{} ({})", e, source.location()));
            None
        }
    }
}

/// List what the catalog offers
pub async fn show_catalog(options: &PlayerOptions) -> ExitCode {
    let presenter = Presenter::new();
    let source = create_catalog_source(&options.catalog);
    match load_catalog(source.as_ref(), &presenter).await {
        Some(catalog) => {
            presenter.key_value("catalog", &source.location());
            print_catalog(&catalog, &presenter);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            presenter.error("Catalog is not available");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn print_catalog(catalog: &Catalog, presenter: &Presenter) {
    for bucket in Bucket::ALL.into_iter().filter(|b| !b.is_none()) {
        let count = catalog.entries(bucket).len();
        let value = if has_available(Some(catalog), bucket) {
            format!("{} chant(s)", count)
        } else {
            "disabled (no chants)".to_string()
        };
        presenter.key_value(bucket.as_str(), &value);
    }
    presenter.key_value("gong", &catalog.gong);
    presenter.key_value("closing", &catalog.closing);
    let guided = catalog
        .instructions
        .as_ref()
        .map(|i| format!("short={}, long={}", i.short, i.long))
        .unwrap_or_else(|| "not available".to_string());
    presenter.key_value("guided", &guided);
}

/// Run sessions until the user stops or quits
pub async fn run_session(options: PlayerOptions) -> ExitCode {
    let presenter = Presenter::new();

    let source = create_catalog_source(&options.catalog);
    let catalog = load_catalog(source.as_ref(), &presenter).await;

    let output = match create_audio_output(options.dry_run) {
        Ok(output) => output,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut orchestrator = SessionOrchestrator::new(
        catalog,
        &options.media_dir,
        output,
        SessionOptions {
            chant_fade_in_secs: options.fade_in_secs,
        },
    );

    let (control_tx, mut controls) = mpsc::channel(CONTROL_BUFFER);
    let (visibility_tx, visibility_rx) = mpsc::channel(CONTROL_BUFFER);
    if let Err(e) = signals::install(control_tx.clone(), visibility_tx) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }
    if let Err(e) = controls::spawn_stdin_reader(control_tx) {
        presenter.error(&format!("Failed to read controls: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let wake = WakeLockCoordinator::new(create_screen_wake(options.wake_lock && !options.dry_run));
    let wake_task = tokio::spawn(wake.run(orchestrator.phases(), visibility_rx));
    let display_task = tokio::spawn(follow_session(
        orchestrator.phases(),
        orchestrator.audio_progress(),
        orchestrator.countdown_remaining(),
    ));

    let result = session_loop(&mut orchestrator, &options.request, &mut controls).await;

    // Closing the phase channel ends both followers
    drop(orchestrator);
    let _ = display_task.await;
    let _ = wake_task.await;

    match result {
        Ok(SessionPhase::Complete) => ExitCode::from(EXIT_SUCCESS),
        Ok(_) => {
            presenter.warn("Session stopped");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Returns the phase the last session settled in
async fn session_loop<O: AudioOutput>(
    orchestrator: &mut SessionOrchestrator<O>,
    request: &SessionRequest,
    controls: &mut mpsc::Receiver<Control>,
) -> Result<SessionPhase, SessionError> {
    let mut input_closed = false;

    loop {
        orchestrator.start(request)?;

        let (commands_tx, mut commands) = mpsc::channel(CONTROL_BUFFER);
        let settled = {
            let driven = orchestrator.drive(&mut commands);
            tokio::pin!(driven);
            loop {
                tokio::select! {
                    phase = &mut driven => break phase,
                    Some(control) = controls.recv() => {
                        if control == Control::InputClosed {
                            input_closed = true;
                        }
                        if let Some(command) = control.command() {
                            if commands_tx.try_send(command).is_err() {
                                tracing::debug!(?command, "dropping control, session is busy");
                            }
                        }
                    }
                }
            }
        };

        if settled != SessionPhase::Complete || input_closed {
            return Ok(settled);
        }

        loop {
            match controls.recv().await {
                Some(Control::NewSession) => break,
                Some(Control::Skip) => {}
                Some(Control::Stop | Control::InputClosed) | None => return Ok(settled),
            }
        }
        orchestrator.new_session()?;
    }
}

/// Print phase banners and keep a status line updated until the session
/// side goes away
async fn follow_session(
    mut phases: watch::Receiver<SessionPhase>,
    mut progress: watch::Receiver<AudioProgress>,
    mut remaining: watch::Receiver<u64>,
) {
    let mut presenter = Presenter::new();
    // Subscribed before the first session started
    let mut phase = SessionPhase::Idle;

    loop {
        tokio::select! {
            changed = phases.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = *phases.borrow_and_update();
                presenter.stop_spinner();
                match next {
                    SessionPhase::Idle => {}
                    SessionPhase::Complete => {
                        presenter.phase(next);
                        presenter.controls_hint(false);
                    }
                    _ => {
                        if !phase.is_driven() {
                            presenter.controls_hint(true);
                        }
                        presenter.phase(next);
                        presenter.start_spinner(next.label());
                    }
                }
                phase = next;
            }
            Ok(()) = progress.changed() => {
                let p = *progress.borrow_and_update();
                if phase.is_driven() && phase != SessionPhase::Meditation && p.total_secs > 0.0 {
                    presenter.update_spinner(&format!(
                        "{} {}",
                        phase.label(),
                        presenter.format_progress(p.current_secs, p.total_secs)
                    ));
                }
            }
            Ok(()) = remaining.changed() => {
                let secs = *remaining.borrow_and_update();
                if phase == SessionPhase::Meditation {
                    presenter.update_spinner(&format!(
                        "{} {}",
                        phase.label(),
                        presenter.format_remaining(secs)
                    ));
                }
            }
        }
    }

    presenter.stop_spinner();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn args_become_config_layer() {
        let cli = Cli::parse_from([
            "meditation-player",
            "--mode",
            "guided",
            "--no-gong",
            "--instructions",
            "long",
            "--minutes",
            "45",
        ]);
        let config = config_from_args(&cli);
        assert_eq!(config.mode, Some("guided".to_string()));
        assert_eq!(config.gong, Some(false));
        assert_eq!(config.instructions, Some("long".to_string()));
        assert_eq!(config.minutes, Some(45));
        assert!(config.intro.is_none());
        assert!(config.wake_lock.is_none());
    }

    #[test]
    fn unset_flags_do_not_override() {
        let cli = Cli::parse_from(["meditation-player"]);
        let file = AppConfig {
            gong: Some(false),
            intro: Some("10min".to_string()),
            ..Default::default()
        };
        let merged = AppConfig::defaults().merge(file).merge(config_from_args(&cli));
        assert_eq!(merged.gong, Some(false));
        assert_eq!(merged.intro, Some("10min".to_string()));
    }

    #[test]
    fn player_options_from_defaults() {
        let options = player_options(&AppConfig::defaults(), true);
        assert_eq!(options.request, SessionRequest::default());
        assert_eq!(options.request.instruction_type, InstructionType::Short);
        assert_eq!(options.fade_in_secs, 3.0);
        assert_eq!(options.media_dir, "media");
        assert_eq!(options.catalog, "media/metadata.json");
        assert!(options.wake_lock);
        assert!(options.dry_run);
    }

    #[tokio::test]
    async fn missing_catalog_loads_as_absent() {
        let source = create_catalog_source("/nonexistent/metadata.json");
        let catalog = load_catalog(source.as_ref(), &Presenter::new()).await;
        assert!(catalog.is_none());
    }
}
