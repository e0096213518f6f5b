//! Phase transition policy
//!
//! Pure functions over `(phase, config)`. Chant files are already drawn into
//! the config, so nothing here is random.

use crate::domain::catalog::AudioResource;

use super::config::SessionConfig;
use super::phase::SessionPhase;

/// Phase that follows `phase` once it finishes or is skipped
pub fn next_phase(phase: SessionPhase, config: &SessionConfig) -> SessionPhase {
    match phase {
        SessionPhase::Gong if config.is_guided() => SessionPhase::GuidedSession,
        SessionPhase::Gong if config.intro_file().is_some() => SessionPhase::Intro,
        SessionPhase::Gong => SessionPhase::Meditation,
        SessionPhase::Intro => SessionPhase::Meditation,
        SessionPhase::Meditation if config.outro_file().is_some() => SessionPhase::OutroChanting,
        SessionPhase::Meditation => SessionPhase::Outro,
        SessionPhase::OutroChanting => SessionPhase::Outro,
        SessionPhase::Outro => SessionPhase::Complete,
        SessionPhase::GuidedSession => SessionPhase::Complete,
        SessionPhase::Idle | SessionPhase::Complete => SessionPhase::Idle,
    }
}

/// Phase a fresh session enters
pub fn first_phase(config: &SessionConfig) -> SessionPhase {
    if config.enable_gong() {
        SessionPhase::Gong
    } else if config.is_guided() {
        SessionPhase::GuidedSession
    } else if config.intro_file().is_some() {
        SessionPhase::Intro
    } else {
        SessionPhase::Meditation
    }
}

/// Audio played during `phase`, or `None` for silent or undriven phases
pub fn audio_for(phase: SessionPhase, config: &SessionConfig) -> Option<AudioResource> {
    match phase {
        SessionPhase::Gong => Some(AudioResource::Gong),
        SessionPhase::Intro => config.intro_file().map(|f| AudioResource::Chant(f.to_string())),
        SessionPhase::OutroChanting => config
            .outro_file()
            .map(|f| AudioResource::Chant(f.to_string())),
        SessionPhase::Outro => Some(AudioResource::Closing),
        SessionPhase::GuidedSession => Some(AudioResource::Instructions(config.instruction_type())),
        SessionPhase::Meditation | SessionPhase::Idle | SessionPhase::Complete => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::InstructionType;

    fn configs() -> Vec<SessionConfig> {
        let chant = || Some("x.mp3".to_string());
        let mut configs = Vec::new();
        for gong in [false, true] {
            for intro in [None, chant()] {
                for outro in [None, chant()] {
                    configs.push(SessionConfig::custom(gong, intro.clone(), outro, 10));
                }
            }
            for kind in [InstructionType::Short, InstructionType::Long] {
                configs.push(SessionConfig::guided(gong, 10, kind));
            }
        }
        configs
    }

    #[test]
    fn next_phase_only_stays_put_when_idle() {
        for config in configs() {
            for phase in SessionPhase::ALL {
                let next = next_phase(phase, &config);
                if phase != SessionPhase::Idle {
                    assert_ne!(next, phase, "{} looped on {:?}", phase, config);
                }
            }
        }
    }

    #[test]
    fn every_config_reaches_complete() {
        for config in configs() {
            let mut phase = first_phase(&config);
            let mut steps = 0;
            while phase != SessionPhase::Complete {
                assert!(phase.is_driven());
                phase = next_phase(phase, &config);
                steps += 1;
                assert!(steps <= SessionPhase::ALL.len(), "cycle in {:?}", config);
            }
        }
    }

    #[test]
    fn complete_returns_to_idle() {
        let config = SessionConfig::custom(true, None, None, 5);
        assert_eq!(next_phase(SessionPhase::Complete, &config), SessionPhase::Idle);
        assert_eq!(next_phase(SessionPhase::Idle, &config), SessionPhase::Idle);
    }

    #[test]
    fn custom_without_gong_or_intro_starts_silent() {
        let config = SessionConfig::custom(false, None, Some("x.mp3".to_string()), 30);
        assert_eq!(first_phase(&config), SessionPhase::Meditation);
        assert_eq!(next_phase(SessionPhase::Meditation, &config), SessionPhase::OutroChanting);
        assert_eq!(next_phase(SessionPhase::OutroChanting, &config), SessionPhase::Outro);
        assert_eq!(next_phase(SessionPhase::Outro, &config), SessionPhase::Complete);
    }

    #[test]
    fn guided_with_gong() {
        let config = SessionConfig::guided(true, 10, InstructionType::Long);
        assert_eq!(first_phase(&config), SessionPhase::Gong);
        assert_eq!(next_phase(SessionPhase::Gong, &config), SessionPhase::GuidedSession);
        assert_eq!(next_phase(SessionPhase::GuidedSession, &config), SessionPhase::Complete);
        assert_eq!(
            audio_for(SessionPhase::GuidedSession, &config),
            Some(AudioResource::Instructions(InstructionType::Long))
        );
    }

    #[test]
    fn guided_without_gong_starts_with_instructions() {
        let config = SessionConfig::guided(false, 10, InstructionType::Short);
        assert_eq!(first_phase(&config), SessionPhase::GuidedSession);
    }

    #[test]
    fn gong_leads_to_intro_when_chosen() {
        let config = SessionConfig::custom(true, Some("i.mp3".to_string()), None, 10);
        assert_eq!(first_phase(&config), SessionPhase::Gong);
        assert_eq!(next_phase(SessionPhase::Gong, &config), SessionPhase::Intro);
        assert_eq!(next_phase(SessionPhase::Intro, &config), SessionPhase::Meditation);
        assert_eq!(next_phase(SessionPhase::Meditation, &config), SessionPhase::Outro);
    }

    #[test]
    fn audio_per_phase() {
        let config = SessionConfig::custom(true, Some("i.mp3".to_string()), Some("o.mp3".to_string()), 10);
        assert_eq!(audio_for(SessionPhase::Gong, &config), Some(AudioResource::Gong));
        assert_eq!(
            audio_for(SessionPhase::Intro, &config),
            Some(AudioResource::Chant("i.mp3".to_string()))
        );
        assert_eq!(
            audio_for(SessionPhase::OutroChanting, &config),
            Some(AudioResource::Chant("o.mp3".to_string()))
        );
        assert_eq!(audio_for(SessionPhase::Outro, &config), Some(AudioResource::Closing));
        assert_eq!(audio_for(SessionPhase::Meditation, &config), None);
        assert_eq!(audio_for(SessionPhase::Idle, &config), None);
        assert_eq!(audio_for(SessionPhase::Complete, &config), None);
    }

    #[test]
    fn intro_audio_absent_without_file() {
        let config = SessionConfig::custom(false, None, None, 10);
        assert_eq!(audio_for(SessionPhase::Intro, &config), None);
        assert_eq!(audio_for(SessionPhase::OutroChanting, &config), None);
    }
}
