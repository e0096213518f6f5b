//! Session phases

use std::fmt;

/// One named stage of a meditation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Gong,
    Intro,
    Meditation,
    OutroChanting,
    Outro,
    GuidedSession,
    Complete,
}

impl SessionPhase {
    pub const ALL: [SessionPhase; 8] = [
        Self::Idle,
        Self::Gong,
        Self::Intro,
        Self::Meditation,
        Self::OutroChanting,
        Self::Outro,
        Self::GuidedSession,
        Self::Complete,
    ];

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Gong => "gong",
            Self::Intro => "intro",
            Self::Meditation => "meditation",
            Self::OutroChanting => "outro_chanting",
            Self::Outro => "outro",
            Self::GuidedSession => "guided_session",
            Self::Complete => "complete",
        }
    }

    /// Human-readable label for status lines
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Ready",
            Self::Gong => "Gong",
            Self::Intro => "Opening chant",
            Self::Meditation => "Silent meditation",
            Self::OutroChanting => "Closing chant",
            Self::Outro => "Closing",
            Self::GuidedSession => "Guided meditation",
            Self::Complete => "Session complete",
        }
    }

    /// Whether an audio playback or countdown runs during this phase
    pub const fn is_driven(&self) -> bool {
        !matches!(self, Self::Idle | Self::Complete)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(SessionPhase::Idle.to_string(), "idle");
        assert_eq!(SessionPhase::OutroChanting.to_string(), "outro_chanting");
        assert_eq!(SessionPhase::GuidedSession.to_string(), "guided_session");
    }

    #[test]
    fn only_idle_and_complete_are_undriven() {
        let undriven: Vec<_> = SessionPhase::ALL
            .into_iter()
            .filter(|p| !p.is_driven())
            .collect();
        assert_eq!(undriven, vec![SessionPhase::Idle, SessionPhase::Complete]);
    }
}
