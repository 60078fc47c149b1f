//! Event types for Roomtone

/// Notifications emitted by the audio engine, drained through
/// [`crate::engine::RoomtoneEngine::poll_events`].
#[derive(Debug, Clone, PartialEq)]
pub enum RoomtoneEvent {
    /// A voice began sounding on the audio thread.
    VoiceStarted { id: String },
    /// A voice was removed from the mix.
    VoiceStopped { id: String },
    EngineStarted,
    EngineStopped,
    EngineError { error: String },
}

impl RoomtoneEvent {
    /// The source id this event concerns, for per-voice events.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::VoiceStarted { id } | Self::VoiceStopped { id } => Some(id),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::EngineError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_only_for_voice_events() {
        let started = RoomtoneEvent::VoiceStarted { id: "hum".into() };
        assert_eq!(started.source_id(), Some("hum"));
        assert_eq!(RoomtoneEvent::EngineStarted.source_id(), None);
    }

    #[test]
    fn error_classification() {
        let err = RoomtoneEvent::EngineError {
            error: "device lost".into(),
        };
        assert!(err.is_error());
        assert!(!RoomtoneEvent::EngineStopped.is_error());
    }
}
