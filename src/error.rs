use crate::scene::SceneKind;

/// Everything the engine can refuse to do.
///
/// Lookup failures are contract violations between host and engine and are
/// surfaced loudly. Re-entrant action requests are not errors and never
/// show up here.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown pet kind '{0}'")]
    UnknownKind(String),

    #[error("unknown {kind} breed '{breed}'")]
    UnknownBreed { kind: String, breed: String },

    #[error("breed '{breed}' is not a {kind} breed")]
    BreedKindMismatch { kind: String, breed: String },

    #[error("unknown scene '{0}'")]
    UnknownScene(String),

    #[error("{scene} scene is not ready for '{command}'")]
    NotReady { scene: SceneKind, command: &'static str },

    #[error("{scene} scene does not support '{command}'")]
    Unsupported { scene: SceneKind, command: &'static str },

    #[error("{scene} scene cannot be initialised while {phase}")]
    InvalidPhase { scene: SceneKind, phase: &'static str },
}

pub type Result<T> = std::result::Result<T, EngineError>;
