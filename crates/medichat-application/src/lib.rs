//! Orchestration layer for medichat: the session controller that owns the
//! live conversation state and keeps transcript, snapshot, and backend
//! consistent.

pub mod session_controller;

pub use session_controller::{
    SEND_FAILURE_NOTICE, SessionController, SessionState, SessionView, VOICE_NOTE_PLACEHOLDER,
};
