//! Test helpers shared across Carebook crates.

pub mod fixtures;
pub mod interpreter;
pub mod mailer;
pub mod media;

pub use fixtures::{scheduling_service, scheduling_service_with, slot};
pub use interpreter::ScriptedInterpreter;
pub use mailer::RecordingMailer;
pub use media::{FailingTranscriber, FixedTranscriber, FixedVision};
