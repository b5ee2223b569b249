//! Public surface for Carebook.
//!
//! This crate re-exports the building blocks and provides wiring helpers to
//! keep embedder setup consistent.

use std::sync::Arc;

/// Re-export for convenience.
pub use carebook_api as api;
/// Re-export for convenience.
pub use carebook_config as config;
pub use carebook_core as core;
/// Re-export for convenience.
pub use carebook_protocol as protocol;
pub use carebook_scheduling as scheduling;
/// Re-export for convenience.
pub use carebook_store as store;
pub use carebook_tools as tools;

use carebook_config::CarebookConfig;
use carebook_core::{Assistant, Interpreter};
use carebook_scheduling::{Mailer, NullMailer, SchedulingService};
use carebook_store::MemoryAppointmentStore;
use carebook_tools::appointment_tool_registry;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}

/// Wire an assistant and scheduling service from config.
///
/// Uses the in-memory store. The mailer is replaced with a [`NullMailer`]
/// when notifications are disabled in config.
pub fn bootstrap(
    config: &CarebookConfig,
    interpreter: Arc<dyn Interpreter>,
    mailer: Arc<dyn Mailer>,
) -> (Arc<Assistant>, Arc<SchedulingService>) {
    let mailer: Arc<dyn Mailer> = if config.notifier.enabled {
        mailer
    } else {
        log::info!("notifications disabled, discarding outgoing email");
        Arc::new(NullMailer)
    };
    let scheduling = Arc::new(SchedulingService::new(
        Arc::new(MemoryAppointmentStore::new()),
        mailer,
    ));
    let registry = Arc::new(appointment_tool_registry(scheduling.clone()));
    let assistant = Arc::new(
        Assistant::new(interpreter, registry)
            .with_max_tool_steps(config.assistant.max_tool_steps)
            .with_scheduling_keywords(config.assistant.scheduling_keywords.clone()),
    );
    (assistant, scheduling)
}

/// Wire a ready-to-serve API router from config.
pub fn bootstrap_router(
    config: &CarebookConfig,
    interpreter: Arc<dyn Interpreter>,
    mailer: Arc<dyn Mailer>,
) -> axum::Router {
    let (assistant, scheduling) = bootstrap(config, interpreter, mailer);
    carebook_api::api_router(carebook_api::AppState::new(assistant, scheduling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carebook_test_utils::{RecordingMailer, ScriptedInterpreter, slot};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn disabled_notifier_discards_email() {
        let config = CarebookConfig::builder()
            .notifier(carebook_config::NotifierConfig {
                enabled: false,
                sender: None,
            })
            .build();
        let mailer = Arc::new(RecordingMailer::new());
        let (_, scheduling) = bootstrap(
            &config,
            ScriptedInterpreter::replying("ok"),
            mailer.clone(),
        );

        scheduling
            .create("alice", slot(), "Checkup", Some("alice@example.com".into()))
            .await
            .expect("create should succeed");
        assert_eq!(mailer.sent().len(), 0);
    }

    #[tokio::test]
    async fn enabled_notifier_uses_the_given_mailer() {
        let mailer = Arc::new(RecordingMailer::new());
        let (_, scheduling) = bootstrap(
            &CarebookConfig::default(),
            ScriptedInterpreter::replying("ok"),
            mailer.clone(),
        );

        scheduling
            .create("alice", slot(), "Checkup", Some("alice@example.com".into()))
            .await
            .expect("create should succeed");
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.sent()[0].to, "alice@example.com");
    }
}
