//! End-to-end conversation scenarios over real tools and a real store.

use std::sync::Arc;

use carebook_core::{Assistant, InterpreterStep};
use carebook_scheduling::{AppointmentStore, SchedulingService};
use carebook_test_utils::{RecordingMailer, ScriptedInterpreter, scheduling_service_with, slot};
use carebook_tools::appointment_tool_registry;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

fn assistant_over(
    scheduling: Arc<SchedulingService>,
    interpreter: Arc<ScriptedInterpreter>,
) -> Assistant {
    Assistant::new(interpreter, Arc::new(appointment_tool_registry(scheduling)))
}

/// Booking through the dispatcher lands in the store and on the transcript.
#[tokio::test]
async fn book_then_list_through_conversation() {
    let mailer = Arc::new(RecordingMailer::new());
    let scheduling = scheduling_service_with(mailer.clone());
    let interpreter = ScriptedInterpreter::new(vec![
        Ok(InterpreterStep::ToolCall {
            name: "create_appointment".into(),
            arguments: json!({
                "date_time": "2026-09-14T10:30:00",
                "purpose": "Checkup",
                "email": "alice@example.com"
            }),
        }),
        Ok(InterpreterStep::Reply("You're booked for 10:30.".into())),
        Ok(InterpreterStep::ToolCall {
            name: "list_appointments".into(),
            arguments: json!({ "user_id": "alice" }),
        }),
        Ok(InterpreterStep::Reply("You have one appointment.".into())),
    ]);
    let assistant = assistant_over(scheduling.clone(), interpreter.clone());
    let session = Uuid::new_v4();

    let reply = assistant
        .handle_message(session, "alice", "book me a checkup tomorrow")
        .await
        .expect("booking turn");
    assert_eq!(reply, "You're booked for 10:30.");

    let reply = assistant
        .handle_message(session, "alice", "what appointments do I have?")
        .await
        .expect("listing turn");
    assert_eq!(reply, "You have one appointment.");

    let appointments = scheduling.list("alice").expect("list");
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].purpose, "Checkup");

    // The list tool's observation carries the rendered schedule.
    let observations = interpreter.observations();
    let listing = &observations.last().expect("steps")[0];
    assert_eq!(listing.tool, "list_appointments");
    assert!(listing.output.starts_with("Your appointments:\n- 2026-09-14 10:30: Checkup"));

    assert_eq!(mailer.sent().len(), 1);
    assert_eq!(assistant.history("alice").len(), 4);
}

/// A foreign session cannot cancel someone else's appointment, whatever it
/// claims in the tool arguments.
#[tokio::test]
async fn foreign_delete_is_refused() {
    let scheduling = scheduling_service_with(Arc::new(RecordingMailer::new()));
    let created = scheduling
        .create("alice", slot(), "Checkup", None)
        .await
        .expect("create");
    let id = created.appointment.id;

    let interpreter = ScriptedInterpreter::new(vec![
        Ok(InterpreterStep::ToolCall {
            name: "delete_appointment".into(),
            arguments: json!({
                "appointment_id": id,
                "confirmation": true,
                "reason": "mine now"
            }),
        }),
        Ok(InterpreterStep::Reply("I can't do that.".into())),
    ]);
    let assistant = assistant_over(scheduling.clone(), interpreter.clone());

    assistant
        .handle_message(Uuid::new_v4(), "mallory", "cancel that appointment")
        .await
        .expect("turn");

    assert_eq!(
        interpreter.observations()[1][0].output,
        "You don't have permission to delete this appointment."
    );
    assert_eq!(scheduling.list("alice").expect("list").len(), 1);
}

/// A confirmed cancellation deletes the record and keeps the reason.
#[tokio::test]
async fn confirmed_cancellation_keeps_the_reason() {
    let scheduling = scheduling_service_with(Arc::new(RecordingMailer::new()));
    let created = scheduling
        .create("alice", slot(), "Checkup", Some("alice@example.com".into()))
        .await
        .expect("create");
    let id = created.appointment.id;

    let interpreter = ScriptedInterpreter::new(vec![
        Ok(InterpreterStep::ToolCall {
            name: "delete_appointment".into(),
            arguments: json!({
                "appointment_id": id,
                "confirmation": true,
                "reason": "Schedule conflict"
            }),
        }),
        Ok(InterpreterStep::Reply("Cancelled.".into())),
    ]);
    let assistant = assistant_over(scheduling.clone(), interpreter);

    assistant
        .handle_message(Uuid::new_v4(), "alice", "yes, cancel it")
        .await
        .expect("turn");

    assert!(scheduling.list("alice").expect("list").is_empty());
    let record = scheduling
        .store()
        .cancellation(id)
        .expect("store")
        .expect("record");
    assert_eq!(record.reason, "Schedule conflict");
}

/// The detected date rides along in the turn context for scheduling talk.
#[tokio::test]
async fn scheduling_talk_carries_a_detected_date() {
    let scheduling = scheduling_service_with(Arc::new(RecordingMailer::new()));
    let interpreter = ScriptedInterpreter::new(vec![Ok(InterpreterStep::Reply("Sure.".into()))]);
    let assistant = assistant_over(scheduling, interpreter.clone());

    assistant
        .handle_message(Uuid::new_v4(), "alice", "book me on 2026-10-01 at 2pm")
        .await
        .expect("turn");

    let ctx = &interpreter.contexts()[0];
    assert_eq!(
        ctx.detected_date.map(|dt| dt.to_string()),
        Some("2026-10-01 14:00:00".to_string())
    );
}
