//! Tooling layer for the Carebook assistant.
//!
//! Defines the [`Tool`] trait the conversational interpreter dispatches
//! against, a thread-safe [`ToolRegistry`], and the four appointment
//! lifecycle tools built over `carebook-scheduling`.

mod appointments;
mod context;
mod registry;
mod tool;

/// Appointment lifecycle tools and the default registry builder.
pub use appointments::{
    CreateAppointmentTool, DeleteAppointmentTool, ListAppointmentsTool, UpdateAppointmentTool,
    appointment_tool_registry,
};
/// Caller context for tool invocations.
pub use context::ToolContext;
/// Tool registry.
pub use registry::ToolRegistry;
/// Tool trait, spec, and argument helpers.
pub use tool::{Tool, ToolSpec, parse_args};
