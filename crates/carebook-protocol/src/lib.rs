//! Shared error taxonomy and notification status types for Carebook.

mod lifecycle;
mod tool;
mod upstream;

pub use lifecycle::{AppointmentId, LifecycleError, NotificationStatus};
pub use tool::ToolError;
pub use upstream::UpstreamError;
