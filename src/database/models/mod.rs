pub mod activity;
pub mod employee;
pub mod leave;
pub(crate) mod macros;
pub mod notification;

// Re-export all models for easy importing
pub use activity::*;
pub use employee::*;
pub use leave::*;
pub use notification::*;
