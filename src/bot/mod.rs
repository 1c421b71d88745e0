mod command_registry;
mod component_router;
mod event_handler;
mod handler;

pub mod helpers;
pub mod init;
pub mod platform;

// Re-export Handler for convenience
pub use handler::Handler;
