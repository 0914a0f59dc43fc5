// Export music utilities
pub mod button_controls;
pub mod component_handlers;
pub mod embedded_messages;
pub mod lavalink_events;
pub mod music_manager;
