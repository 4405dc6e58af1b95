//! Infrastructure layer - adapters for the outbound ports

pub mod config;
pub mod messaging;
pub mod platform;
pub mod process_watch;
pub mod supabase;
pub mod window;
