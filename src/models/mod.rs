// ABOUTME: Core data models for byobu sessions

pub mod session;

pub use session::Session;
