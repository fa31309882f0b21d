pub mod consumer;
pub mod handler;
pub mod kafka;
