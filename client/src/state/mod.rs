//! Client-side state modules.

pub mod chat;
