//! Network layer: the streaming exchange with the relay endpoint.

pub mod chat;
