//! Data Transfer Objects (DTOs) for the room chat server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: push channel event envelopes
//! - `http`: HTTP API request/response DTOs
//! - `conversion`: DTO ↔ domain conversion

pub mod conversion;
pub mod http;
pub mod websocket;
