//! Genkan: admin-gated room chat over WebSocket.
//!
//! The first user to join a room becomes its admin; everyone after that waits
//! in the room's entrance until the admin approves or rejects them.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
