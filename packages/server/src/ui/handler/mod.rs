//! Request handlers.

mod http;
mod websocket;

pub use http::{check_admin, get_room_detail, get_rooms, health_check};
pub use websocket::websocket_handler;
