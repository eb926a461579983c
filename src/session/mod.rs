//! Session layer: messages, controller, stdio server

mod controller;
mod messages;
mod server;

pub use controller::Session;
pub use messages::{Inbound, Outbound};
pub use server::MessageServer;
