//! Rocket.Chat REST adapter.

mod client;
mod dto;

pub use client::RocketChatClient;
