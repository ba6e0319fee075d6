//! Amazon SNS HTTP(S) delivery messages

pub mod message;

pub use message::{MessageType, SnsMessage};
