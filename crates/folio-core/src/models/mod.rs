//! Domain models

pub mod client;
pub mod client_file;
pub mod reminder;
pub mod task;

pub use client::Client;
pub use client_file::{ClientFile, NewClientFile};
pub use reminder::Reminder;
pub use task::{Task, TaskPriority};
