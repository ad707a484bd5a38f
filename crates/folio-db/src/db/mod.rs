//! Database repositories for the data access layer
//!
//! Each repository is responsible for a specific domain entity and provides
//! CRUD operations and specialized queries. All queries are owner-scoped.

pub mod client;
pub mod client_file;
pub mod reminder;
pub mod task;

pub use client::ClientRepository;
pub use client_file::ClientFileRepository;
pub use reminder::ReminderRepository;
pub use task::TaskRepository;
