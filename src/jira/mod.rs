pub mod client;
pub mod error;
pub mod jql;

pub use client::JiraClient;
pub use error::{Error, Result};
