//! This is the library of the GitHub relay service.
pub mod config;
pub mod github;
pub mod server;
pub mod utils;

pub use config::{GithubCredentials, RelayConfig};
pub use github::GithubClient;
pub use server::{create_app, ServerState};

#[cfg(test)]
mod tests;
