// epgport-api: Async Rust client for the Multi-Site Orchestrator REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod fabric;
pub mod models;
pub mod schemas;
pub mod sites;
pub mod transport;

pub use auth::{Credentials, Session};
pub use client::MsoClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
