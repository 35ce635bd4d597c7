//! Integration tests with mock HTTP server

pub mod auth_flow;
pub mod error_handling;
pub mod executor;
pub mod mock_server;
pub mod repositories;
