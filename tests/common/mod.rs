//! Shared test utilities

pub mod fixtures;
pub mod mock_platform;
pub mod mock_services;
