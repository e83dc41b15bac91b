//! Shared fixtures for resultgrid integration tests.

pub mod mock_engine;
pub mod sample_responses;

pub use mock_engine::*;
pub use sample_responses::*;
