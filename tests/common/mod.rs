//! Shared utilities for integration tests.

#![allow(dead_code)]

pub mod mock_platform;

use commerce_fixtures::config::PlatformConfig;

pub use mock_platform::{GraphqlFailure, MockPlatform};

/// Platform settings pointing at a mock, with the mock's admin credentials.
pub fn platform_config(mock: &MockPlatform) -> PlatformConfig {
    PlatformConfig::new(mock.url())
        .with_credentials(mock_platform::ADMIN_USERNAME, mock_platform::ADMIN_PASSWORD)
}
