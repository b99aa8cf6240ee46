//! Shared test utilities for domain testing
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied and
//!   automatic cleanup
//! - `TestDataBuilder`: deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let entity = builder.name("entity", "main");
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Builder for test data with deterministic randomization.
///
/// Seeding from the test name keeps generated names stable across runs
/// while distinct between tests, so parallel tests never collide on data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with an explicit seed
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from a test name (seed derived from the name hash).
    ///
    /// This is the recommended way to create a builder.
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique, reproducible name: `{prefix}-{label}-{seed}`
    pub fn name(&self, prefix: &str, label: &str) -> String {
        format!("{}-{}-{:x}", prefix, label, self.seed)
    }

    /// Generate a contact person name tied to this builder's seed
    pub fn contact(&self, label: &str) -> String {
        format!("contact-{}-{:x}", label, self.seed)
    }
}
