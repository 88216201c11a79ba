//! Per-test fixture lifecycle.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::FixtureError;

/// Builds and releases the state handed to each test body.
///
/// The runner calls [`setup`](FixtureManager::setup) right before a test and
/// [`cleanup`](FixtureManager::cleanup) right after it, on the same fixture,
/// whatever the outcome. No fixture outlives a single test.
///
/// Fixtures must be serializable because process isolation ships a copy to
/// the worker that runs the body. The runner keeps the original, so cleanup
/// never sees state written by a test that crashed half-way.
pub trait FixtureManager {
    type Fixture: Serialize + DeserializeOwned + 'static;

    /// A failure here stops the whole run.
    fn setup(&mut self) -> Result<Self::Fixture, FixtureError>;

    fn cleanup(&mut self, fixture: Self::Fixture);
}
