//! Google Play store provider.

mod client;
mod provider;

pub use client::{PlayCoreClient, PlayUpdateInfo, UpdateAvailability};
pub use provider::PlayStoreProvider;
