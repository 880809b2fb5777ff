//! Apple App Store provider.

mod lookup;
mod provider;

pub use lookup::{LookupResponse, LookupResult, lookup_app};
pub use provider::AppStoreProvider;
