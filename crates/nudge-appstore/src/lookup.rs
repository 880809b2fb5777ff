use nudge_backend::{BackendError, StoreAvailability};
use serde::Deserialize;

pub(crate) const LOOKUP_URL: &str = "https://itunes.apple.com/lookup";
const OPERATION: &str = "app store lookup";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    #[serde(default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<LookupResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub version: String,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub track_view_url: Option<String>,
    #[serde(default)]
    pub minimum_os_version: Option<String>,
}

pub(crate) fn lookup_url(base: &str, app_id: &str, country: Option<&str>) -> String {
    match country {
        Some(country) => format!("{base}?id={app_id}&country={country}"),
        None => format!("{base}?id={app_id}"),
    }
}

/// Fetch the store listing for `app_id` from the iTunes lookup endpoint.
///
/// # Errors
/// Returns a network error when the request fails, the endpoint answers with
/// a non-success status, or the body cannot be parsed.
pub async fn lookup_app(
    client: &reqwest::Client,
    base_url: &str,
    app_id: &str,
    country: Option<&str>,
) -> Result<LookupResponse, BackendError> {
    let url = lookup_url(base_url, app_id, country);

    let response = client
        .get(&url)
        .header("User-Agent", "nudge")
        .send()
        .await
        .map_err(|error| BackendError::network_request_from(OPERATION, error))?;

    if !response.status().is_success() {
        return Err(BackendError::network_status(
            OPERATION,
            format!("HTTP {}", response.status()),
        ));
    }

    response
        .json()
        .await
        .map_err(|error| BackendError::network_parse_from(OPERATION, error))
}

/// Every App Store update is completed in the store app, so both flow kinds
/// are reported as allowed whenever a listing exists.
pub(crate) fn availability_from_lookup(response: LookupResponse) -> StoreAvailability {
    let Some(result) = response.results.into_iter().next() else {
        return StoreAvailability::unavailable();
    };

    StoreAvailability {
        available: true,
        latest_version_token: result.version,
        allowed_flexible: true,
        allowed_immediate: true,
        priority: 0,
        release_notes: result.release_notes.filter(|notes| !notes.trim().is_empty()),
    }
}
