use std::sync::LazyLock;

use regex::Regex;

const MIN_PACKAGE_SEGMENTS: usize = 3;
const MIN_FIRST_SEGMENT_LEN: usize = 3;
const MIN_LAST_SEGMENT_LEN: usize = 2;

pub(crate) static APP_STORE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://apps\.apple\.com/.*/id(\d+)").expect("App Store URL pattern is valid")
});

/// Check a Google Play package name such as `com.example.app`.
///
/// Every segment must start with a lowercase ASCII letter followed by
/// lowercase letters, digits or underscores. At least three segments are
/// required, the first at least three characters long and the last at least
/// two.
#[must_use]
pub fn is_valid_play_package_name(name: &str) -> bool {
    if name.trim().is_empty() {
        return false;
    }

    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() < MIN_PACKAGE_SEGMENTS || !segments.iter().all(|s| is_package_segment(s)) {
        return false;
    }

    segments[0].len() >= MIN_FIRST_SEGMENT_LEN
        && segments[segments.len() - 1].len() >= MIN_LAST_SEGMENT_LEN
}

fn is_package_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Check an App Store identifier: a numeric id or an `apps.apple.com` URL
/// ending in `id<digits>`.
#[must_use]
pub fn is_valid_apple_id_or_url(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }

    value.parse::<i64>().is_ok() || APP_STORE_URL.is_match(value)
}
