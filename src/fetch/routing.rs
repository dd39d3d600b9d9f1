//! Platform and regional routing hosts.
//!
//! League endpoints live on platform hosts (`euw1`, `na1`, ...) while the
//! account service lives on regional clusters (`europe`, `americas`, `asia`).

/// Regional clusters accepted as-is by the account service.
const REGIONAL_ROUTES: &[&str] = &["americas", "europe", "asia"];

/// Normalise a user-supplied region to a lowercase host label.
pub fn platform_host(region: &str) -> String {
    region.trim().to_ascii_lowercase()
}

/// Regional cluster serving account lookups for a platform.
///
/// Regional names pass through unchanged, except `sea`, which the account
/// service does not serve. Unknown platforms are returned
/// verbatim so the provider rejects them instead of us guessing.
pub fn regional_host(region: &str) -> String {
    let platform = platform_host(region);
    if REGIONAL_ROUTES.contains(&platform.as_str()) {
        return platform;
    }

    let cluster = match platform.as_str() {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" | "me1" => "europe",
        // The account service has no sea cluster; it and its shards resolve via asia.
        "sea" | "kr" | "jp1" | "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "asia",
        _ => return platform,
    };
    cluster.to_string()
}
