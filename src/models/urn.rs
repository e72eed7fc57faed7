//! DataHub URN builders
//!
//! All builders are pure: the same inputs always produce the same URN, and
//! an input that already carries the expected prefix is returned unchanged.

const DATA_PLATFORM_PREFIX: &str = "urn:li:dataPlatform:";
const CORP_USER_PREFIX: &str = "urn:li:corpuser:";
const DOMAIN_PREFIX: &str = "urn:li:domain:";

/// Build a data platform URN (`urn:li:dataPlatform:{platform}`)
pub fn make_data_platform_urn(platform: &str) -> String {
    if platform.starts_with(DATA_PLATFORM_PREFIX) {
        platform.to_string()
    } else {
        format!("{}{}", DATA_PLATFORM_PREFIX, platform)
    }
}

/// Build a dataset URN from platform, dataset name and environment tag.
///
/// # Example
///
/// ```rust
/// use catalog_ingest_sdk::models::urn::make_dataset_urn;
///
/// let urn = make_dataset_urn("opendata", "abc-123", "PROD");
/// assert_eq!(urn, "urn:li:dataset:(urn:li:dataPlatform:opendata,abc-123,PROD)");
/// ```
pub fn make_dataset_urn(platform: &str, name: &str, env: &str) -> String {
    format!(
        "urn:li:dataset:({},{},{})",
        make_data_platform_urn(platform),
        name,
        env
    )
}

/// Build a corp user URN (`urn:li:corpuser:{user}`)
pub fn make_user_urn(user: &str) -> String {
    if user.starts_with(CORP_USER_PREFIX) {
        user.to_string()
    } else {
        format!("{}{}", CORP_USER_PREFIX, user)
    }
}

/// Build a domain URN (`urn:li:domain:{domain}`)
pub fn make_domain_urn(domain: &str) -> String {
    if domain.starts_with(DOMAIN_PREFIX) {
        domain.to_string()
    } else {
        format!("{}{}", DOMAIN_PREFIX, domain)
    }
}
