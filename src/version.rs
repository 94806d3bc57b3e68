// Version information for the BYOB search backend

/// Full version string with feature description
pub const VERSION: &str = "v1.0.0-google-cse-rag-2026-10-18";

/// Semantic version number
pub const VERSION_NUMBER: &str = "1.0.0";

/// Build date
pub const BUILD_DATE: &str = "2026-10-18";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "query-refinement",
    "google-custom-search",
    "recency-filter",
    "site-filter",
    "concurrent-summaries",
    "cited-synthesis",
    "cancellation",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("BYOB Search {} ({})", VERSION_NUMBER, BUILD_DATE)
}
