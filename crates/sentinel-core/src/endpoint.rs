// ── Upstream URL builder ──

/// Path segment between the base URL and the endpoint name.
pub const API_PREFIX: &str = "sdo";

/// Build the absolute URL for `endpoint` under `base`.
///
/// The base is trimmed and at most one trailing `/` is removed before
/// `/sdo/{endpoint}` is appended. A base that is empty after trimming yields
/// `""`, which callers treat as "not configured".
pub fn build_url(base: &str, endpoint: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        return String::new();
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    format!("{base}/{API_PREFIX}/{endpoint}")
}
