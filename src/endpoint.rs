pub const LOGIN_PATH: &str = "/api/user/login";

/// Strips a trailing slash so derived URLs never contain `//`.
pub fn normalize_base_url(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

pub fn login_endpoint(base: &str) -> String {
    format!("{}{}", normalize_base_url(base), LOGIN_PATH)
}

pub fn origin_header(base: &str) -> &str {
    normalize_base_url(base)
}

pub fn referer_header(base: &str) -> String {
    format!("{}/", normalize_base_url(base))
}
