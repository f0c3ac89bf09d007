use http_types::{Request, Version};

/// User agent sent with every request, carrying the crate version
pub const USER_AGENT: &str = concat!("lastfm-api v", env!("CARGO_PKG_VERSION"));

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Add the headers every web service request carries
pub fn add_common_headers(request: &mut Request) {
    request.set_version(Some(Version::Http1_1));
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Connection", "close");
}

/// Add headers for POST requests whose parameters travel in the form body
pub fn add_form_headers(request: &mut Request) {
    add_common_headers(request);
    let _ = request.insert_header("Content-Type", FORM_CONTENT_TYPE);
}
