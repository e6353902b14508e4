//! API utilities for frontend-backend communication
//!
//! Provides helpers for building reporting service URLs and fetching JSON.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Port the reporting service listens on
const API_PORT: u16 = 8001;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 8001 for the reporting service.
///
/// # Returns
/// - API base URL like "http://localhost:8001"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

/// Build a full API URL from a path such as `/movies/12`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Build `path?query` with the query encoded by serde_qs
pub fn api_url_with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    if qs.is_empty() {
        Ok(api_url(path))
    } else {
        Ok(format!("{}?{}", api_url(path), qs))
    }
}

/// GET a URL and decode the JSON body
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, String> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
