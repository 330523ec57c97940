//! Feed authentication from the `[registry]` config section.
//!
//! A username (with or without password) is sent as HTTP basic auth. A
//! password on its own is treated as a NuGet API key.

use reqwest::RequestBuilder;

use crate::repository::NuGetFeed;

/// Header private NuGet feeds read API keys from.
pub const API_KEY_HEADER: &str = "X-NuGet-ApiKey";

/// Apply authentication to a request if the feed has credentials.
pub fn apply_auth(request: RequestBuilder, feed: &NuGetFeed) -> RequestBuilder {
    if !feed.has_auth() {
        return request;
    }
    tracing::trace!("sending credentials to {}", feed.url);
    match (&feed.username, &feed.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(key)) => request.header(API_KEY_HEADER, key),
        (None, None) => request,
    }
}
