//! HTML pages

use crate::templates;
use crate::{ApiError, ApiResult, ApiState};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use payout_core::PostIdentifier;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub url: Option<String>,
}

/// Turns a full post URL into a local path: scheme and host are dropped.
///
/// `https://steemit.com/tag/@author/permlink` becomes `tag/@author/permlink`.
/// The result never starts with `/` or `\`, so `/{result}` is always a
/// path on this host.
pub fn normalize_post_url(url: &str) -> String {
    let stripped = url.replace("https://", "").replace("http://", "");
    let path = match stripped.find('/') {
        Some(index) => &stripped[index + 1..],
        None => stripped.as_str(),
    };
    path.trim_start_matches(['/', '\\']).to_string()
}

/// GET /?url=<post url>
pub async fn index(Query(query): Query<IndexQuery>) -> Response {
    match query.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            let target = format!("/{}", normalize_post_url(url));
            tracing::debug!("Redirecting {} to {}", url, target);
            Redirect::to(&target).into_response()
        }
        _ => Html(templates::landing_page()).into_response(),
    }
}

/// GET /{category}/@{author}/{permlink}
pub async fn post_page(
    State(state): State<ApiState>,
    Path((_category, author, permlink)): Path<(String, String, String)>,
) -> ApiResult<Html<String>> {
    let Some(author) = author.strip_prefix('@') else {
        return Err(ApiError::PostNotFound(format!("{}/{}", author, permlink)));
    };

    let id = PostIdentifier::new(author, permlink);
    let estimate = state.rewards.estimate_post(&id).await?;

    Ok(Html(templates::rewards_page(&estimate.post, &estimate.payout)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_post_url() {
        assert_eq!(
            normalize_post_url("https://steemit.com/steemdev/@emrebeyler/hello"),
            "steemdev/@emrebeyler/hello"
        );
        assert_eq!(
            normalize_post_url("http://busy.org/@emrebeyler/hello"),
            "@emrebeyler/hello"
        );
        assert_eq!(
            normalize_post_url("steemit.com/steemdev/@emrebeyler/hello"),
            "steemdev/@emrebeyler/hello"
        );
    }

    #[test]
    fn test_normalize_never_leaves_the_host() {
        assert_eq!(
            normalize_post_url("https://steemit.com//evil.example/phish"),
            "evil.example/phish"
        );
        assert_eq!(
            normalize_post_url("https://steemit.com/\\/evil.example"),
            "evil.example"
        );
        assert_eq!(normalize_post_url("///evil.example"), "evil.example");
    }

    #[test]
    fn test_normalize_without_path() {
        assert_eq!(normalize_post_url("https://steemit.com"), "steemit.com");
        assert_eq!(normalize_post_url(""), "");
    }
}
