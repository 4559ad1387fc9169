use crawler_core::error::ApiError;
use reqwest::StatusCode;
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::header::HeaderMap;

pub(crate) fn send(builder: RequestBuilder) -> anyhow::Result<Response> {
    builder
        .send()
        .map_err(|err| anyhow::Error::new(ApiError::Network(err.to_string())))
}

/// Gates a response on success, mapping provider-detected rate limiting and
/// other failure statuses into the shared error taxonomy.
pub(crate) fn ensure_success<F>(response: Response, rate_limited: F) -> anyhow::Result<Response>
where
    F: Fn(StatusCode, &HeaderMap) -> bool,
{
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if rate_limited(status, response.headers()) {
        return Err(ApiError::RateLimited.into());
    }
    Err(ApiError::Status {
        status: status.as_u16(),
    }
    .into())
}

/// GitHub signals an exhausted quota as 403 with a zeroed
/// x-ratelimit-remaining, or 429 on newer deployments.
pub(crate) fn github_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN && quota_exhausted(headers)
}

fn quota_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        == Some(0)
}

pub(crate) fn gitlab_rate_limited(status: StatusCode, _headers: &HeaderMap) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
}
