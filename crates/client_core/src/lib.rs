//! Protocol client for the activity signup service.
//!
//! Owns the three HTTP operations the UI depends on (catalog read, signup,
//! unregister) and the typed split between server rejection and transport
//! failure. View-model state for the rendered roster lives in [`roster`].

use reqwest::Client;
use shared::{domain::Catalog, error::ErrorBody, protocol::SignupResponse};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod roster;


pub use reqwest::StatusCode;
pub use roster::{Roster, RosterCard};

/// Failure modes of a single API request, mirroring the error taxonomy the
/// UI surfaces: the server answered non-2xx (rejection, possibly with a
/// human-readable detail), the request never completed (transport), or a
/// 2xx body could not be decoded (malformed).
#[derive(Debug, Error)]
pub enum ApiRequestError {
    #[error("server rejected the request with status {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl ApiRequestError {
    /// Server-supplied detail text, when the rejection carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// The configured service URL cannot serve as a request base.
#[derive(Debug, Error)]
#[error("invalid service base URL '{url}': {reason}")]
pub struct InvalidBaseUrl {
    pub url: String,
    pub reason: String,
}

pub struct ActivitiesClient {
    http: Client,
    base_url: Url,
}

impl ActivitiesClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, InvalidBaseUrl> {
        let raw = base_url.as_ref();
        let parsed = Url::parse(raw).map_err(|err| InvalidBaseUrl {
            url: raw.to_string(),
            reason: err.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(InvalidBaseUrl {
                url: raw.to_string(),
                reason: "URL has no path to extend".to_string(),
            });
        }
        Ok(Self {
            http: Client::new(),
            base_url: parsed,
        })
    }

    /// `GET /activities`: the full catalog, in server order. Any shape the
    /// catalog decoder does not accept is a load failure.
    pub async fn fetch_catalog(&self) -> Result<Catalog, ApiRequestError> {
        let url = self.endpoint(&["activities"], None);
        debug!(%url, "fetching activity catalog");
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiRequestError::Malformed(err.to_string()))
    }

    /// `POST /activities/{name}/signup?email={email}`: register the email
    /// for the activity. Success carries the server's confirmation message.
    pub async fn signup(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<SignupResponse, ApiRequestError> {
        let url = self.endpoint(&["activities", activity, "signup"], Some(("email", email)));
        debug!(%activity, %email, "signing up participant");
        let response = self.http.post(url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiRequestError::Malformed(err.to_string()))
    }

    /// `DELETE /activities/{name}/unregister?email={email}`: drop the email
    /// from the activity's roster. Success is purely the 2xx status; the
    /// body is ignored.
    pub async fn unregister(&self, activity: &str, email: &str) -> Result<(), ApiRequestError> {
        let url = self.endpoint(
            &["activities", activity, "unregister"],
            Some(("email", email)),
        );
        debug!(%activity, %email, "unregistering participant");
        let response = self.http.delete(url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    /// Extends the base URL with percent-escaped path segments and an
    /// optional query pair. Never string concatenation: activity names and
    /// emails pass through `url`'s own escaping.
    fn endpoint(&self, segments: &[&str], query: Option<(&str, &str)>) -> Url {
        let mut url = self.base_url.clone();
        // The constructor refuses cannot-be-a-base URLs, so segment access
        // cannot fail here.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        url
    }
}

async fn rejection(response: reqwest::Response) -> ApiRequestError {
    let status = response.status();
    let body = response.bytes().await.unwrap_or_default();
    ApiRequestError::Rejected {
        status,
        detail: ErrorBody::from_bytes(&body).detail,
    }
}
