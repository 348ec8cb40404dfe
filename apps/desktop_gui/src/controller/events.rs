//! UI/backend events and failure-to-text mapping for the desktop controller.

use client_core::ApiRequestError;
use shared::domain::Catalog;

/// Events flowing from the backend worker into the UI loop. Mutation
/// events arrive only after the server confirmed the outcome; the UI
/// patches its roster model in response and never speculatively.
pub enum UiEvent {
    CatalogLoaded(Catalog),
    CatalogLoadFailed,
    SignupConfirmed {
        activity: String,
        email: String,
        message: String,
    },
    SignupFailed {
        message: String,
    },
    UnregisterConfirmed {
        activity: String,
        email: String,
    },
    UnregisterFailed {
        message: String,
    },
}

const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
const SIGNUP_TRANSPORT_FALLBACK: &str = "Failed to sign up. Please try again.";
const UNREGISTER_FALLBACK: &str = "Failed to unregister participant.";

/// Banner text for a failed signup: the server's detail when it rejected
/// the request with one, a fixed fallback for a detail-less rejection,
/// and a generic retry prompt when the request never completed.
pub fn signup_failure_text(err: &ApiRequestError) -> String {
    match err {
        ApiRequestError::Rejected { detail, .. } => detail
            .clone()
            .unwrap_or_else(|| SIGNUP_REJECTED_FALLBACK.to_string()),
        _ => SIGNUP_TRANSPORT_FALLBACK.to_string(),
    }
}

/// Banner text for a failed unregister: server detail when present,
/// otherwise one fixed fallback for every failure mode.
pub fn unregister_failure_text(err: &ApiRequestError) -> String {
    match err {
        ApiRequestError::Rejected {
            detail: Some(detail),
            ..
        } => detail.clone(),
        _ => UNREGISTER_FALLBACK.to_string(),
    }
}
