use serde::{Deserialize, Serialize};

/// Body of a successful `POST /activities/{name}/signup` response. The
/// message text is shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub message: String,
}
