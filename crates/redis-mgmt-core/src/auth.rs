//! Request authentication
//!
//! Maps resolved credentials onto the wire scheme each surface expects: the
//! Cloud API reads its key pair from a custom header pair, the Enterprise
//! cluster API uses HTTP basic auth. The dispatch is an exhaustive match, so
//! a new credential kind cannot compile without a scheme.

use base64::Engine;
use base64::engine::general_purpose;
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

use crate::credentials::Credentials;

/// Header carrying the Cloud account key.
pub const CLOUD_API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the Cloud secret key.
pub const CLOUD_API_SECRET_HEADER: &str = "x-api-secret-key";

/// Apply the authentication scheme for `credentials` to an outgoing request.
pub fn apply(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    match credentials {
        Credentials::Cloud {
            api_key,
            api_secret,
        } => request
            .header(CLOUD_API_KEY_HEADER, api_key)
            .header(CLOUD_API_SECRET_HEADER, api_secret),
        Credentials::Enterprise { username, password } => {
            let encoded = general_purpose::STANDARD.encode(format!("{username}:{password}"));
            request.header(AUTHORIZATION, format!("Basic {encoded}"))
        }
    }
}
