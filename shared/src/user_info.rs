use serde::{Serialize, Deserialize};

/// Header carrying the authenticated voter id, set by the identity provider.
pub const VOTER_ID_HEADER: &str = "X-Voter-Id";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub voter_id: Option<String>,
    pub client_fingerprint: String,
}

impl UserInfo {
    pub fn voter_id(&self) -> Option<&str> {
        self.voter_id.as_deref()
    }
}

pub fn generate_client_fingerprint(ip: &str, user_agent: Option<&str>) -> String {
    use base64::engine::general_purpose::URL_SAFE;
    use base64::Engine;
    use sha2::{Sha256, Digest};

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    if let Some(ua) = user_agent {
        hasher.update(ua.as_bytes());
    }
    URL_SAFE.encode(hasher.finalize())
}

#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::{FromRequest, Outcome};
    use rocket::Request;

    #[rocket::async_trait]
    impl<'r> FromRequest<'r> for UserInfo {
        type Error = ();

        async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
            let headers = req.headers();
            let ip = headers.get_one("X-Real-IP")
                .or_else(|| headers.get_one("X-Forwarded-For"))
                .map(str::to_string)
                .or_else(|| req.client_ip().map(|ip| ip.to_string()))
                .unwrap_or_else(|| "0.0.0.0".to_string());

            let voter_id = headers.get_one(VOTER_ID_HEADER)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string);

            Outcome::Success(UserInfo {
                voter_id,
                client_fingerprint: generate_client_fingerprint(&ip, headers.get_one("User-Agent")),
            })
        }
    }
}
