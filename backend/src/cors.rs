use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};
use rocket::http::Header;
use shared::VOTER_ID_HEADER;

/// Echoes CORS headers for requests whose `Origin` starts with the allowed prefix.
pub struct Cors {
    allowed_origin: String,
}

impl Cors {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self { allowed_origin: allowed_origin.into() }
    }

    pub fn allows(&self, origin: &str) -> bool {
        !self.allowed_origin.is_empty() && origin.starts_with(&self.allowed_origin)
    }
}

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let Some(origin) = req.headers().get_one("Origin") else { return };

        if self.allows(origin) {
            res.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
            res.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
            res.set_header(Header::new("Access-Control-Allow-Headers", format!("Content-Type, {VOTER_ID_HEADER}")));
            res.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
            res.set_header(Header::new("Access-Control-Max-Age", "86400"));
        }
    }
}
