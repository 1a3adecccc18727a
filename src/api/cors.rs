//! CORS policy for the ingestion endpoint
//!
//! The tracking snippet runs on third-party customer sites, so `/track`
//! must be callable from any origin. Every tracking response carries the
//! same permissive header set; it lives here as one explicit value injected
//! at app wiring time instead of literals scattered through handlers.

use actix_web::HttpResponseBuilder;

#[derive(Clone, Debug)]
pub struct CorsPolicy {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
    pub max_age: u64,
}

impl CorsPolicy {
    /// The any-origin policy the tracking endpoint ships with
    pub fn permissive() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, PUT, DELETE, OPTIONS".to_string(),
            allow_headers: "Content-Type, Authorization".to_string(),
            max_age: 86400,
        }
    }

    /// Header name/value pairs in wire form
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            ("Access-Control-Allow-Origin", self.allow_origin.clone()),
            ("Access-Control-Allow-Methods", self.allow_methods.clone()),
            ("Access-Control-Allow-Headers", self.allow_headers.clone()),
            ("Access-Control-Max-Age", self.max_age.to_string()),
        ]
    }

    /// Attach the policy headers to a response being built
    pub fn apply(&self, builder: &mut HttpResponseBuilder) {
        for (name, value) in self.headers() {
            builder.insert_header((name, value));
        }
    }
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}
