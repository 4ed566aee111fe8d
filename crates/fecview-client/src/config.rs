/// Where the view service lives and who is asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL of the view service, e.g. `http://localhost:8080`.
    pub service_url: String,
    /// Caller/session identifier stamped on every request.
    pub uid: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:8080".to_string(),
            uid: "test007".to_string(),
        }
    }
}
