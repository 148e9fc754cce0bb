//! The fetch capability used by the scrapers and the geocoder.

use crate::config::FinderConfig;
use crate::error::TheaterError;

/// Fetches a URL and returns the response body as text.
///
/// Like a browser `fetch`, an HTTP error status is not a failure: the body of
/// the response is returned as-is. Only transport problems produce an error.
pub trait HttpClient {
    fn get_text(&self, url: &str) -> Result<String, TheaterError>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get_text(&self, url: &str) -> Result<String, TheaterError> {
        (**self).get_text(url)
    }
}

/// Blocking client backed by a shared `ureq::Agent`.
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(config: &FinderConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self { agent: builder.build() }
    }
}

impl HttpClient for UreqClient {
    fn get_text(&self, url: &str) -> Result<String, TheaterError> {
        let response = match self.agent.get(url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!(url, status = code, "Non-success status, using body anyway");
                response
            }
            Err(e) => {
                return Err(TheaterError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
        };

        response.into_string().map_err(|e| TheaterError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
