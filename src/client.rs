//! Public operations against the StudentVUE service.
//!
//! [`Client`] holds only the endpoint URL and a shared HTTP client; it never
//! stores credentials or any per-call state, so one instance can serve many
//! threads. Every operation is one independent authenticated round trip:
//! escape credentials, render the envelope, POST, decode the envelope,
//! decode the inner result.

use std::time::Duration;

use crate::error::Error;
use crate::model::{ChildList, Gradebook, Student};
use crate::parser;
use crate::request::{GradingPeriod, Operation};
use crate::transport;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for [`Client`].
#[derive(Debug)]
pub struct ClientBuilder {
    endpoint: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Overall deadline for each HTTP round trip (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client, constructing the underlying HTTP client.
    pub fn build(self) -> Result<Client, Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        Ok(Client {
            endpoint: self.endpoint,
            http,
        })
    }
}

/// StudentVUE SOAP client for one district endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Create a client for the given district endpoint with defaults.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, Error> {
        Self::builder(endpoint).build()
    }

    /// Start building a client for the given district endpoint.
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The endpoint URL this client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Authenticate and return the account's student roster.
    ///
    /// An empty roster is not an error at this layer: the service reports
    /// bad credentials in-band, and an account may simply have no students
    /// attached. Callers get `Ok(vec![])` and can decide for themselves.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<Vec<Student>, Error> {
        let body = Operation::SignIn.render(username, password)?;
        let raw = transport::send(&self.http, &self.endpoint, body)?;
        let result = parser::decode_envelope(&raw)?;
        let roster: ChildList = parser::decode_result(&result)?;

        if roster.children.is_empty() {
            warn!("sign-in returned an empty roster; credentials may be invalid");
        } else {
            debug!(students = roster.children.len(), "sign-in roster decoded");
        }
        Ok(roster.children)
    }

    /// Fetch the gradebook for the current grading period.
    pub fn gradebook(&self, username: &str, password: &str) -> Result<Gradebook, Error> {
        self.fetch_gradebook(username, password, GradingPeriod::Current)
    }

    /// Fetch the gradebook for a concrete reporting-period index.
    pub fn gradebook_for_period(
        &self,
        username: &str,
        password: &str,
        period_index: u32,
    ) -> Result<Gradebook, Error> {
        self.fetch_gradebook(username, password, GradingPeriod::Index(period_index))
    }

    fn fetch_gradebook(
        &self,
        username: &str,
        password: &str,
        period: GradingPeriod,
    ) -> Result<Gradebook, Error> {
        let body = Operation::GetGrades { period }.render(username, password)?;
        let raw = transport::send(&self.http, &self.endpoint, body)?;
        let result = parser::decode_envelope(&raw)?;
        let gradebook: Gradebook = parser::decode_result(&result)?;

        debug!(
            courses = gradebook.courses.courses.len(),
            ?period,
            "gradebook decoded"
        );
        Ok(gradebook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = Client::new("https://district.example/Service/PXPCommunication.asmx").unwrap();
        assert_eq!(
            client.endpoint(),
            "https://district.example/Service/PXPCommunication.asmx"
        );
    }

    #[test]
    fn test_builder_custom_timeout() {
        let client = Client::builder("https://district.example/soap")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "https://district.example/soap");
    }

    #[test]
    fn test_bad_credentials_fail_before_any_network_io() {
        // The endpoint is unroutable, but escaping fails first.
        let client = Client::new("http://0.0.0.0:0/never-used").unwrap();
        let err = client.sign_in("user", "bad\u{0}pass").unwrap_err();
        assert!(matches!(err, Error::Escaping(_)));
    }
}
