//! HTTP transport for SOAP requests.
//!
//! One blocking POST per call with the two fixed headers the service
//! requires; the whole response body is read into memory (gradebook-sized
//! payloads, no streaming needed).

use crate::error::Error;
use reqwest::blocking;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

/// SOAPAction URI for every request against the service.
pub const SOAP_ACTION: &str = "http://edupoint.com/webservices/ProcessWebServiceRequest";

/// Header name carrying [`SOAP_ACTION`].
const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Content type for SOAP 1.1 requests.
const SOAP_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// POST a rendered envelope to the endpoint and read the full response body.
///
/// Network-level failures map to [`Error::Transport`]; a non-success status
/// fails as [`Error::HttpStatus`] before any decoding is attempted.
pub fn send(http: &blocking::Client, endpoint: &str, body: String) -> Result<Vec<u8>, Error> {
    debug!(endpoint, request_bytes = body.len(), "issuing SOAP request");

    let response = http
        .post(endpoint)
        .header(CONTENT_TYPE, SOAP_CONTENT_TYPE)
        .header(SOAP_ACTION_HEADER, SOAP_ACTION)
        .body(body)
        .send()?;

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "service answered with non-success status");
        return Err(Error::HttpStatus(status.as_u16()));
    }

    let payload = response.bytes()?;
    debug!(response_bytes = payload.len(), "response body read");
    Ok(payload.to_vec())
}
