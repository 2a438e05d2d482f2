//! Two-stage response decoding.
//!
//! The service wraps its payload XML as escaped text inside the SOAP
//! response, so decoding happens twice: [`decode_envelope`] parses the outer
//! envelope and extracts the result string (the outer parse resolves one
//! level of entity escaping), then [`decode_result`] parses that string as an
//! independent document into a domain payload. The stages fail with distinct
//! error variants; a well-formed envelope can still carry a malformed result.
//!
//! Uses quick-xml, which does not expand external entities.

use crate::error::Error;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::de::DeserializeOwned;

/// Element path of the result payload inside the response envelope,
/// matched by local name.
const RESULT_PATH: [&str; 4] = [
    "Envelope",
    "Body",
    "ProcessWebServiceRequestResponse",
    "ProcessWebServiceRequestResult",
];

/// Root element name the service uses to report request-level failures in
/// place of the expected payload.
const SERVICE_ERROR_ROOT: &str = "RT_ERROR";

/// A payload type decodable from the inner result string.
///
/// The decoder only needs each type's XML root element name; field-level
/// decoding is serde's business and unknown fields are ignored.
pub trait ResultPayload: DeserializeOwned {
    /// XML root element name this payload is parsed from.
    const ROOT_ELEMENT: &'static str;
}

/// Parse the outer SOAP envelope and extract the result string.
///
/// Walks to `Envelope > Body > ProcessWebServiceRequestResponse >
/// ProcessWebServiceRequestResult` and returns that element's text content.
/// The returned string is itself an XML document (the outer parse resolved
/// the wire-level escaping) and has not yet been validated.
pub fn decode_envelope(raw: &[u8]) -> Result<String, Error> {
    let xml = std::str::from_utf8(raw)
        .map_err(|e| Error::MalformedEnvelope(format!("response is not valid UTF-8: {e}")))?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut result: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(local_name(e));
                if result.is_none() && path == RESULT_PATH {
                    result = Some(String::new());
                }
            }
            Ok(Event::Empty(ref e)) => {
                // A self-closing result element carries an empty payload.
                path.push(local_name(e));
                if result.is_none() && path == RESULT_PATH {
                    result = Some(String::new());
                }
                path.pop();
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Text(ref e)) if path == RESULT_PATH => {
                let text = e.unescape().map_err(|err| {
                    Error::MalformedEnvelope(format!("invalid result text content: {err}"))
                })?;
                if let Some(out) = result.as_mut() {
                    out.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) if path == RESULT_PATH => {
                if let Some(out) = result.as_mut() {
                    out.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedEnvelope(format!("invalid envelope XML: {e}")));
            }
            Ok(_) => {}
        }
    }

    result.ok_or_else(|| {
        Error::MalformedEnvelope("missing ProcessWebServiceRequestResult element".to_string())
    })
}

/// Parse the inner result string into a domain payload.
///
/// This is the second, independent decode stage. The root element is checked
/// before field decoding so that service error reports and shape mismatches
/// produce descriptive errors instead of zero-value structs.
pub fn decode_result<T: ResultPayload>(result: &str) -> Result<T, Error> {
    let root = peek_root(result)?;

    if root.name == SERVICE_ERROR_ROOT {
        let detail = root
            .error_message
            .unwrap_or_else(|| "no ERROR_MESSAGE attribute".to_string());
        return Err(Error::MalformedResult(format!(
            "service reported an error: {detail}"
        )));
    }
    if root.name != T::ROOT_ELEMENT {
        return Err(Error::MalformedResult(format!(
            "expected <{}> root, found <{}>",
            T::ROOT_ELEMENT,
            root.name
        )));
    }

    quick_xml::de::from_str(result)
        .map_err(|e| Error::MalformedResult(format!("invalid {} payload: {e}", T::ROOT_ELEMENT)))
}

struct RootElement {
    name: String,
    error_message: Option<String>,
}

/// Locate the first element of the result string without decoding fields.
fn peek_root(result: &str) -> Result<RootElement, Error> {
    let mut reader = Reader::from_str(result);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name = local_name(e);
                let error_message = if name == SERVICE_ERROR_ROOT {
                    attribute(e, "ERROR_MESSAGE")
                } else {
                    None
                };
                return Ok(RootElement {
                    name,
                    error_message,
                });
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                return Err(Error::MalformedResult(format!(
                    "result payload is not XML: {:?}",
                    snippet(&text)
                )));
            }
            Ok(Event::Eof) => {
                return Err(Error::MalformedResult("empty result payload".to_string()));
            }
            Ok(_) => {}
            Err(e) => {
                return Err(Error::MalformedResult(format!("invalid result XML: {e}")));
            }
        }
    }
}

/// Extract the local name of an element.
fn local_name(e: &BytesStart) -> String {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref()).unwrap_or("").to_string()
}

/// Look up an attribute value by name.
fn attribute(e: &BytesStart, name: &str) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.as_ref() == name.as_bytes() {
            attr.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn snippet(s: &str) -> String {
    const MAX: usize = 60;
    if s.len() <= MAX {
        return s.to_string();
    }
    let mut end = MAX;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
