//! SOAP request envelope rendering.
//!
//! The PXP service accepts one fixed envelope shape; operations differ only
//! in the `skipLoginLog` flag, the `methodName`, and the `paramStr` payload.
//! All substituted credential values must already be escaped (see
//! [`crate::escape`]); the renderer performs positional substitution only.
//!
//! The `paramStr` content is itself an XML parameter document that the
//! service unescapes and re-parses on its side. Its escaped wire form is
//! derived here by escaping a well-formed `<Parms>` document once, so no
//! pre-escaped literal needs to be maintained by hand.

use crate::error::Error;
use crate::escape;

/// Selects which grading period a gradebook request is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradingPeriod {
    /// The service's current/default grading period.
    #[default]
    Current,
    /// A concrete zero-based reporting-period index.
    Index(u32),
}

/// Descriptor for the two supported service operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Authenticate and list the account's students (`ChildList`).
    SignIn,
    /// Fetch the gradebook (`Gradebook`), optionally scoped to a period.
    GetGrades {
        /// Grading-period selection for the request.
        period: GradingPeriod,
    },
}

impl Operation {
    fn method_name(&self) -> &'static str {
        match self {
            Self::SignIn => "ChildList",
            Self::GetGrades { .. } => "Gradebook",
        }
    }

    fn skip_login_log(&self) -> u8 {
        match self {
            Self::SignIn => 0,
            Self::GetGrades { .. } => 1,
        }
    }

    /// Build the full `<paramStr>` element for this operation.
    ///
    /// The gradebook parameter document always pins `ChildIntID` to 0 (the
    /// single-child-context assumption of the service contract).
    fn param_str(&self) -> Result<String, Error> {
        match self {
            Self::SignIn => Ok("<paramStr/>".to_string()),
            Self::GetGrades { period } => {
                let parms = match period {
                    GradingPeriod::Current => {
                        "<Parms><ChildIntID>0</ChildIntID></Parms>".to_string()
                    }
                    GradingPeriod::Index(index) => format!(
                        "<Parms><ChildIntID>0</ChildIntID><ReportPeriod>{index}</ReportPeriod></Parms>"
                    ),
                };
                let escaped = escape::escape_text(&parms)?;
                Ok(format!("<paramStr>{escaped}</paramStr>"))
            }
        }
    }

    /// Render the complete request envelope for this operation.
    ///
    /// Escapes the credentials as an atomic batch first; if either fails, no
    /// partial envelope is rendered.
    pub fn render(&self, username: &str, password: &str) -> Result<String, Error> {
        let creds = escape::escape_all(&[username, password])?;
        Ok(render_envelope(
            &creds[0],
            &creds[1],
            self.skip_login_log(),
            self.method_name(),
            &self.param_str()?,
        ))
    }
}

/// Positional substitution into the fixed envelope template.
///
/// Every argument must already be XML-safe.
fn render_envelope(
    user_id: &str,
    password: &str,
    skip_login_log: u8,
    method_name: &str,
    param_str: &str,
) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ProcessWebServiceRequest xmlns="http://edupoint.com/webservices/">
      <userID>{user_id}</userID>
      <password>{password}</password>
      <skipLoginLog>{skip_login_log}</skipLoginLog>
      <parent>0</parent>
      <webServiceHandleName>PXPWebServices</webServiceHandleName>
      <methodName>{method_name}</methodName>
      {param_str}
    </ProcessWebServiceRequest>
  </soap:Body>
</soap:Envelope>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_envelope_golden() {
        let body = Operation::SignIn.render("jdoe", "s3cret").unwrap();
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ProcessWebServiceRequest xmlns="http://edupoint.com/webservices/">
      <userID>jdoe</userID>
      <password>s3cret</password>
      <skipLoginLog>0</skipLoginLog>
      <parent>0</parent>
      <webServiceHandleName>PXPWebServices</webServiceHandleName>
      <methodName>ChildList</methodName>
      <paramStr/>
    </ProcessWebServiceRequest>
  </soap:Body>
</soap:Envelope>"#;
        assert_eq!(body, expected);
    }

    #[test]
    fn test_grades_current_period_omits_report_period() {
        let body = Operation::GetGrades {
            period: GradingPeriod::Current,
        }
        .render("jdoe", "s3cret")
        .unwrap();

        assert!(body.contains("<methodName>Gradebook</methodName>"));
        assert!(body.contains("<skipLoginLog>1</skipLoginLog>"));
        assert!(body.contains(
            "<paramStr>&lt;Parms&gt;&lt;ChildIntID&gt;0&lt;/ChildIntID&gt;&lt;/Parms&gt;</paramStr>"
        ));
        assert!(!body.contains("ReportPeriod"));
    }

    #[test]
    fn test_grades_concrete_period_embeds_escaped_fragment() {
        let body = Operation::GetGrades {
            period: GradingPeriod::Index(3),
        }
        .render("jdoe", "s3cret")
        .unwrap();

        assert!(body.contains("&lt;ReportPeriod&gt;3&lt;/ReportPeriod&gt;"));
        assert!(body.contains(
            "<paramStr>&lt;Parms&gt;&lt;ChildIntID&gt;0&lt;/ChildIntID&gt;&lt;ReportPeriod&gt;3&lt;/ReportPeriod&gt;&lt;/Parms&gt;</paramStr>"
        ));
    }

    #[test]
    fn test_credentials_are_escaped() {
        let body = Operation::SignIn.render("a&b", "p<w>d\"q").unwrap();
        assert!(body.contains("<userID>a&amp;b</userID>"));
        assert!(body.contains("<password>p&lt;w&gt;d&quot;q</password>"));
        // The raw values never appear in the rendered envelope.
        assert!(!body.contains("<userID>a&b</userID>"));
    }

    #[test]
    fn test_unescapable_credential_renders_nothing() {
        let err = Operation::SignIn.render("jdoe", "bad\u{1}pass").unwrap_err();
        assert!(matches!(err, Error::Escaping(_)));
    }

    #[test]
    fn test_default_grading_period_is_current() {
        assert_eq!(GradingPeriod::default(), GradingPeriod::Current);
    }
}
