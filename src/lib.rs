//! StudentVUE SOAP client.
//!
//! Talks to an Edupoint StudentVUE ("PXP") district endpoint: authenticates
//! a user and retrieves gradebook data. The service speaks SOAP 1.1 with a
//! twist — the response payload is itself XML, escaped once more and carried
//! as text inside the envelope — so every response is decoded in two
//! independent stages.
//!
//! # Pipeline
//!
//! escape credentials → render envelope → HTTP POST → decode envelope →
//! decode inner result → domain struct.
//!
//! # Example
//!
//! ```ignore
//! use svue_client::Client;
//!
//! let client = Client::new("https://district.example/Service/PXPCommunication.asmx")?;
//! let roster = client.sign_in("student", "hunter2")?;
//! for student in &roster {
//!     println!("{}", student.name);
//! }
//! let gradebook = client.gradebook_for_period("student", "hunter2", 3)?;
//! ```
//!
//! Calls are fully synchronous and independent; the client holds no session
//! state and may be shared across threads.

pub mod client;
pub mod error;
pub mod escape;
pub mod model;
pub mod parser;
pub mod request;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use error::Error;
pub use model::{ChildList, Course, Courses, Gradebook, Mark, Marks, ReportingPeriod, Student};
pub use request::{GradingPeriod, Operation};
