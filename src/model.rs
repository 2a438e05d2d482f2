//! Domain payloads decoded from the inner result string.
//!
//! Field coverage is intentionally small; the service sends many more
//! attributes than callers of this crate need, and unknown fields are
//! ignored during decoding.

use crate::parser::ResultPayload;
use serde::Deserialize;

/// Roster returned by the sign-in operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChildList {
    /// Students visible to the authenticated account, in service order.
    #[serde(rename = "Child", default)]
    pub children: Vec<Student>,
}

/// One student on the account roster.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Student {
    #[serde(rename = "@Name", default)]
    pub name: String,
    #[serde(rename = "ChildIntID", default)]
    pub child_int_id: i32,
    #[serde(rename = "OrganizationName")]
    pub organization_name: Option<String>,
}

/// Gradebook for one student, possibly scoped to a grading period.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gradebook {
    /// Grading scheme reported by the service (e.g. "Traditional").
    #[serde(rename = "@Type")]
    pub grading_type: Option<String>,
    /// The period this gradebook is scoped to, when the service reports one.
    #[serde(rename = "ReportingPeriod")]
    pub reporting_period: Option<ReportingPeriod>,
    #[serde(rename = "Courses", default)]
    pub courses: Courses,
}

/// Grading-period metadata attached to a gradebook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportingPeriod {
    #[serde(rename = "@GradePeriod", default)]
    pub grade_period: String,
    #[serde(rename = "@StartDate")]
    pub start_date: Option<String>,
    #[serde(rename = "@EndDate")]
    pub end_date: Option<String>,
}

/// Container element for the course list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Courses {
    #[serde(rename = "Course", default)]
    pub courses: Vec<Course>,
}

/// One course row in the gradebook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    #[serde(rename = "@Period")]
    pub period: Option<String>,
    #[serde(rename = "@Title", default)]
    pub title: String,
    #[serde(rename = "@Room")]
    pub room: Option<String>,
    #[serde(rename = "@Staff")]
    pub staff: Option<String>,
    #[serde(rename = "@StaffEMail")]
    pub staff_email: Option<String>,
    #[serde(rename = "Marks", default)]
    pub marks: Marks,
}

/// Container element for the mark list.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Marks {
    #[serde(rename = "Mark", default)]
    pub marks: Vec<Mark>,
}

/// One mark (grade) for a course.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mark {
    #[serde(rename = "@MarkName", default)]
    pub name: String,
    #[serde(rename = "@CalculatedScoreString")]
    pub score: Option<String>,
    #[serde(rename = "@CalculatedScoreRaw")]
    pub raw_score: Option<String>,
}

impl ResultPayload for ChildList {
    const ROOT_ELEMENT: &'static str = "ChildList";
}

impl ResultPayload for Gradebook {
    const ROOT_ELEMENT: &'static str = "Gradebook";
}
