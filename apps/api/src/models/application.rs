//! Wire models for a job application and its document payload.
//!
//! Field names mirror the JSON contract the frontend already speaks
//! (camelCase, with the legacy `number` key for the phone field). Every field
//! is optional on the wire: absent strings decode to empty strings and absent
//! lists to empty lists, so the render pipeline never sees a null.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Ordered list of non-empty, trimmed strings.
///
/// Deserializes from either a JSON array of strings or a single
/// comma-separated string, normalizing both at the decoding boundary. Order
/// is preserved; duplicates are kept; blank elements are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StringList(pub Vec<String>);

impl StringList {
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for StringList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Items(Vec<String>),
            Delimited(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Items(items) => StringList(filter_and_trim(items)),
            Raw::Delimited(s) if s.trim().is_empty() => StringList::default(),
            Raw::Delimited(s) => {
                StringList(filter_and_trim(s.split(',').map(str::to_owned).collect()))
            }
        })
    }
}

fn filter_and_trim(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .collect()
}

/// The overall structure of the resume data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub name: String,
    #[serde(rename = "number")]
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
    pub objective: String,
    pub relevant_courses: StringList,
    pub jobs: Vec<Job>,
    pub projects: Vec<Project>,
    pub skill_categories: Vec<SkillCategory>,
}

/// A single job entry in the resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub job_title: String,
    pub job_start_date: String,
    pub job_end_date: String,
    pub job_employer: String,
    pub job_location: String,
    pub job_points: StringList,
}

/// A single project entry in the resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub project_title: String,
    pub project_tech: String,
    pub project_date: String,
    pub project_points: StringList,
}

/// A category of skills.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCategory {
    pub cat_title: String,
    pub cat_skills: StringList,
}

/// Cover-letter content. All fields are optional; composers apply the
/// documented fallbacks for blank values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverLetter {
    pub hiring_manager_name: String,
    pub company: String,
    pub location: String,
    /// Free-form address text kept for storage round-trips; the typeset
    /// address block is built from the three fields above plus the date.
    pub address: String,
    pub greeting: String,
    pub paragraphs: Vec<String>,
    pub closing: String,
}

/// A full job application, including resume data and the optional cover
/// letter. `job_title` and `company` are used only for output file naming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Application {
    pub id: Option<Uuid>,
    pub job_title: String,
    pub company: String,
    pub application_status: String,
    pub job_description: String,
    pub resume: ResumeData,
    pub cover_letter: Option<CoverLetter>,
}
