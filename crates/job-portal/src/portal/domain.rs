use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Degrees offered on the intake form.
///
/// `Any` is selectable by applicants like every other value; only a posting
/// listing `Any` acts as a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Degree {
    BTech,
    BE,
    BSc,
    BCA,
    BCom,
    BBA,
    BA,
    MBA,
    MCA,
    Diploma,
    Any,
}

impl Degree {
    /// Form order, matching the degree dropdown.
    pub const ALL: [Degree; 11] = [
        Degree::BTech,
        Degree::BE,
        Degree::BSc,
        Degree::BCA,
        Degree::BCom,
        Degree::BBA,
        Degree::BA,
        Degree::MBA,
        Degree::MCA,
        Degree::Diploma,
        Degree::Any,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Degree::BTech => "BTech",
            Degree::BE => "BE",
            Degree::BSc => "BSc",
            Degree::BCA => "BCA",
            Degree::BCom => "BCom",
            Degree::BBA => "BBA",
            Degree::BA => "BA",
            Degree::MBA => "MBA",
            Degree::MCA => "MCA",
            Degree::Diploma => "Diploma",
            Degree::Any => "Any",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown degree '{0}'")]
pub struct UnknownDegree(pub String);

impl FromStr for Degree {
    type Err = UnknownDegree;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Degree::ALL
            .into_iter()
            .find(|degree| degree.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDegree(trimmed.to_string()))
    }
}

/// Job or exam opening with fixed degree, score, and age constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub employer: String,
    pub role: String,
    pub eligible_degrees: Vec<Degree>,
    pub min_average_percent: f64,
    pub min_age: u32,
    pub max_age: u32,
}

impl JobPosting {
    pub fn new(
        employer: impl Into<String>,
        role: impl Into<String>,
        eligible_degrees: &[Degree],
        min_average_percent: f64,
        min_age: u32,
        max_age: u32,
    ) -> Self {
        Self {
            employer: employer.into(),
            role: role.into(),
            eligible_degrees: eligible_degrees.to_vec(),
            min_average_percent,
            min_age,
            max_age,
        }
    }

    pub fn accepts_any_degree(&self) -> bool {
        self.eligible_degrees.contains(&Degree::Any)
    }

    pub fn age_limit(&self) -> String {
        format!("{}-{}", self.min_age, self.max_age)
    }
}

/// Metadata for an uploaded file; only its presence and declared type matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl Attachment {
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
        }
    }
}

/// Raw intake form as submitted. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default, deserialize_with = "deserialize_degree_choice")]
    pub degree: Option<Degree>,
    #[serde(default)]
    pub tenth_percent: Option<f64>,
    #[serde(default)]
    pub twelfth_percent: Option<f64>,
    #[serde(default)]
    pub photo: Option<Attachment>,
    #[serde(default)]
    pub certificate: Option<Attachment>,
}

/// Dropdown text shown before a degree is chosen.
pub const DEGREE_PLACEHOLDER: &str = "Select";

/// Blank or placeholder selections read as "not chosen" so intake can report them.
fn deserialize_degree_choice<'de, D>(deserializer: D) -> Result<Option<Degree>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(DEGREE_PLACEHOLDER) => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Validated applicant with derived age and average score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub state: String,
    pub college: String,
    pub degree: Degree,
    pub tenth_percent: f64,
    pub twelfth_percent: f64,
    pub age: i32,
    pub average_percent: f64,
    pub photo: Attachment,
    pub certificate: Attachment,
}

/// One row of the eligibility table shown on the result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibleJob {
    pub employer: String,
    pub role: String,
    pub min_average_percent: f64,
    pub age_limit: String,
}

impl From<&JobPosting> for EligibleJob {
    fn from(posting: &JobPosting) -> Self {
        Self {
            employer: posting.employer.clone(),
            role: posting.role.clone(),
            min_average_percent: posting.min_average_percent,
            age_limit: posting.age_limit(),
        }
    }
}
