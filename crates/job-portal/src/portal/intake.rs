use chrono::NaiveDate;
use mime::Mime;
use serde::Serialize;

use super::catalog::CollegeDirectory;
use super::domain::{ApplicantProfile, Attachment, FormSubmission};
use super::eligibility::{age_on, average_percent};

pub const MINIMUM_APPLICANT_AGE: i32 = 18;

/// Which uploaded document a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentSlot {
    Photo,
    Certificate,
}

impl AttachmentSlot {
    pub const fn label(self) -> &'static str {
        match self {
            AttachmentSlot::Photo => "photo",
            AttachmentSlot::Certificate => "degree certificate",
        }
    }

    fn accepts(self, mime: &Mime) -> bool {
        let image = mime.type_() == mime::IMAGE
            && (mime.subtype() == mime::JPEG || mime.subtype() == mime::PNG);
        match self {
            AttachmentSlot::Photo => image,
            AttachmentSlot::Certificate => {
                image || mime.essence_str() == mime::APPLICATION_PDF.essence_str()
            }
        }
    }
}

/// Which score field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    Tenth,
    Twelfth,
}

impl ScoreField {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreField::Tenth => "10th percentage",
            ScoreField::Twelfth => "12th percentage",
        }
    }
}

/// A single problem found on the intake form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("Full Name is required")]
    MissingName,
    #[error("Date of Birth is required")]
    MissingDateOfBirth,
    #[error("applicants must be at least {} years old (age {age})", MINIMUM_APPLICANT_AGE)]
    Underage { age: i32 },
    #[error("Please select a State")]
    MissingState,
    #[error("Please select a College")]
    MissingCollege,
    #[error("{college} is not listed for {state}")]
    UnknownCollege { state: String, college: String },
    #[error("Please select a Degree")]
    MissingDegree,
    #[error("{} is required", .0.label())]
    MissingScore(ScoreField),
    #[error("{} must be greater than 0 and at most 100 (found {value})", .field.label())]
    ScoreOutOfRange { field: ScoreField, value: f64 },
    #[error("{} upload is required", .0.label())]
    MissingAttachment(AttachmentSlot),
    #[error("{} '{file_name}' is not an accepted file type", .slot.label())]
    UnsupportedAttachment {
        slot: AttachmentSlot,
        file_name: String,
    },
}

/// Every violation found on one submission, reported together.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("submission rejected with {} problem(s)", .violations.len())]
pub struct IntakeRejection {
    pub violations: Vec<IntakeViolation>,
}

impl IntakeRejection {
    pub fn messages(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|violation| violation.to_string())
            .collect()
    }
}

/// Turns raw form submissions into validated applicant profiles.
#[derive(Debug, Clone)]
pub struct IntakeGuard<'a> {
    directory: &'a CollegeDirectory,
}

impl<'a> IntakeGuard<'a> {
    pub fn new(directory: &'a CollegeDirectory) -> Self {
        Self { directory }
    }

    pub fn profile_from_submission(
        &self,
        submission: FormSubmission,
        today: NaiveDate,
    ) -> Result<ApplicantProfile, IntakeRejection> {
        let mut violations = Vec::new();

        let full_name = submission.full_name.trim().to_string();
        if full_name.is_empty() {
            violations.push(IntakeViolation::MissingName);
        }

        let birth = match submission.date_of_birth {
            Some(date_of_birth) => {
                let age = age_on(date_of_birth, today);
                if age < MINIMUM_APPLICANT_AGE {
                    violations.push(IntakeViolation::Underage { age });
                }
                Some((date_of_birth, age))
            }
            None => {
                violations.push(IntakeViolation::MissingDateOfBirth);
                None
            }
        };

        let state = non_blank(submission.state);
        let college = non_blank(submission.college);
        if state.is_none() {
            violations.push(IntakeViolation::MissingState);
        }
        if college.is_none() {
            violations.push(IntakeViolation::MissingCollege);
        }
        if let (Some(state), Some(college)) = (&state, &college) {
            if !self.directory.offers(state, college) {
                violations.push(IntakeViolation::UnknownCollege {
                    state: state.clone(),
                    college: college.clone(),
                });
            }
        }

        if submission.degree.is_none() {
            violations.push(IntakeViolation::MissingDegree);
        }

        let tenth = check_score(ScoreField::Tenth, submission.tenth_percent, &mut violations);
        let twelfth = check_score(
            ScoreField::Twelfth,
            submission.twelfth_percent,
            &mut violations,
        );

        let photo = check_attachment(AttachmentSlot::Photo, submission.photo, &mut violations);
        let certificate = check_attachment(
            AttachmentSlot::Certificate,
            submission.certificate,
            &mut violations,
        );

        if !violations.is_empty() {
            return Err(IntakeRejection { violations });
        }

        let (
            Some((date_of_birth, age)),
            Some(state),
            Some(college),
            Some(degree),
            Some(tenth_percent),
            Some(twelfth_percent),
            Some(photo),
            Some(certificate),
        ) = (
            birth,
            state,
            college,
            submission.degree,
            tenth,
            twelfth,
            photo,
            certificate,
        )
        else {
            return Err(IntakeRejection { violations });
        };

        Ok(ApplicantProfile {
            full_name,
            date_of_birth,
            state,
            college,
            degree,
            tenth_percent,
            twelfth_percent,
            age,
            average_percent: average_percent(tenth_percent, twelfth_percent),
            photo,
            certificate,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn check_score(
    field: ScoreField,
    value: Option<f64>,
    violations: &mut Vec<IntakeViolation>,
) -> Option<f64> {
    match value {
        None => {
            violations.push(IntakeViolation::MissingScore(field));
            None
        }
        Some(value) if !(value > 0.0 && value <= 100.0) => {
            violations.push(IntakeViolation::ScoreOutOfRange { field, value });
            None
        }
        Some(value) => Some(value),
    }
}

fn check_attachment(
    slot: AttachmentSlot,
    attachment: Option<Attachment>,
    violations: &mut Vec<IntakeViolation>,
) -> Option<Attachment> {
    let attachment = match attachment.filter(|file| !file.file_name.trim().is_empty()) {
        Some(attachment) => attachment,
        None => {
            violations.push(IntakeViolation::MissingAttachment(slot));
            return None;
        }
    };

    let declared = attachment
        .content_type
        .as_deref()
        .and_then(|raw| raw.parse::<Mime>().ok());
    let mime = declared.or_else(|| mime_guess::from_path(&attachment.file_name).first());

    match mime {
        Some(mime) if slot.accepts(&mime) => Some(attachment),
        _ => {
            violations.push(IntakeViolation::UnsupportedAttachment {
                slot,
                file_name: attachment.file_name,
            });
            None
        }
    }
}
