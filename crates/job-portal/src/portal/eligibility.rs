use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::catalog::JobCatalog;
use super::domain::{ApplicantProfile, Degree, EligibleJob, JobPosting};

/// The three applicant attributes a posting is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    pub degree: Degree,
    pub average_percent: f64,
    pub age: i32,
}

impl EligibilityCriteria {
    pub fn qualifies_for(&self, posting: &JobPosting) -> bool {
        let degree_ok =
            posting.eligible_degrees.contains(&self.degree) || posting.accepts_any_degree();
        let score_ok = self.average_percent >= posting.min_average_percent;
        let age_ok = i64::from(posting.min_age) <= i64::from(self.age)
            && i64::from(self.age) <= i64::from(posting.max_age);

        degree_ok && score_ok && age_ok
    }
}

impl From<&ApplicantProfile> for EligibilityCriteria {
    fn from(profile: &ApplicantProfile) -> Self {
        Self {
            degree: profile.degree,
            average_percent: profile.average_percent,
            age: profile.age,
        }
    }
}

/// Filter `postings` down to the ones `criteria` qualifies for, in catalog order.
pub fn match_postings(criteria: &EligibilityCriteria, postings: &[JobPosting]) -> Vec<EligibleJob> {
    postings
        .iter()
        .filter(|posting| criteria.qualifies_for(posting))
        .map(EligibleJob::from)
        .collect()
}

pub fn eligible_jobs(profile: &ApplicantProfile, catalog: &JobCatalog) -> Vec<EligibleJob> {
    match_postings(&EligibilityCriteria::from(profile), catalog.postings())
}

/// Whole years between `date_of_birth` and `today`, by calendar day.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years - 1
    } else {
        years
    }
}

pub fn average_percent(tenth_percent: f64, twelfth_percent: f64) -> f64 {
    (tenth_percent + twelfth_percent) / 2.0
}
