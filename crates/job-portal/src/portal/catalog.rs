use serde::Serialize;

use super::domain::{Degree, JobPosting};

/// Read-only table of postings, loaded once and shared across sessions.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    postings: Vec<JobPosting>,
}

impl JobCatalog {
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    pub fn standard() -> Self {
        Self::new(standard_postings())
    }

    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

fn standard_postings() -> Vec<JobPosting> {
    use Degree::{Any, Diploma, BA, BBA, BCA, BCom, BE, BSc, BTech, MBA, MCA};

    vec![
        // Engineering / IT
        JobPosting::new("Infosys", "Software Trainee", &[BTech, BE], 60.0, 18, 28),
        JobPosting::new("TCS", "Assistant System Engineer", &[BTech, BE], 60.0, 18, 28),
        JobPosting::new("Wipro", "Project Engineer", &[BTech, BE], 60.0, 18, 27),
        JobPosting::new("Accenture", "Associate Software Engineer", &[BTech, BE], 65.0, 21, 28),
        JobPosting::new("ISRO", "Scientist/Engineer", &[BTech, BE], 65.0, 21, 28),
        // Data / analytics
        JobPosting::new("TCS", "Data Analyst Intern", &[BSc, BTech], 65.0, 21, 26),
        JobPosting::new("Infosys", "Data Science Trainee", &[BSc, BTech], 70.0, 21, 28),
        // BCA / MCA
        JobPosting::new("Infosys", "Junior Developer", &[BCA, MCA], 60.0, 18, 28),
        JobPosting::new("Wipro", "System Support Engineer", &[BCA, MCA], 55.0, 18, 27),
        // BSc
        JobPosting::new("Cognizant", "Operations Executive", &[BSc], 55.0, 18, 25),
        JobPosting::new("Infosys", "BSc IT Trainee", &[BSc], 60.0, 18, 26),
        // BCom
        JobPosting::new("Deloitte", "Audit Executive", &[BCom], 60.0, 21, 30),
        JobPosting::new("KPMG", "Accounts Associate", &[BCom], 58.0, 21, 30),
        // BBA / MBA
        JobPosting::new("HDFC Bank", "Relationship Officer", &[BBA, MBA], 55.0, 21, 30),
        JobPosting::new("ICICI Bank", "Management Trainee", &[MBA], 60.0, 21, 30),
        // BA
        JobPosting::new("Digital Marketing Firm", "Content Analyst", &[BA], 55.0, 18, 28),
        JobPosting::new("Media House", "Junior Editor", &[BA], 55.0, 21, 30),
        // Diploma
        JobPosting::new("L&T", "Junior Technician", &[Diploma], 55.0, 18, 30),
        JobPosting::new("TVS Motors", "Service Technician", &[Diploma], 55.0, 18, 28),
        // Government / any degree
        JobPosting::new("Banking Exam", "Clerk", &[Any], 55.0, 20, 30),
        JobPosting::new("Banking Exam", "Probationary Officer", &[Any], 60.0, 21, 30),
        JobPosting::new("SSC", "CGL Officer", &[Any], 55.0, 18, 32),
        JobPosting::new("RRB", "NTPC Graduate", &[Any], 55.0, 18, 33),
    ]
}

/// Colleges offered for one state, in dropdown order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateColleges {
    pub state: String,
    pub colleges: Vec<String>,
}

/// Fixed state → colleges hierarchy backing the form's dependent dropdowns.
#[derive(Debug, Clone, Default)]
pub struct CollegeDirectory {
    states: Vec<StateColleges>,
}

impl CollegeDirectory {
    pub fn new(states: Vec<StateColleges>) -> Self {
        Self { states }
    }

    pub fn standard() -> Self {
        let entry = |state: &str, colleges: &[&str]| StateColleges {
            state: state.to_string(),
            colleges: colleges.iter().map(|name| name.to_string()).collect(),
        };

        Self::new(vec![
            entry(
                "Tamil Nadu",
                &[
                    "Anna University",
                    "IIT Madras",
                    "NIT Trichy",
                    "VIT Vellore",
                    "SRM IST",
                    "PSG College of Technology",
                    "SSN College of Engineering",
                    "Thiagarajar College of Engineering",
                    "SASTRA University",
                    "Amrita Vishwa Vidyapeetham",
                ],
            ),
            entry(
                "Karnataka",
                &[
                    "IISc Bangalore",
                    "NIT Surathkal",
                    "RV College of Engineering",
                    "BMS College of Engineering",
                    "MS Ramaiah Institute of Technology",
                    "PES University",
                    "Christ University",
                    "Jain University",
                ],
            ),
            entry(
                "Kerala",
                &[
                    "IIT Palakkad",
                    "NIT Calicut",
                    "CUSAT",
                    "College of Engineering Trivandrum",
                    "Government Engineering College Thrissur",
                    "TKM College of Engineering",
                    "MEC Kochi",
                ],
            ),
        ])
    }

    pub fn states(&self) -> &[StateColleges] {
        &self.states
    }

    pub fn colleges_in(&self, state: &str) -> Option<&[String]> {
        self.states
            .iter()
            .find(|entry| entry.state == state)
            .map(|entry| entry.colleges.as_slice())
    }

    pub fn offers(&self, state: &str, college: &str) -> bool {
        self.colleges_in(state)
            .map(|colleges| colleges.iter().any(|name| name == college))
            .unwrap_or(false)
    }
}
