use crate::infra::{parse_date, InMemorySessionStore};
use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use job_portal::error::AppError;
use job_portal::portal::{
    eligible_jobs, Attachment, CollegeDirectory, CsvInterviewSource, Degree, EligibleJob,
    FixedClock, FormSubmission, FormView, IntakeGuard, InterviewBoard, InterviewListing,
    InterviewSource, JobCatalog, PortalService, PortalServiceError, PortalView, ResultView,
    StaticInterviewSource, TransitionError, NO_MATCH_NOTICE,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Applicant full name
    #[arg(long)]
    pub(crate) name: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date_of_birth: NaiveDate,
    /// State the college is located in
    #[arg(long)]
    pub(crate) state: String,
    /// College name as listed for the state
    #[arg(long)]
    pub(crate) college: String,
    /// Degree (BTech, BE, BSc, BCA, BCom, BBA, BA, MBA, MCA, Diploma, Any)
    #[arg(long)]
    pub(crate) degree: Degree,
    /// 10th percentage
    #[arg(long)]
    pub(crate) tenth: f64,
    /// 12th percentage
    #[arg(long)]
    pub(crate) twelfth: f64,
    /// Photo file name
    #[arg(long, default_value = "photo.jpg")]
    pub(crate) photo: String,
    /// Degree certificate file name
    #[arg(long, default_value = "certificate.pdf")]
    pub(crate) certificate: String,
    /// Evaluation date for the age calculation (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Interview listing CSV (defaults to the built-in sample listing)
    #[arg(long)]
    pub(crate) interviews_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the age calculation (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Interview listing CSV (defaults to the built-in sample listing)
    #[arg(long)]
    pub(crate) interviews_csv: Option<PathBuf>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let board = interview_board(args.interviews_csv);
    let submission = FormSubmission {
        full_name: args.name,
        date_of_birth: Some(args.date_of_birth),
        state: Some(args.state),
        college: Some(args.college),
        degree: Some(args.degree),
        tenth_percent: Some(args.tenth),
        twelfth_percent: Some(args.twelfth),
        photo: Some(Attachment::named(args.photo)),
        certificate: Some(Attachment::named(args.certificate)),
    };

    let directory = CollegeDirectory::standard();
    let profile = match IntakeGuard::new(&directory).profile_from_submission(submission, today) {
        Ok(profile) => profile,
        Err(rejection) => {
            println!("Application rejected");
            for message in rejection.messages() {
                println!("- {message}");
            }
            let err = PortalServiceError::Transition(TransitionError::Rejected(rejection));
            return Err(err.into());
        }
    };

    let catalog = JobCatalog::standard();
    println!("Hello {}, Age: {}", profile.full_name, profile.age);
    println!("Average score: {:.1}%", profile.average_percent);
    render_jobs(&eligible_jobs(&profile, &catalog));
    render_interviews(&board.refresh());
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let board = interview_board(args.interviews_csv);
    let service = PortalService::new(Arc::new(InMemorySessionStore::default()), board)
        .with_clock(FixedClock(today));

    println!("Job portal demo (evaluated {today})");
    let session = service.start()?;
    let session_id = session.session_id().clone();
    if let PortalView::Form(form) = &session {
        render_form(form);
    }

    println!("\nSubmitting an incomplete form");
    let incomplete = FormSubmission {
        full_name: "  ".to_string(),
        tenth_percent: Some(104.0),
        ..demo_submission(today)
    };
    match service.submit(&session_id, incomplete) {
        Err(PortalServiceError::Transition(TransitionError::Rejected(rejection))) => {
            for message in rejection.messages() {
                println!("- {message}");
            }
        }
        Err(err) => return Err(err.into()),
        Ok(_) => println!("- unexpectedly accepted"),
    }

    println!("\nSubmitting the corrected form");
    if let PortalView::Result(result) = service.submit(&session_id, demo_submission(today))? {
        render_result(&result);
    }

    println!("\nGoing back to the form");
    if let PortalView::Form(form) = service.go_back(&session_id)? {
        render_form(&form);
    }

    Ok(())
}

fn interview_board(path: Option<PathBuf>) -> Arc<InterviewBoard> {
    let source: Arc<dyn InterviewSource> = match path {
        Some(path) => Arc::new(CsvInterviewSource::new(path)),
        None => Arc::new(StaticInterviewSource::sample()),
    };
    Arc::new(InterviewBoard::new(source))
}

fn demo_submission(today: NaiveDate) -> FormSubmission {
    let date_of_birth = today
        .with_year(today.year() - 23)
        .or_else(|| NaiveDate::from_ymd_opt(today.year() - 23, 3, 1))
        .unwrap_or(today);

    FormSubmission {
        full_name: "Priya Raman".to_string(),
        date_of_birth: Some(date_of_birth),
        state: Some("Tamil Nadu".to_string()),
        college: Some("Anna University".to_string()),
        degree: Some(Degree::BTech),
        tenth_percent: Some(78.0),
        twelfth_percent: Some(72.5),
        photo: Some(Attachment::named("priya.jpg")),
        certificate: Some(Attachment::named("btech-degree.pdf")),
    }
}

fn render_form(form: &FormView) {
    println!("Session {} is on the form page", form.session_id);
    for entry in &form.states {
        println!("- {}: {} colleges", entry.state, entry.colleges.len());
    }
    let degrees: Vec<&str> = form.degrees.iter().map(|degree| degree.label()).collect();
    println!("Degrees: {}", degrees.join(", "));
}

fn render_result(result: &ResultView) {
    println!("{}", result.greeting);
    render_jobs(&result.eligible_jobs);
    render_interviews(&result.interviews);
    println!(
        "Interview listing refreshes every {}s",
        result.refresh_interval_secs
    );
}

fn render_jobs(jobs: &[EligibleJob]) {
    if jobs.is_empty() {
        println!("{NO_MATCH_NOTICE}");
        return;
    }

    println!("\nEligible jobs");
    for job in jobs {
        println!(
            "- {} | {} | min {:.0}% | age {}",
            job.employer, job.role, job.min_average_percent, job.age_limit
        );
    }
}

fn render_interviews(listing: &InterviewListing) {
    println!("\nUpcoming interviews");
    match listing {
        InterviewListing::Available { events, .. } if events.is_empty() => {
            println!("- none scheduled");
        }
        InterviewListing::Available { events, .. } => {
            for event in events {
                match &event.role {
                    Some(role) => println!(
                        "- {} ({}) | {} | {}",
                        event.employer, role, event.location, event.date
                    ),
                    None => println!("- {} | {} | {}", event.employer, event.location, event.date),
                }
            }
        }
        InterviewListing::Unavailable { notice } => println!("- {notice}"),
    }
}
