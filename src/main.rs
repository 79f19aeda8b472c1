//! CLI entry point for the student records tool.
//!
//! Each subcommand is one action against the roster: register a student,
//! record a grade, query GPA, list records, or predict a score from study
//! hours. Mutations are written back to the CSV file immediately.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_records::config::Settings;
use student_records::predictor::ScorePredictor;
use student_records::report::{record_lines, student_lines, to_json};
use student_records::session::Session;
use student_records::store::{CsvStore, MemoryStore, RosterStore};
use student_records::{RecordError, StudentId};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_records")]
#[command(about = "Manage student grades, GPA, and score predictions", long_about = None)]
struct Cli {
    /// CSV file holding the records (overrides STUDENT_RECORDS_PATH)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Apply the command in memory only; the records file is read but never written
    #[arg(long, global = true, default_value_t = false)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new student
    AddStudent {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,

        /// Full name (letters and spaces only)
        #[arg(value_parser = parse_name)]
        name: String,
    },
    /// Record a grade for an existing student
    AddGrade {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,

        #[arg(value_parser = parse_subject)]
        subject: String,

        /// Score between 0 and 100
        #[arg(short, long, value_parser = parse_score)]
        score: f64,

        /// Credit hours, greater than zero
        #[arg(short, long, value_parser = parse_credits)]
        credits: f64,

        /// Hours studied for this subject; left unrecorded when omitted
        #[arg(long = "hours", value_parser = parse_hours)]
        study_hours: Option<f64>,
    },
    /// Show the GPA of one student
    Gpa {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        id: u32,
    },
    /// List every student with grades and GPA
    List {
        /// Print JSON instead of the plain listing
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List registered student ids in load order
    Ids,
    /// Predict a score from planned study hours using past grades
    Predict {
        #[arg(value_parser = parse_hours)]
        hours: f64,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env();

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = settings
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = settings
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("student_records.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let records_path = cli.file.unwrap_or(settings.records_path);
    let csv_store = CsvStore::new(&records_path);

    if cli.dry_run {
        info!(path = %records_path.display(), "Dry run, changes will not be saved");
        let mut session = Session::open(MemoryStore::with_roster(csv_store.load()?))?;
        run(&mut session, cli.command)
    } else {
        let mut session = Session::open(csv_store)?;
        run(&mut session, cli.command)
    }
}

fn run<S: RosterStore>(session: &mut Session<S>, command: Commands) -> Result<()> {
    match command {
        Commands::AddStudent { id, name } => match session.add_student(id, name.as_str()) {
            Ok(()) => println!("Student {name} added."),
            Err(e @ RecordError::DuplicateStudent(_)) => error!(error = %e, "Student not added"),
            Err(e) => return Err(e.into()),
        },
        Commands::AddGrade {
            id,
            subject,
            score,
            credits,
            study_hours,
        } => match session.add_grade(id, subject.as_str(), score, credits, study_hours) {
            Ok(()) => println!("Grade for {subject} saved."),
            Err(e @ RecordError::UnknownStudent(_)) => error!(error = %e, "Grade not saved"),
            Err(e) => return Err(e.into()),
        },
        Commands::Gpa { id } => match session.roster().find_by_id(id) {
            Some(student) => {
                for line in student_lines(student) {
                    println!("{line}");
                }
            }
            None => report_unknown(id),
        },
        Commands::List { json } => {
            let roster = session.roster();
            if json {
                println!("{}", to_json(roster)?);
            } else if roster.is_empty() {
                println!("No records found.");
            } else {
                for line in record_lines(roster) {
                    println!("{line}");
                }
            }
        }
        Commands::Ids => {
            for id in session.roster().all_ids() {
                let name = session.roster().student_name(id).unwrap_or("Unknown");
                println!("{id} - {name}");
            }
        }
        Commands::Predict { hours } => {
            match ScorePredictor::fit(&session.roster().training_samples()) {
                Ok(model) => {
                    info!(
                        samples = model.sample_count(),
                        slope = model.slope(),
                        intercept = model.intercept(),
                        "Predictor fitted"
                    );
                    println!(
                        "Based on history, if you study {hours} hours, you might score: {:.2}",
                        model.predict_clamped(hours)
                    );
                }
                Err(e @ RecordError::InsufficientData { .. }) => {
                    warn!(error = %e, "No prediction made");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn report_unknown(id: StudentId) {
    error!(error = %RecordError::UnknownStudent(id), "Lookup failed");
}

fn parse_name(raw: &str) -> std::result::Result<String, String> {
    let name = raw.trim().to_lowercase();
    if name.is_empty() || !name.chars().all(|c| c.is_alphabetic() || c == ' ') {
        return Err("name must contain only letters and spaces".to_string());
    }
    Ok(name)
}

/// Title-cases each whitespace-separated word.
fn parse_subject(raw: &str) -> std::result::Result<String, String> {
    let subject = raw
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");

    if subject.is_empty() {
        return Err("subject must not be empty".to_string());
    }
    Ok(subject)
}

fn parse_number(raw: &str) -> std::result::Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{raw}' is not a number"))
}

fn parse_score(raw: &str) -> std::result::Result<f64, String> {
    let score = parse_number(raw)?;
    if !(0.0..=100.0).contains(&score) {
        return Err("score must be between 0 and 100".to_string());
    }
    Ok(score)
}

fn parse_credits(raw: &str) -> std::result::Result<f64, String> {
    let credits = parse_number(raw)?;
    if credits <= 0.0 {
        return Err("credits must be greater than zero".to_string());
    }
    Ok(credits)
}

fn parse_hours(raw: &str) -> std::result::Result<f64, String> {
    let hours = parse_number(raw)?;
    if hours < 0.0 {
        return Err("hours cannot be negative".to_string());
    }
    Ok(hours)
}
