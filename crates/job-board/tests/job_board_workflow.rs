//! End-to-end behavior through the public `JobBoard` facade: seeding, the
//! listing scenarios from the fixture data, persistence on disk and concurrent
//! writers.

use std::collections::{BTreeSet, HashSet};
use std::time::Duration;

use chrono::{TimeZone, Utc};

use job_board::applications::{ApplicationSubmission, EmployeeApplication};
use job_board::ids::JobId;
use job_board::inquiries::InquirySubmission;
use job_board::jobs::{
    EmploymentType, JobCategory, JobField, JobFilter, JobServiceError, NewJob, PageRequest,
};
use job_board::latency::SimulatedLatency;
use job_board::store::{CollectionKey, FileBackend, MemoryBackend, StoreBackend, StoreError};
use job_board::JobBoard;

async fn seeded_board() -> JobBoard<MemoryBackend> {
    let board = JobBoard::new(MemoryBackend::new(), SimulatedLatency::none());
    board.store().seed().await.expect("seed succeeds");
    board
}

fn application(name: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: String::new(),
        address: String::new(),
        availability: BTreeSet::from([EmploymentType::Temporary]),
        desired_industries: String::new(),
        skills: String::new(),
        work_history: String::new(),
        resume: "data:application/pdf;base64,AAAA".to_string(),
        resume_filename: Some("resume.pdf".to_string()),
        cover_letter: String::new(),
        job_title: "Warehouse Associate".to_string(),
        data_consent: true,
    }
}

fn new_job(title: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        company: "Remote First Inc.".to_string(),
        location: "Remote (Canada)".to_string(),
        employment_type: EmploymentType::PartTime,
        category: JobCategory::Healthcare,
        description: "Triage patient messages.".to_string(),
        responsibilities: Vec::new(),
        requirements: vec!["RPN licence".to_string()],
        salary: None,
        featured: false,
        application_deadline: Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap(),
    }
}

#[tokio::test]
async fn fixture_listing_scenarios() {
    let board = seeded_board().await;

    let remote = JobFilter::from_parts(None, None, None, true).expect("valid filter");
    let page = board
        .jobs()
        .list(&remote, PageRequest::default())
        .await
        .expect("list succeeds");
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);

    let full_time = JobFilter::from_parts(None, Some(EmploymentType::FullTime), None, false)
        .expect("valid filter");
    let page = board
        .jobs()
        .list(&full_time, PageRequest::new(1, 2).expect("valid window"))
        .await
        .expect("list succeeds");
    let ids: Vec<&str> = page.items.iter().map(|job| job.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "1"]);
    assert_eq!(page.total_count, 3);

    let page = board
        .jobs()
        .list(&full_time, PageRequest::new(2, 2).expect("valid window"))
        .await
        .expect("list succeeds");
    let ids: Vec<&str> = page.items.iter().map(|job| job.id.as_str()).collect();
    assert_eq!(ids, vec!["6"]);
}

#[tokio::test]
async fn search_term_and_location_narrow_results() {
    let board = seeded_board().await;
    let filter = JobFilter::from_parts(
        Some("solutions".to_string()),
        None,
        Some("Toronto, ON".to_string()),
        false,
    )
    .expect("valid filter");

    let page = board
        .jobs()
        .list(&filter, PageRequest::default())
        .await
        .expect("list succeeds");
    let ids: Vec<&str> = page.items.iter().map(|job| job.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "6"]);
}

#[tokio::test]
async fn created_remote_job_is_found_and_unique_values_refresh() {
    let board = seeded_board().await;
    let created = board
        .jobs()
        .create(new_job("Telehealth Nurse"))
        .await
        .expect("create succeeds");

    let remote = JobFilter::from_parts(None, None, None, true).expect("valid filter");
    let page = board
        .jobs()
        .list(&remote, PageRequest::default())
        .await
        .expect("list succeeds");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id, created.id);

    let locations = board
        .jobs()
        .unique_values(JobField::Location)
        .await
        .expect("values load");
    assert!(locations.contains(&"Remote (Canada)".to_string()));

    board.jobs().delete(&created.id).await.expect("delete succeeds");
    assert!(matches!(
        board.jobs().get(&created.id).await,
        Err(JobServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn corrupt_collection_surfaces_as_store_error() {
    let board = seeded_board().await;
    board
        .store()
        .backend()
        .write(CollectionKey::Jobs, "[{\"id\": 7}]")
        .await
        .expect("write succeeds");

    match board.jobs().get(&JobId::from("1")).await {
        Err(JobServiceError::Store(err)) => assert!(err.is_corrupt()),
        other => panic!("expected corrupt store error, got {other:?}"),
    }
}

#[tokio::test]
async fn file_backend_survives_restart() {
    let dir = tempfile::tempdir().expect("temp dir");

    let first = JobBoard::new(FileBackend::new(dir.path()), SimulatedLatency::none());
    first.store().seed().await.expect("seed succeeds");
    let created = first
        .applications()
        .create(application("Ana"))
        .await
        .expect("create succeeds");
    first
        .jobs()
        .delete(&JobId::from("3"))
        .await
        .expect("delete succeeds");
    drop(first);

    let second = JobBoard::new(FileBackend::new(dir.path()), SimulatedLatency::none());
    let report = second.store().seed().await.expect("seed succeeds");
    assert!(report.seeded.is_empty(), "populated files must not be reseeded");

    let applications = second.applications().list().await.expect("list succeeds");
    assert_eq!(applications, vec![created]);
    let page = second
        .jobs()
        .list(&JobFilter::default(), PageRequest::default())
        .await
        .expect("list succeeds");
    assert_eq!(page.total_count, 5);

    assert!(dir.path().join("jobs.json").exists());
    assert!(dir.path().join("employerInquiries.json").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_submissions_are_not_lost() {
    let board = seeded_board().await;

    let handles: Vec<_> = (0..32)
        .map(|n| {
            let board = board.clone();
            tokio::spawn(async move {
                board
                    .applications()
                    .create(application(&format!("Candidate{n}")))
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let created = handle
            .await
            .expect("task joins")
            .expect("create succeeds");
        ids.insert(created.id);
    }
    assert_eq!(ids.len(), 32);

    let stored: Vec<EmployeeApplication> = board
        .store()
        .load()
        .await
        .expect("load succeeds");
    assert_eq!(stored.len(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_job_updates_and_inquiries_interleave_safely() {
    let board = seeded_board().await;

    let mut handles = Vec::new();
    for n in 0..8 {
        let jobs_board = board.clone();
        handles.push(tokio::spawn(async move {
            jobs_board
                .jobs()
                .create(new_job(&format!("Nurse {n}")))
                .await
                .map(|_| ())
                .map_err(|err| err.to_string())
        }));
        let inquiry_board = board.clone();
        handles.push(tokio::spawn(async move {
            inquiry_board
                .inquiries()
                .create(InquirySubmission {
                    company_name: format!("Clinic {n}"),
                    contact_person: "Dr. Lee".to_string(),
                    email: "lee@clinic.example".to_string(),
                    phone: String::new(),
                    staffing_need: "Weekend coverage".to_string(),
                })
                .await
                .map(|_| ())
                .map_err(|err| err.to_string())
        }));
    }
    for handle in handles {
        handle.await.expect("task joins").expect("operation succeeds");
    }

    let snapshot = board.store().snapshot().await.expect("snapshot builds");
    assert_eq!(snapshot.jobs.len(), 14);
    assert_eq!(snapshot.employer_inquiries.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn operations_wait_for_simulated_latency() {
    let board = JobBoard::new(
        MemoryBackend::new(),
        SimulatedLatency::new(Duration::from_millis(500)),
    );
    board.store().seed().await.expect("seed succeeds");

    let started = tokio::time::Instant::now();
    let result = board.jobs().get(&JobId::from("missing")).await;
    assert!(matches!(result, Err(JobServiceError::NotFound(_))));
    assert!(started.elapsed() >= Duration::from_millis(500));
}

#[test]
fn store_error_reports_collection_name() {
    let err = StoreError::DuplicateId {
        key: CollectionKey::EmployeeApplications,
        id: "x".to_string(),
    };
    assert!(err.to_string().contains("employeeApplications"));
}
