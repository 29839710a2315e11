//! End-to-end pipeline runs against a local report server.

use std::io::Read;
use std::thread;

use chrono::NaiveDate;
use qbr_bundle::CredentialPolicy;
use qbr_common::TimeWindow;
use qbr_config::RunSettings;
use qbr_core::Pipeline;
use tiny_http::{Response, Server};

const MONTHLY_BODY: &str = "month,installs,reattributions,sessions,rejected_installs,\
rejected_reattributions,organic_install_rate,maus,clicks,impressions,events,revenue_events\n\
2024-01,100,50,1000,4,6,0.25,5000,200,400,20,30\n\
2024-02,80,20,900,1,1,0.5,4800,150,300,15,25\n";

const CHANNEL_BODY: &str =
    "channel,installs,reattributions,sessions,rejected_installs,rejected_reattributions\n\
Organic Search,9999,0,9,0,0\nNetwork A,100,0,10,2,1\nNetwork B,90,0,20,0,0\n";

/// Serve the monthly request, then the channel request, with given statuses.
fn report_server(monthly_status: u16, channel_status: u16) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("bind local server");
    let addr = server.server_addr().to_ip().expect("tcp listener");

    let handle = thread::spawn(move || {
        for (body, status) in [(MONTHLY_BODY, monthly_status), (CHANNEL_BODY, channel_status)] {
            let request = server.recv().expect("request");
            let response = Response::from_string(body).with_status_code(status);
            request.respond(response).expect("respond");
        }
    });

    (format!("http://{addr}/csv_report"), handle)
}

fn settings() -> RunSettings {
    RunSettings {
        api_token: "secret-token".to_string(),
        app_tokens: None,
        utc_offset: "+00:00".to_string(),
        window: TimeWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        ),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn read_from_archive(dir: &std::path::Path, name: &str) -> Option<String> {
    let file = std::fs::File::open(dir.join("qbr_outputs.zip")).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    Some(contents)
}

#[test]
fn full_run_archives_data_and_redacted_audit() {
    let (endpoint, handle) = report_server(200, 200);
    let dir = tempfile::tempdir().unwrap();

    let pipeline = Pipeline::new(
        settings(),
        dir.path().to_path_buf(),
        endpoint,
        CredentialPolicy::Redact,
    );
    pipeline.run_at(today());
    handle.join().unwrap();

    // Raw CSVs and the audit trail went into the archive, loose copies gone.
    assert!(dir.path().join("qbr_outputs.zip").exists());
    assert!(!dir.path().join("data_by_month.csv").exists());
    assert!(!dir.path().join("audit_trail.csv").exists());

    assert_eq!(
        read_from_archive(dir.path(), "data_by_month.csv").as_deref(),
        Some(MONTHLY_BODY)
    );
    assert_eq!(
        read_from_archive(dir.path(), "data_by_channel.csv").as_deref(),
        Some(CHANNEL_BODY)
    );

    let audit = read_from_archive(dir.path(), "audit_trail.csv").unwrap();
    assert!(audit.contains("dimensions=month"));
    assert!(audit.contains("dimensions=channel"));
    assert!(audit.contains("[redacted]"));
    assert!(!audit.contains("secret-token"));
}

#[test]
fn failed_channel_fetch_is_absent_from_the_audit() {
    let (endpoint, handle) = report_server(200, 500);
    let dir = tempfile::tempdir().unwrap();

    let pipeline = Pipeline::new(
        settings(),
        dir.path().to_path_buf(),
        endpoint,
        CredentialPolicy::Redact,
    );
    pipeline.run_at(today());
    handle.join().unwrap();

    // The monthly fetch still succeeded and the run still packaged.
    assert!(read_from_archive(dir.path(), "data_by_month.csv").is_some());
    assert!(read_from_archive(dir.path(), "data_by_channel.csv").is_none());

    let audit = read_from_archive(dir.path(), "audit_trail.csv").unwrap();
    assert!(audit.contains("dimensions=month"));
    assert!(!audit.contains("dimensions=channel"));
}

#[test]
fn plaintext_policy_records_the_token() {
    let (endpoint, handle) = report_server(200, 200);
    let dir = tempfile::tempdir().unwrap();

    let pipeline = Pipeline::new(
        settings(),
        dir.path().to_path_buf(),
        endpoint,
        CredentialPolicy::Plaintext,
    );
    pipeline.run_at(today());
    handle.join().unwrap();

    let audit = read_from_archive(dir.path(), "audit_trail.csv").unwrap();
    assert!(audit.contains("API Token: Bearer secret-token"));
}
