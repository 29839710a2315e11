//! Fetch tests against a local HTTP server.

use std::fs;
use std::thread;

use qbr_report::{FetchError, ReportClient, ReportRequest};
use tiny_http::{Response, Server};

const BODY: &str = "channel,installs,sessions\nNetwork A,120,900\n";

fn local_server(status: u16) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("bind local server");
    let addr = server.server_addr().to_ip().expect("tcp listener");

    let handle = thread::spawn(move || {
        let request = server.recv().expect("one request");
        assert!(request.url().starts_with("/csv_report?"));

        let authorized = request
            .headers()
            .iter()
            .any(|h| h.field.equiv("Authorization") && h.value.as_str() == "Bearer test-token");
        assert!(authorized, "missing bearer header");

        let response = Response::from_string(BODY).with_status_code(status);
        request.respond(response).expect("respond");
    });

    (format!("http://{addr}/csv_report"), handle)
}

#[test]
fn success_persists_body_and_returns_url() {
    let (base, handle) = local_server(200);
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("data_by_channel.csv");

    let client = ReportClient::new(&base);
    let request = ReportRequest::by_channel("+00:00", None, "-30d:-0d");
    let url = client.fetch_csv(&request, "test-token", &dest).unwrap();

    handle.join().unwrap();
    assert!(url.starts_with(&base));
    assert!(url.contains("dimensions=channel"));
    assert_eq!(fs::read_to_string(&dest).unwrap(), BODY);
}

#[test]
fn non_success_status_creates_no_file() {
    let (base, handle) = local_server(500);
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("data_by_channel.csv");

    let client = ReportClient::new(&base);
    let request = ReportRequest::by_channel("+00:00", None, "-30d:-0d");
    let err = client.fetch_csv(&request, "test-token", &dest).unwrap_err();

    handle.join().unwrap();
    assert!(matches!(err, FetchError::Status { status: 500 }));
    assert!(!dest.exists());
}

#[test]
fn non_200_success_status_creates_no_file() {
    // The agent passes 2xx/3xx responses through; only an exact 200 counts.
    let (base, handle) = local_server(206);
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("data_by_channel.csv");

    let client = ReportClient::new(&base);
    let request = ReportRequest::by_channel("+00:00", None, "-30d:-0d");
    let err = client.fetch_csv(&request, "test-token", &dest).unwrap_err();

    handle.join().unwrap();
    assert!(matches!(err, FetchError::Status { status: 206 }));
    assert!(!dest.exists());
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.csv");

    // Nothing listens on port 1; the connection is refused immediately.
    let client = ReportClient::new("http://127.0.0.1:1/csv_report");
    let request = ReportRequest::monthly("+00:00", None, "-1d:-0d");
    let err = client.fetch_csv(&request, "test-token", &dest).unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
}
