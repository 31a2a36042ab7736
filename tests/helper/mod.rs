//! Test utilities: a mock status page server

use mockito::{Mock, Server, ServerGuard};

use version_probe::parser::DualFormatParser;
use version_probe::probe::ProbeTarget;
use version_probe::transport::HttpTransport;

pub const SYSTEM_INFO_PATH: &str = "/solr/admin/info/system";

/// Solr 7+ style JSON body
pub fn solr_json(version: &str) -> String {
    serde_json::json!({
        "responseHeader": { "status": 0, "QTime": 3 },
        "mode": "std",
        "lucene": {
            "solr-spec-version": version,
            "lucene-spec-version": version
        }
    })
    .to_string()
}

/// Solr 4-6 style XML body
pub fn solr_xml(version: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
<lst name="responseHeader"><int name="status">0</int><int name="QTime">3</int></lst>
<str name="mode">std</str>
<lst name="lucene">
  <str name="solr-spec-version">{version}</str>
  <str name="lucene-spec-version">{version}</str>
</lst>
</response>
"#
    )
}

/// Start a server answering the Solr status page with `status` and `body`
pub async fn serve(status: usize, body: &str) -> (ServerGuard, Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", SYSTEM_INFO_PATH)
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;
    (server, mock)
}

/// Host and port of a mock server
pub fn host_port(server: &ServerGuard) -> (String, u16) {
    let address = server.host_with_port();
    let (host, port) = address
        .rsplit_once(':')
        .expect("server address has a port");
    (host.to_string(), port.parse().expect("port is numeric"))
}

pub fn solr_transport() -> HttpTransport {
    HttpTransport::new(SYSTEM_INFO_PATH, std::time::Duration::from_secs(5))
        .expect("HTTP client builds")
}

pub fn solr_parser() -> DualFormatParser {
    ProbeTarget::solr().parser().expect("HTML grammar loads")
}
