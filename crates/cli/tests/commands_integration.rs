//! End-to-end command runs against a mocked broker and controller.

use std::io::Write;
use std::process::ExitCode;

use eda_domain::Config;
use edactl::cli::OpArg;
use edactl::{commands, AppContext, Command};
use serde_json::{json, Value};
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEYCLOAK: &str = "/core/httpproxy/v1/keycloak";

async fn mount_keycloak(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(format!("^{KEYCLOAK}/realms/[a-z]+/protocol/openid-connect/token$")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{KEYCLOAK}/admin/realms/eda/clients")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": "uuid-1", "clientId": "eda" }])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{KEYCLOAK}/admin/realms/eda/clients/uuid-1/client-secret")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": "secret" })))
        .mount(server)
        .await;
}

async fn mount_controller(server: &MockServer, details: Value) {
    Mock::given(method("POST"))
        .and(path("/core/transaction/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 11 })))
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/core/transaction/v1/details/11"))
        .and(query_param("waitForComplete", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details))
        .expect(1)
        .mount(server)
        .await;
}

fn context(server: &MockServer) -> AppContext {
    let mut config = Config::new(server.uri());
    config.controller.timeout_secs = 5;
    config.controller.wait_timeout_secs = 5;
    config.broker.max_attempts = 1;
    AppContext::from_config(config)
}

fn resource_file(contents: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn banner(name: &str) -> Value {
    json!({
        "apiVersion": "siteinfo.eda.nokia.com/v1alpha1",
        "kind": "Banner",
        "metadata": { "name": name, "namespace": "clab-vlan" },
        "spec": { "motd": "hello" }
    })
}

fn same_code(actual: ExitCode, expected: ExitCode) -> bool {
    format!("{actual:?}") == format!("{expected:?}")
}

async fn submitted_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    let submit = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path() == "/core/transaction/v1")
        .expect("submit request");
    serde_json::from_slice(&submit.body).unwrap()
}

#[tokio::test]
async fn apply_commits_every_resource_in_file_order() {
    let server = MockServer::start().await;
    mount_keycloak(&server).await;
    mount_controller(&server, json!({ "state": "complete", "success": true })).await;

    let file = resource_file(&json!([banner("first"), banner("second")]));
    let command = Command::Apply {
        file: file.path().to_path_buf(),
        op: OpArg::Create,
        dry_run: true,
        description: Some("from file".into()),
    };

    let code = commands::run(&context(&server), command).await.unwrap();
    assert!(same_code(code, ExitCode::SUCCESS));

    let body = submitted_body(&server).await;
    let names: Vec<_> = body["crs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|cr| cr["type"]["create"]["value"]["metadata"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["first", "second"]);
    assert_eq!(body["dryRun"], json!(true));
    assert_eq!(body["description"], json!("from file"));
}

#[tokio::test]
async fn apply_exits_non_zero_when_rejected() {
    let server = MockServer::start().await;
    mount_keycloak(&server).await;
    mount_controller(
        &server,
        json!({ "state": "failed", "success": false, "generalErrors": ["bad spec"] }),
    )
    .await;

    let file = resource_file(&banner("only"));
    let command = Command::Apply {
        file: file.path().to_path_buf(),
        op: OpArg::Replace,
        dry_run: false,
        description: None,
    };

    let code = commands::run(&context(&server), command).await.unwrap();
    assert!(same_code(code, ExitCode::FAILURE));

    let body = submitted_body(&server).await;
    assert!(body.get("dryRun").is_none());
    assert!(body["crs"][0]["type"].get("replace").is_some());
}

#[tokio::test]
async fn apply_rejects_nameless_resource_before_network() {
    let server = MockServer::start().await;

    let mut nameless = banner("x");
    nameless["metadata"]["name"] = json!("");
    let file = resource_file(&nameless);
    let command = Command::Apply {
        file: file.path().to_path_buf(),
        op: OpArg::Create,
        dry_run: false,
        description: None,
    };

    assert!(commands::run(&context(&server), command).await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn token_command_runs_exchange() {
    let server = MockServer::start().await;
    mount_keycloak(&server).await;

    let code = commands::run(&context(&server), Command::Token).await.unwrap();
    assert!(same_code(code, ExitCode::SUCCESS));
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}
