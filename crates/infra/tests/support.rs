//! Shared wiremock fixtures for the Keycloak exchange and controller API.
#![allow(dead_code)]

use eda_domain::Config;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const KEYCLOAK: &str = "/core/httpproxy/v1/keycloak";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const CLIENT_UUID: &str = "3f1c9c2e-eda-client";
pub const CLIENT_SECRET: &str = "s3cr3t-value";
pub const APP_TOKEN: &str = "app-token";

/// Configuration pointing both controller and broker proxy at `server`.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::new(server.uri());
    config.controller.timeout_secs = 5;
    config.controller.wait_timeout_secs = 5;
    config.broker.max_attempts = 1;
    config
}

pub fn admin_token_path() -> String {
    format!("{KEYCLOAK}/realms/master/protocol/openid-connect/token")
}

pub fn clients_path() -> String {
    format!("{KEYCLOAK}/admin/realms/eda/clients")
}

pub fn secret_path() -> String {
    format!("{KEYCLOAK}/admin/realms/eda/clients/{CLIENT_UUID}/client-secret")
}

pub fn app_token_path() -> String {
    format!("{KEYCLOAK}/realms/eda/protocol/openid-connect/token")
}

pub fn token_body(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": token,
        "expires_in": 300,
        "token_type": "Bearer"
    }))
}

pub fn clients_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!([
        { "id": "0a0a-account", "clientId": "account" },
        { "id": CLIENT_UUID, "clientId": "eda" },
        { "id": "0b0b-admin-cli", "clientId": "admin-cli" }
    ]))
}

pub fn secret_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "type": "secret", "value": CLIENT_SECRET }))
}

pub async fn mount_admin_token(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(admin_token_path()))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("client_id=admin-cli"))
        .and(body_string_contains("username=admin"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_clients(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(clients_path()))
        .and(header("authorization", format!("Bearer {ADMIN_TOKEN}").as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_secret(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(secret_path()))
        .and(header("authorization", format!("Bearer {ADMIN_TOKEN}").as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_app_token(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(app_token_path()))
        .and(body_string_contains("client_id=eda"))
        .and(body_string_contains("scope=openid"))
        .and(body_string_contains(format!("client_secret={CLIENT_SECRET}").as_str()))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Mount a broker that completes the whole exchange.
pub async fn mount_keycloak(server: &MockServer) {
    mount_admin_token(server, token_body(ADMIN_TOKEN)).await;
    mount_clients(server, clients_body()).await;
    mount_secret(server, secret_body()).await;
    mount_app_token(server, token_body(APP_TOKEN)).await;
}

/// Paths of every request the server has seen, in arrival order.
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
