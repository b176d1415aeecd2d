//! End-to-end smoke checks against a running deployment.
//!
//! Every check is one HTTP call with an expected status code. Checks run in a
//! fixed order because later ones depend on earlier ones (the created admin is
//! deleted at the end, the blocked IP is unblocked).

use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Telegram id seeded on startup; creating it again must fail.
pub const SEEDED_TELEGRAM_ID: &str = "123456789";
pub const PROBE_IP: &str = "192.168.1.100";
pub const UNKNOWN_IP: &str = "192.168.1.999";
pub const MISSING_ADMIN_ID: i64 = 99999;

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub status: Option<StatusCode>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub run: usize,
    pub passed: usize,
}

impl Summary {
    pub fn failed(&self) -> usize {
        self.run - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.run == self.passed
    }
}

pub struct SmokeTester {
    client: Client,
    base_url: String,
    outcomes: Vec<CheckOutcome>,
    created_admin_id: Option<i64>,
}

impl SmokeTester {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            outcomes: Vec::new(),
            created_admin_id: None,
        }
    }

    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn summary(&self) -> Summary {
        Summary {
            run: self.outcomes.len(),
            passed: self.outcomes.iter().filter(|o| o.passed).count(),
        }
    }

    /// Send one request and compare the status. Returns the JSON body of a
    /// passing check (or `Value::Null` if the body was not JSON).
    pub async fn check(
        &mut self,
        name: &'static str,
        method: Method,
        endpoint: &str,
        expected: StatusCode,
        body: Option<Value>,
    ) -> Option<Value> {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        tracing::info!(check = name, %method, %url, "Running check");

        let mut request = self.client.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(check = name, error = %e, "Request failed");
                self.record(name, false, None);
                return None;
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status != expected {
            tracing::warn!(
                check = name,
                expected = expected.as_u16(),
                got = status.as_u16(),
                body = %text,
                "Check failed"
            );
            self.record(name, false, Some(status));
            return None;
        }

        tracing::info!(check = name, status = status.as_u16(), body = %text, "Check passed");
        self.record(name, true, Some(status));
        Some(serde_json::from_str(&text).unwrap_or(Value::Null))
    }

    fn record(&mut self, name: &'static str, passed: bool, status: Option<StatusCode>) {
        self.outcomes.push(CheckOutcome {
            name,
            passed,
            status,
        });
    }

    /// Run the full check sequence and return the tally.
    pub async fn run_all(&mut self) -> Summary {
        self.check("Health Check", Method::GET, "api/health", StatusCode::OK, None)
            .await;
        self.check(
            "Log Visit",
            Method::POST,
            "api/log-visit",
            StatusCode::OK,
            Some(json!({ "user_agent": "Visitwatch-Smoketest/1.0" })),
        )
        .await;
        self.check("Get Admins", Method::GET, "api/admins", StatusCode::OK, None)
            .await;

        let telegram_id = format!("test_{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
        let created = self
            .check(
                "Create Admin",
                Method::POST,
                "api/admins",
                StatusCode::OK,
                Some(json!({ "name": "Smoketest Admin", "telegram_id": telegram_id })),
            )
            .await;
        self.created_admin_id = created.and_then(|body| body.get("id").and_then(Value::as_i64));

        self.check(
            "Create Duplicate Admin",
            Method::POST,
            "api/admins",
            StatusCode::BAD_REQUEST,
            Some(json!({ "name": "Duplicate Test", "telegram_id": SEEDED_TELEGRAM_ID })),
        )
        .await;
        self.check("Get Visits", Method::GET, "api/visits", StatusCode::OK, None)
            .await;
        self.check(
            "Block IP",
            Method::POST,
            "api/block-ip",
            StatusCode::OK,
            Some(json!({ "ip": PROBE_IP })),
        )
        .await;
        self.check(
            "Block Duplicate IP",
            Method::POST,
            "api/block-ip",
            StatusCode::BAD_REQUEST,
            Some(json!({ "ip": PROBE_IP })),
        )
        .await;
        self.check(
            "Get Blocked IPs",
            Method::GET,
            "api/blocked-ips",
            StatusCode::OK,
            None,
        )
        .await;
        self.check(
            "Unblock IP",
            Method::POST,
            "api/unblock-ip",
            StatusCode::OK,
            Some(json!({ "ip": PROBE_IP })),
        )
        .await;
        self.check(
            "Unblock Non-existent IP",
            Method::POST,
            "api/unblock-ip",
            StatusCode::NOT_FOUND,
            Some(json!({ "ip": UNKNOWN_IP })),
        )
        .await;

        match self.created_admin_id {
            Some(id) => {
                self.check(
                    "Delete Admin",
                    Method::DELETE,
                    &format!("api/admins/{id}"),
                    StatusCode::OK,
                    None,
                )
                .await;
            }
            None => {
                tracing::error!(check = "Delete Admin", "No admin id to delete");
                self.record("Delete Admin", false, None);
            }
        }

        self.check(
            "Delete Non-existent Admin",
            Method::DELETE,
            &format!("api/admins/{MISSING_ADMIN_ID}"),
            StatusCode::NOT_FOUND,
            None,
        )
        .await;

        self.summary()
    }
}
