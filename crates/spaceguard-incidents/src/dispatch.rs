//! Delivery of incident reports to the notification endpoint.

use reqwest::header::ACCEPT;
use tracing::{debug, error};

use spaceguard_alerts::AlertStore;

use crate::activity::{Activity, classify, is_alertable};
use crate::error::{DispatchError, Result};
use crate::report::IncidentReport;

/// Environment variable naming the notification endpoint URL.
pub const ENV_ENDPOINT: &str = "SPACEGUARD_NOTIFY_ENDPOINT";
/// Environment variable naming the basic-auth username.
pub const ENV_USERNAME: &str = "SPACEGUARD_NOTIFY_USERNAME";
/// Environment variable naming the basic-auth password.
pub const ENV_PASSWORD: &str = "SPACEGUARD_NOTIFY_PASSWORD";

/// Connection settings for the notification endpoint.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// URL incidents are POSTed to.
    pub endpoint: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
}

impl NotifierConfig {
    /// Builds the config from its three parts; all-or-nothing. Any missing
    /// part disables dispatch entirely rather than failing half-configured.
    #[must_use]
    pub fn from_parts(
        endpoint: Option<String>,
        username: Option<String>,
        password: Option<String>,
    ) -> Option<Self> {
        match (endpoint, username, password) {
            (Some(endpoint), Some(username), Some(password)) => Some(Self {
                endpoint,
                username,
                password,
            }),
            _ => None,
        }
    }

    /// Reads the config from `SPACEGUARD_NOTIFY_*` environment variables.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_parts(
            std::env::var(ENV_ENDPOINT).ok(),
            std::env::var(ENV_USERNAME).ok(),
            std::env::var(ENV_PASSWORD).ok(),
        )
    }
}

/// POSTs incident reports to the configured endpoint.
#[derive(Debug, Clone)]
pub struct IncidentDispatcher {
    config: NotifierConfig,
    client: reqwest::Client,
}

impl IncidentDispatcher {
    /// Creates a dispatcher with a fresh HTTP client.
    #[must_use]
    pub fn new(config: NotifierConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Sends one report. Success requires a 200 status and a non-empty
    /// body; the body is returned for logging.
    pub async fn send(&self, report: &IncidentReport) -> Result<String> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .header(ACCEPT, "application/json")
            .json(report)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DispatchError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(DispatchError::EmptyBody);
        }
        Ok(body)
    }
}

/// Evaluates incoming activities and fires incidents for the ones that
/// qualify.
///
/// Dispatch is fire-and-forget from the caller's point of view: `handle`
/// returns as soon as the decision is made and the POST runs on a spawned
/// task. Failures are logged, never surfaced to the activity source.
pub struct ActivityListener {
    store: AlertStore,
    dispatcher: Option<IncidentDispatcher>,
    source: String,
}

impl std::fmt::Debug for ActivityListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityListener")
            .field("configured", &self.dispatcher.is_some())
            .field("source", &self.source)
            .finish()
    }
}

impl ActivityListener {
    /// Creates a listener. A `None` dispatcher (endpoint not configured)
    /// turns every activity into a silent no-op.
    #[must_use]
    pub fn new(store: AlertStore, dispatcher: Option<IncidentDispatcher>, source: &str) -> Self {
        Self {
            store,
            dispatcher,
            source: source.to_string(),
        }
    }

    /// Evaluates one activity against the current alert configuration.
    ///
    /// Returns the spawned delivery task when an incident was dispatched,
    /// `None` when the activity did not qualify or dispatch is not
    /// configured. Callers may await the handle in tests; production
    /// callers drop it.
    pub fn handle(&self, activity: &Activity) -> Option<tokio::task::JoinHandle<()>> {
        let dispatcher = self.dispatcher.as_ref()?;

        let ctx = self.store.load();
        if !is_alertable(ctx.as_ref(), activity) {
            return None;
        }
        // is_alertable only passes for a classifiable id.
        let kind = classify(&activity.activity_id)?;

        let report = IncidentReport::from_activity(activity, kind, &self.source);
        let dispatcher = dispatcher.clone();
        let app_name = activity.app_name.clone();
        Some(tokio::spawn(async move {
            match dispatcher.send(&report).await {
                Ok(body) => debug!(app = %app_name, %body, "incident dispatched"),
                Err(err) => error!(app = %app_name, %err, "incident dispatch failed"),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use wiremock::matchers::{body_json_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use spaceguard_alerts::{MemoryStore, Space};

    use crate::activity::ACTIVITY_MEMORY;

    fn report() -> IncidentReport {
        IncidentReport {
            what: "Memory usage for application orders-api has exceeded the threshold of 95%."
                .to_string(),
            r#where: "testSpace".to_string(),
            severity: "Critical".to_string(),
            source: "guardbot".to_string(),
            applications_or_services: vec!["orders-api".to_string()],
        }
    }

    fn dispatcher_for(server: &MockServer) -> IncidentDispatcher {
        IncidentDispatcher::new(NotifierConfig {
            endpoint: format!("{}/incidents", server.uri()),
            username: "user".to_string(),
            password: "pass".to_string(),
        })
    }

    mod config_tests {
        use super::*;

        #[test]
        fn from_parts_needs_all_three() {
            assert!(
                NotifierConfig::from_parts(
                    Some("http://n".to_string()),
                    Some("u".to_string()),
                    Some("p".to_string()),
                )
                .is_some()
            );
            assert!(
                NotifierConfig::from_parts(
                    Some("http://n".to_string()),
                    None,
                    Some("p".to_string()),
                )
                .is_none()
            );
            assert!(NotifierConfig::from_parts(None, None, None).is_none());
        }
    }

    mod send_tests {
        use super::*;

        #[tokio::test]
        async fn posts_with_basic_auth_and_accept_header() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/incidents"))
                // user:pass
                .and(header("Authorization", "Basic dXNlcjpwYXNz"))
                .and(header("Accept", "application/json"))
                .and(body_json_string(
                    serde_json::to_string(&report()).unwrap(),
                ))
                .respond_with(ResponseTemplate::new(200).set_body_string("{\"id\":\"inc-1\"}"))
                .expect(1)
                .mount(&server)
                .await;

            let body = dispatcher_for(&server).send(&report()).await.unwrap();
            assert_eq!(body, "{\"id\":\"inc-1\"}");
        }

        #[tokio::test]
        async fn non_200_is_an_error() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;

            let err = dispatcher_for(&server).send(&report()).await.unwrap_err();
            assert!(matches!(
                err,
                DispatchError::UnexpectedStatus { status: 500 }
            ));
        }

        #[tokio::test]
        async fn empty_200_body_is_an_error() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server)
                .await;

            let err = dispatcher_for(&server).send(&report()).await.unwrap_err();
            assert!(matches!(err, DispatchError::EmptyBody));
        }
    }

    mod listener_tests {
        use super::*;
        use spaceguard_alerts::AlertStore;

        fn store_with_memory_at(threshold: u8) -> AlertStore {
            let store = AlertStore::new(Arc::new(MemoryStore::default()));
            let mut ctx = spaceguard_alerts::AlertContext::default();
            let config = ctx.space_entry(&Space::new("g1", "testSpace"));
            config.alerts.memory.enabled = true;
            config.alerts.memory.threshold = Some(threshold);
            store.save(&ctx);
            store
        }

        fn memory_activity(observed: u8) -> Activity {
            Activity {
                activity_id: ACTIVITY_MEMORY.to_string(),
                app_name: "orders-api".to_string(),
                app_guid: None,
                space_name: "testSpace".to_string(),
                space_guid: "g1".to_string(),
                threshold_percentage: Some(observed),
            }
        }

        #[tokio::test]
        async fn qualifying_activity_reaches_the_endpoint() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/incidents"))
                .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
                .expect(1)
                .mount(&server)
                .await;

            let listener = ActivityListener::new(
                store_with_memory_at(40),
                Some(dispatcher_for(&server)),
                "guardbot",
            );

            let handle = listener.handle(&memory_activity(95)).expect("dispatched");
            handle.await.unwrap();
        }

        #[tokio::test]
        async fn non_qualifying_activity_stays_silent() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
                .expect(0)
                .mount(&server)
                .await;

            let listener = ActivityListener::new(
                store_with_memory_at(96),
                Some(dispatcher_for(&server)),
                "guardbot",
            );

            assert!(listener.handle(&memory_activity(95)).is_none());
        }

        #[tokio::test]
        async fn unconfigured_dispatch_is_a_no_op() {
            let listener = ActivityListener::new(store_with_memory_at(40), None, "guardbot");
            assert!(listener.handle(&memory_activity(95)).is_none());
        }
    }
}
