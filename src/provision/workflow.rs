//! Folder source provisioning workflow
//!
//! Creates a connector, a placeholder credential, links them and starts the
//! first run. Each step only starts once the previous one succeeded, and the
//! first failure ends the run. Nothing is rolled back: resources created by
//! earlier steps stay on the platform.

use super::{
    Notification, NotificationSink, PartialProvision, ProvisionError, ProvisionState,
    ProvisioningInput,
};
use crate::resource::{
    ConnectorId, ConnectorRequest, Credential, CredentialId, CredentialRequest, LinkRequest,
    ResourceService, RunRequest,
};
use chrono::Utc;

/// Identifiers of a fully provisioned folder source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedSource {
    pub connector_id: ConnectorId,
    pub credential_id: CredentialId,
    pub connector_name: String,
}

/// Runs the provisioning steps against a resource service.
///
/// Holds no state between runs, so one provisioner can serve any number of
/// independent (even concurrent) invocations.
pub struct Provisioner<'a, S> {
    service: &'a S,
}

impl<'a, S: ResourceService> Provisioner<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Provision a folder source, stopping at the first failed step.
    ///
    /// # Errors
    /// Returns the [`ProvisionError`] of the first step that failed. Blank
    /// folder paths fail before any service call.
    pub async fn provision(
        &self,
        input: &ProvisioningInput,
    ) -> Result<ProvisionedSource, ProvisionError> {
        let mut state = ProvisionState::Idle;
        state.advance(ProvisionState::ValidatingInput);

        let folder_path = input
            .validated_folder_path()
            .map_err(|e| fail(&mut state, e))?;

        // Connector
        let connector_name = input.connector_name(Utc::now());
        let request = ConnectorRequest::folder(
            &connector_name,
            folder_path,
            input.access_type,
            &input.groups,
        );
        log::debug!("Creating connector {} for {}", connector_name, folder_path);
        let outcome = self.service.create_connector(&request).await;
        let error = outcome.error.filter(|e| !e.is_empty());
        let connector = match (error, outcome.connector) {
            (None, Some(connector)) => connector,
            (error, _) => {
                let detail = error.unwrap_or_else(|| "no connector returned".to_string());
                return Err(fail(
                    &mut state,
                    ProvisionError::ConnectorCreationFailed { detail },
                ));
            }
        };
        state.advance(ProvisionState::ConnectorCreated);
        log::info!("Created connector {} ({})", connector.id, connector_name);

        // Placeholder credential
        let mut partial = PartialProvision {
            connector_id: connector.id,
            credential_id: None,
        };
        let request = CredentialRequest::placeholder(&input.display_name, &input.groups);
        let credential_failed =
            move |detail: String| ProvisionError::CredentialCreationFailed { detail, partial };
        let response = self
            .service
            .create_credential(&request)
            .await
            .map_err(|e| fail(&mut state, credential_failed(format!("{:#}", e))))?;
        if !response.is_ok() {
            let detail = response.text().to_string();
            return Err(fail(&mut state, credential_failed(detail)));
        }
        let credential: Credential = response
            .json()
            .map_err(|e| fail(&mut state, credential_failed(format!("{:#}", e))))?;
        state.advance(ProvisionState::CredentialCreated);
        log::info!("Created credential {}", credential.id);
        partial.credential_id = Some(credential.id);

        // Link
        let request = LinkRequest {
            connector_id: connector.id,
            credential_id: credential.id,
            name: input.display_name.clone(),
            access_type: input.access_type,
            groups: input.groups.clone(),
        };
        let link_failed = move |detail: String| ProvisionError::LinkFailed { detail, partial };
        let response = self
            .service
            .link_credential(&request)
            .await
            .map_err(|e| fail(&mut state, link_failed(format!("{:#}", e))))?;
        if !response.is_ok() {
            let detail = response
                .detail()
                .unwrap_or_else(|| response.error_message());
            return Err(fail(&mut state, link_failed(detail)));
        }
        state.advance(ProvisionState::Linked);
        log::info!(
            "Linked connector {} with credential {}",
            connector.id,
            credential.id
        );

        // Initial run
        let request = RunRequest::initial(connector.id);
        if let Some(detail) = self
            .service
            .run_connector(&request)
            .await
            .filter(|e| !e.is_empty())
        {
            return Err(fail(
                &mut state,
                ProvisionError::RunTriggerFailed { detail, partial },
            ));
        }
        state.advance(ProvisionState::RunTriggered);
        log::info!("Triggered initial run of connector {}", connector.id);

        Ok(ProvisionedSource {
            connector_id: connector.id,
            credential_id: credential.id,
            connector_name,
        })
    }
}

fn fail(state: &mut ProvisionState, error: ProvisionError) -> ProvisionError {
    log::error!("Provisioning failed while {}: {}", state, error);
    if let Some(partial) = error.partial() {
        match partial.credential_id {
            Some(credential_id) => log::warn!(
                "Connector {} and credential {} were created and remain on the platform",
                partial.connector_id,
                credential_id
            ),
            None => log::warn!(
                "Connector {} was created and remains on the platform",
                partial.connector_id
            ),
        }
    }
    state.advance(ProvisionState::Failed);
    error
}

/// Provision a folder source and report the outcome to `sink`.
///
/// Emits exactly one notification: the success message, or the message of
/// the first failed step. Returns true iff every step succeeded.
pub async fn provision_folder_source<S, N>(
    service: &S,
    input: &ProvisioningInput,
    sink: &mut N,
) -> bool
where
    S: ResourceService,
    N: NotificationSink + ?Sized,
{
    let outcome = Provisioner::new(service).provision(input).await;
    sink.notify(Notification::from_outcome(&outcome));
    outcome.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::{NotificationKind, SUCCESS_MESSAGE};
    use crate::resource::{AccessType, Connector, ConnectorOutcome, ResponseEnvelope};
    use eyre::Result;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        CreateConnector(ConnectorRequest),
        CreateCredential(CredentialRequest),
        Link(LinkRequest),
        Run(RunRequest),
    }

    /// In-memory resource service with scripted responses
    struct FakeService {
        connector: ConnectorOutcome,
        credential: ResponseEnvelope,
        link: ResponseEnvelope,
        run: Option<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeService {
        fn succeeding() -> Self {
            Self {
                connector: ConnectorOutcome::created(Connector {
                    id: 42,
                    name: "Docs".to_string(),
                }),
                credential: ResponseEnvelope::new(200, r#"{"id": 7}"#),
                link: ResponseEnvelope::new(200, r#"{"success": true}"#),
                run: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl ResourceService for FakeService {
        async fn create_connector(&self, request: &ConnectorRequest) -> ConnectorOutcome {
            self.record(Call::CreateConnector(request.clone()));
            self.connector.clone()
        }

        async fn create_credential(&self, request: &CredentialRequest) -> Result<ResponseEnvelope> {
            self.record(Call::CreateCredential(request.clone()));
            Ok(self.credential.clone())
        }

        async fn link_credential(&self, request: &LinkRequest) -> Result<ResponseEnvelope> {
            self.record(Call::Link(request.clone()));
            Ok(self.link.clone())
        }

        async fn run_connector(&self, request: &RunRequest) -> Option<String> {
            self.record(Call::Run(request.clone()));
            self.run.clone()
        }
    }

    fn docs_input() -> ProvisioningInput {
        ProvisioningInput::new("/data/docs", "Docs")
    }

    async fn run(service: &FakeService, input: &ProvisioningInput) -> (bool, Vec<Notification>) {
        let mut notifications = Vec::new();
        let mut sink = |n: Notification| notifications.push(n);
        let ok = provision_folder_source(service, input, &mut sink).await;
        (ok, notifications)
    }

    #[tokio::test]
    async fn test_blank_path_makes_no_calls() {
        let service = FakeService::succeeding();
        let (ok, notifications) = run(&service, &ProvisioningInput::new("  ", "Docs")).await;

        assert!(!ok);
        assert_eq!(
            notifications,
            vec![Notification::error("Folder path cannot be empty")]
        );
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_connector_failure_stops_workflow() {
        let service = FakeService {
            connector: ConnectorOutcome::failed("quota exceeded"),
            ..FakeService::succeeding()
        };
        let (ok, notifications) = run(&service, &docs_input()).await;

        assert!(!ok);
        assert_eq!(notifications.len(), 1);
        assert!(
            notifications[0]
                .message
                .contains("Unable to create connector - quota exceeded")
        );
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_connector_without_error_fails() {
        let service = FakeService {
            connector: ConnectorOutcome::default(),
            ..FakeService::succeeding()
        };
        let result = Provisioner::new(&service).provision(&docs_input()).await;

        assert!(matches!(
            result,
            Err(ProvisionError::ConnectorCreationFailed { .. })
        ));
        assert_eq!(service.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_connector_error_with_object_still_fails() {
        let service = FakeService {
            connector: ConnectorOutcome {
                error: Some("partially created".to_string()),
                connector: Some(Connector {
                    id: 42,
                    name: String::new(),
                }),
            },
            ..FakeService::succeeding()
        };
        let result = Provisioner::new(&service).provision(&docs_input()).await;

        assert_eq!(
            result,
            Err(ProvisionError::ConnectorCreationFailed {
                detail: "partially created".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_empty_connector_error_is_ignored() {
        let service = FakeService {
            connector: ConnectorOutcome {
                error: Some(String::new()),
                connector: Some(Connector {
                    id: 42,
                    name: "Docs".to_string(),
                }),
            },
            ..FakeService::succeeding()
        };
        let (ok, notifications) = run(&service, &docs_input()).await;

        assert!(ok);
        assert_eq!(notifications, vec![Notification::success(SUCCESS_MESSAGE)]);
        assert_eq!(service.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_empty_connector_error_without_object_fails() {
        let service = FakeService {
            connector: ConnectorOutcome {
                error: Some(String::new()),
                connector: None,
            },
            ..FakeService::succeeding()
        };
        let result = Provisioner::new(&service).provision(&docs_input()).await;

        assert_eq!(
            result,
            Err(ProvisionError::ConnectorCreationFailed {
                detail: "no connector returned".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_credential_failure_leaves_connector() {
        let service = FakeService {
            credential: ResponseEnvelope::new(400, "invalid name"),
            ..FakeService::succeeding()
        };
        let (ok, notifications) = run(&service, &docs_input()).await;

        assert!(!ok);
        assert_eq!(notifications.len(), 1);
        assert!(
            notifications[0]
                .message
                .contains("Error creating credential for CC Pair - invalid name")
        );

        let calls = service.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::CreateConnector(_)));
        assert!(matches!(calls[1], Call::CreateCredential(_)));

        let err = Provisioner::new(&service)
            .provision(&docs_input())
            .await
            .unwrap_err();
        assert_eq!(
            err.partial(),
            Some(&PartialProvision {
                connector_id: 42,
                credential_id: None
            })
        );
    }

    #[tokio::test]
    async fn test_unparsable_credential_body_fails() {
        let service = FakeService {
            credential: ResponseEnvelope::new(200, "created"),
            ..FakeService::succeeding()
        };
        let result = Provisioner::new(&service).provision(&docs_input()).await;

        assert!(matches!(
            result,
            Err(ProvisionError::CredentialCreationFailed { .. })
        ));
        assert_eq!(service.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_link_failure_reports_detail() {
        let service = FakeService {
            link: ResponseEnvelope::new(400, r#"{"detail":"access type mismatch"}"#),
            ..FakeService::succeeding()
        };
        let (ok, notifications) = run(&service, &docs_input()).await;

        assert!(!ok);
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("access type mismatch"));

        let calls = service.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[2],
            Call::Link(LinkRequest {
                connector_id: 42,
                credential_id: 7,
                name: "Docs".to_string(),
                access_type: AccessType::Public,
                groups: vec![],
            })
        );
    }

    #[tokio::test]
    async fn test_run_failure_reports_error() {
        let service = FakeService {
            run: Some("connector is paused".to_string()),
            ..FakeService::succeeding()
        };
        let result = Provisioner::new(&service).provision(&docs_input()).await;

        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to trigger initial run - connector is paused"
        );
        assert_eq!(err.last_state(), ProvisionState::Linked);
        assert_eq!(
            err.partial(),
            Some(&PartialProvision {
                connector_id: 42,
                credential_id: Some(7)
            })
        );
    }

    #[tokio::test]
    async fn test_empty_run_error_is_success() {
        let service = FakeService {
            run: Some(String::new()),
            ..FakeService::succeeding()
        };
        let (ok, notifications) = run(&service, &docs_input()).await;

        assert!(ok);
        assert_eq!(notifications[0].kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_full_success() {
        let service = FakeService::succeeding();
        let input = ProvisioningInput::new("  /data/docs  ", "Docs")
            .with_access_type(AccessType::Private)
            .with_groups(vec![3, 5]);
        let (ok, notifications) = run(&service, &input).await;

        assert!(ok);
        assert_eq!(notifications, vec![Notification::success(SUCCESS_MESSAGE)]);

        let calls = service.calls();
        assert_eq!(calls.len(), 4);

        let Call::CreateConnector(connector) = &calls[0] else {
            panic!("expected connector creation first, got {:?}", calls[0]);
        };
        assert!(connector.name.starts_with("Docs-"));
        assert_eq!(
            connector.connector_specific_config.folder_path,
            "/data/docs"
        );
        assert_eq!(connector.access_type, AccessType::Private);
        assert_eq!(connector.groups, vec![3, 5]);

        let Call::CreateCredential(credential) = &calls[1] else {
            panic!("expected credential creation second, got {:?}", calls[1]);
        };
        assert!(credential.credential_json.is_empty());
        assert!(credential.admin_public && credential.curator_public);
        assert_eq!(credential.groups, vec![3, 5]);
        assert_eq!(credential.name, "Docs");

        assert_eq!(
            calls[3],
            Call::Run(RunRequest {
                connector_id: 42,
                partitions: vec![0],
                from_beginning: false,
            })
        );
    }

    #[tokio::test]
    async fn test_success_returns_identifiers() {
        let service = FakeService::succeeding();
        let provisioned = Provisioner::new(&service)
            .provision(&docs_input())
            .await
            .unwrap();

        assert_eq!(provisioned.connector_id, 42);
        assert_eq!(provisioned.credential_id, 7);
        assert!(provisioned.connector_name.starts_with("Docs-"));
    }
}
