//! Two-phase authorization code issuance: ticket acquisition, then code issuance

use crate::auth::models::{AuthorizationCodeEntity, AuthorizationCodeRequest, AuthorizationTicket};
use crate::provider::models::{
    AuthorizationIssueRequest, AuthorizationIssueResponse, AuthorizationResponse,
};
use crate::provider::{
    ProviderClient, ProviderError, AUTHORIZATION_ISSUE_PATH, AUTHORIZATION_PATH,
};
use log::{debug, warn};
use url::form_urlencoded;

impl ProviderClient {
    /// Issue an authorization code for the request.
    ///
    /// The second phase only starts once a ticket was obtained; a failure in
    /// either phase ends the attempt and the ticket is abandoned.
    pub async fn issue_authorization_code(
        &self,
        request: &AuthorizationCodeRequest,
    ) -> Result<AuthorizationCodeEntity, ProviderError> {
        let ticket = self.issue_authorization_ticket(request).await?;
        self.issue_code_for_ticket(&ticket, request).await
    }

    /// Phase one: obtain a ticket for the OAuth authorization request
    pub async fn issue_authorization_ticket(
        &self,
        request: &AuthorizationCodeRequest,
    ) -> Result<AuthorizationTicket, ProviderError> {
        debug!(
            "Requesting authorization ticket for client_id: {}",
            request.client_id
        );

        let form = [("parameters", authorization_parameters(request))];
        let response: AuthorizationResponse = self
            .post_form("issueAuthorizationTicket", AUTHORIZATION_PATH, &form)
            .await?;

        response.into_ticket().inspect_err(|e| {
            warn!(
                "Authorization ticket refused for client_id {}: {}",
                request.client_id, e
            )
        })
    }

    /// Phase two: redeem the ticket for an authorization code bound to the subject
    pub async fn issue_code_for_ticket(
        &self,
        ticket: &AuthorizationTicket,
        request: &AuthorizationCodeRequest,
    ) -> Result<AuthorizationCodeEntity, ProviderError> {
        let body = AuthorizationIssueRequest {
            ticket: ticket.as_str(),
            subject: &request.subject,
        };
        let response: AuthorizationIssueResponse = self
            .post_json("issueAuthorizationCode", AUTHORIZATION_ISSUE_PATH, &body)
            .await?;

        response.into_entity(&request.state).inspect_err(|e| {
            warn!(
                "Authorization code refused for client_id {}: {}",
                request.client_id, e
            )
        })
    }
}

/// Urlencoded OAuth authorization request passed as the `parameters` form field
fn authorization_parameters(request: &AuthorizationCodeRequest) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", &request.client_id.to_string())
        .append_pair("response_type", "code")
        .append_pair("state", &request.state)
        .append_pair("scope", &request.effective_scopes().join(" "))
        .append_pair("redirect_uri", request.redirect_uri.as_str())
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestFixture;
    use http::{Method, StatusCode};
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{basic_auth, body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn test_request() -> AuthorizationCodeRequest {
        AuthorizationCodeRequest {
            client_id: 2118736939631,
            state: "neko123456789".to_string(),
            redirect_uri: Url::parse("https://client.example.com/callback").unwrap(),
            subject: "98f46ad0-09e2-4324-910c-011df62e7307".to_string(),
            scopes: vec!["email".to_string(), "openid".to_string(), "prototype_clients".to_string()],
        }
    }

    #[test]
    fn test_authorization_parameters() {
        let parameters = authorization_parameters(&test_request());
        let pairs: Vec<(String, String)> = form_urlencoded::parse(parameters.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("client_id".to_string(), "2118736939631".to_string()),
                ("response_type".to_string(), "code".to_string()),
                ("state".to_string(), "neko123456789".to_string()),
                ("scope".to_string(), "openid email prototype_clients".to_string()),
                (
                    "redirect_uri".to_string(),
                    "https://client.example.com/callback".to_string()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_issue_authorization_code_success() {
        let fixture = TestFixture::new().await;

        Mock::given(method("POST"))
            .and(path(AUTHORIZATION_PATH))
            .and(basic_auth("test_api_key", "test_api_secret"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("parameters=client_id%3D2118736939631"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": "INTERACTION",
                "ticket": "ticket-123"
            })))
            .expect(1)
            .mount(&fixture.provider_mock)
            .await;

        Mock::given(method("POST"))
            .and(path(AUTHORIZATION_ISSUE_PATH))
            .and(basic_auth("test_api_key", "test_api_secret"))
            .and(body_json(json!({
                "ticket": "ticket-123",
                "subject": "98f46ad0-09e2-4324-910c-011df62e7307"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": "LOCATION",
                "authorizationCode": "code-abc",
                "responseContent": "https://client.example.com/callback?code=code-abc&state=neko123456789"
            })))
            .expect(1)
            .mount(&fixture.provider_mock)
            .await;

        let request = test_request();
        let entity = fixture
            .provider_client()
            .issue_authorization_code(&request)
            .await
            .expect("Failed to issue authorization code");

        assert_eq!(entity.code(), "code-abc");
        assert_eq!(entity.state(), request.state);

        fixture.provider_mock.verify().await;
    }

    #[tokio::test]
    async fn test_ticket_bad_request_skips_issue() {
        let fixture = TestFixture::new().await;

        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_PATH,
                json!({"action": "BAD_REQUEST", "resultMessage": "invalid client"}),
                StatusCode::OK,
                1,
            )
            .await;
        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_ISSUE_PATH,
                json!({"action": "LOCATION", "authorizationCode": "never"}),
                StatusCode::OK,
                0,
            )
            .await;

        let result = fixture
            .provider_client()
            .issue_authorization_code(&test_request())
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::Rejected(Some(message))) if message == "invalid client"
        ));
        fixture.provider_mock.verify().await;
    }

    #[tokio::test]
    async fn test_ticket_internal_server_error() {
        let fixture = TestFixture::new().await;

        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_PATH,
                json!({"action": "INTERNAL_SERVER_ERROR", "resultMessage": "provider down"}),
                StatusCode::OK,
                1,
            )
            .await;

        let result = fixture
            .provider_client()
            .issue_authorization_ticket(&test_request())
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::Failed(Some(message))) if message == "provider down"
        ));
        fixture.provider_mock.verify().await;
    }

    #[tokio::test]
    async fn test_non_success_status_wins_over_body() {
        let fixture = TestFixture::new().await;

        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_PATH,
                json!({"action": "BAD_REQUEST", "resultMessage": "invalid client"}),
                StatusCode::SERVICE_UNAVAILABLE,
                1,
            )
            .await;

        let result = fixture
            .provider_client()
            .issue_authorization_code(&test_request())
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::InvalidStatus(status)) if status == StatusCode::SERVICE_UNAVAILABLE
        ));
        fixture.provider_mock.verify().await;
    }

    #[tokio::test]
    async fn test_malformed_ticket_response() {
        let fixture = TestFixture::new().await;

        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_PATH,
                "Invalid JSON",
                StatusCode::OK,
                1,
            )
            .await;

        let result = fixture
            .provider_client()
            .issue_authorization_code(&test_request())
            .await;

        assert!(matches!(result, Err(ProviderError::ParseError(_))));
        fixture.provider_mock.verify().await;
    }

    #[tokio::test]
    async fn test_issue_phase_failures() {
        let fixture = TestFixture::new().await;

        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_PATH,
                json!({"action": "INTERACTION", "ticket": "ticket-123"}),
                StatusCode::OK,
                1,
            )
            .await;
        fixture
            .add_provider_mock(
                Method::POST,
                AUTHORIZATION_ISSUE_PATH,
                json!({"action": "FORM", "resultMessage": "unexpected action"}),
                StatusCode::OK,
                1,
            )
            .await;

        let result = fixture
            .provider_client()
            .issue_authorization_code(&test_request())
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::Failed(Some(message))) if message == "unexpected action"
        ));
        fixture.provider_mock.verify().await;
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_request_error() {
        let fixture = TestFixture::new().await;
        let mut config = fixture.config.provider.clone();
        // Nothing listens on the discard port
        config.api_url = "http://127.0.0.1:9".to_string();
        let client = ProviderClient::new(&config).expect("Failed to create provider client");

        let result = client.issue_authorization_code(&test_request()).await;

        assert!(matches!(result, Err(ProviderError::RequestError(_))));
    }
}
