use crate::auth::models::AccessTokenEntity;
use crate::auth::service::AccessTokenRepository;
use crate::errors::AuthError;
use crate::provider::models::{IntrospectionRequest, IntrospectionResponse};
use crate::provider::{ProviderClient, INTROSPECTION_PATH};
use async_trait::async_trait;
use log::debug;

#[async_trait]
impl AccessTokenRepository for ProviderClient {
    async fn fetch(&self, token: &str) -> Result<AccessTokenEntity, AuthError> {
        let body = IntrospectionRequest { token };
        let response: IntrospectionResponse = self
            .post_json("introspection", INTROSPECTION_PATH, &body)
            .await?;

        let entity = response.into_entity(token)?;
        debug!(
            "Access token introspected for subject: {}",
            entity.subject.as_deref().unwrap_or("-")
        );
        Ok(entity)
    }
}
