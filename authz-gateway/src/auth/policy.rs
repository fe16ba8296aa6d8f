use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const POLICY_VERSION: &str = "2012-10-17";
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

/// Effect of a capability decision
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Allow,
    Deny,
}

/// A single policy statement granting or denying invocation of a resource
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}

/// Policy document of a decision, serialized as `{}` when no statement applies
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PolicyDocument {
    #[serde(rename_all = "PascalCase")]
    Statements {
        version: String,
        statement: Vec<Statement>,
    },
    Empty {},
}

/// Allow/deny verdict returned to the entity enforcing access
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDecision {
    /// Principal the decision applies to
    pub principal_id: String,
    /// `{Version, Statement}` or `{}` when no statement applies
    #[schema(value_type = Object)]
    pub policy_document: PolicyDocument,
}

impl CapabilityDecision {
    /// The single statement of a full decision
    pub fn statement(&self) -> Option<&Statement> {
        match &self.policy_document {
            PolicyDocument::Statements { statement, .. } => statement.first(),
            PolicyDocument::Empty {} => None,
        }
    }
}

/// Build the decision for a principal.
///
/// Both `effect` and a non-empty `resource` yield a full document with exactly
/// one invoke statement; otherwise the document is empty.
pub fn build_policy(
    principal_id: &str,
    effect: Option<Effect>,
    resource: Option<&str>,
) -> CapabilityDecision {
    let policy_document = match (effect, resource.filter(|r| !r.is_empty())) {
        (Some(effect), Some(resource)) => PolicyDocument::Statements {
            version: POLICY_VERSION.to_string(),
            statement: vec![Statement {
                action: INVOKE_ACTION.to_string(),
                effect,
                resource: resource.to_string(),
            }],
        },
        _ => PolicyDocument::Empty {},
    };

    CapabilityDecision {
        principal_id: principal_id.to_string(),
        policy_document,
    }
}

/// Assigns the provisional effect of a presented credential
pub trait CredentialClassifier: Send + Sync {
    fn classify(&self, credential: &str) -> Result<Effect, AuthError>;
}

/// Classifies by literal marker: `deny` denies, `error` fails, anything else is allowed
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerClassifier;

impl CredentialClassifier for MarkerClassifier {
    fn classify(&self, credential: &str) -> Result<Effect, AuthError> {
        match credential {
            "deny" => Ok(Effect::Deny),
            "error" => Err(AuthError::InternalServerError(None)),
            _ => Ok(Effect::Allow),
        }
    }
}
