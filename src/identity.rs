use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::types::AttributeType;
use aws_sdk_cognitoidentityprovider::Client;
use base64::{engine::general_purpose, Engine};
use ring::hmac;
use tracing::debug;

use crate::config::Config;
use crate::error::ProviderError;
use crate::model::Account;

/// Account management, delegated to an external identity provider.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Registers a new account and returns its provider-assigned id.
    async fn create_account(&self, email: &str, password: &str)
        -> Result<String, ProviderError>;
    /// Looks an existing account up by email.
    async fn find_account_by_email(&self, email: &str) -> Result<Account, ProviderError>;
}

/// Identity gateway backed by a Cognito user pool. Accounts are keyed by
/// email; the pool's app client requires a per-user secret hash.
pub struct CognitoIdentityGateway {
    client: Client,
    user_pool_id: String,
    client_id: String,
    client_secret: String,
}

impl CognitoIdentityGateway {
    /// Builds the gateway from ambient AWS credentials and the app config.
    pub async fn from_env(config: &Config) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        Self {
            client: Client::new(&sdk_config),
            user_pool_id: config.user_pool_id.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl IdentityGateway for CognitoIdentityGateway {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, ProviderError> {
        let secret_hash = generate_secret_hash(&self.client_secret, email, &self.client_id);

        let email_attribute = AttributeType::builder()
            .name("email")
            .value(email)
            .build()
            .map_err(|err| ProviderError::Identity(err.to_string()))?;

        let response = self
            .client
            .sign_up()
            .client_id(&self.client_id)
            .secret_hash(secret_hash)
            .username(email)
            .password(password)
            .user_attributes(email_attribute)
            .send()
            .await
            .map_err(|err| ProviderError::Identity(err.to_string()))?;

        debug!(confirmed = response.user_confirmed(), "account created");
        Ok(response.user_sub().to_string())
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Account, ProviderError> {
        let response = self
            .client
            .list_users()
            .user_pool_id(&self.user_pool_id)
            .filter(format!("email = \"{email}\""))
            .limit(1)
            .send()
            .await
            .map_err(|err| ProviderError::Identity(err.to_string()))?;

        let user = response
            .users()
            .first()
            .ok_or_else(|| ProviderError::Identity(format!("no account matches {email}")))?;

        // Prefer the pool's immutable `sub` attribute as the account id.
        let id = user
            .attributes()
            .iter()
            .find(|attribute| attribute.name() == "sub")
            .and_then(|attribute| attribute.value())
            .or_else(|| user.username())
            .ok_or_else(|| ProviderError::Identity("account record carries no id".to_string()))?;

        Ok(Account {
            id: id.to_string(),
            email: email.to_string(),
        })
    }
}

fn generate_secret_hash(client_secret: &str, user_name: &str, client_id: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, client_secret.as_bytes());
    let msg = [user_name.as_bytes(), client_id.as_bytes()].concat();

    let signature = hmac::sign(&key, &msg);

    general_purpose::STANDARD.encode(signature.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_hash_is_stable_for_the_same_inputs() {
        let a = generate_secret_hash("secret", "a@example.com", "client");
        let b = generate_secret_hash("secret", "a@example.com", "client");
        assert_eq!(a, b);

        let c = generate_secret_hash("secret", "b@example.com", "client");
        assert_ne!(a, c);
    }
}
