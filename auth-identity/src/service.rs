use crate::{config::CredentialPolicy, error::*, models::*, repository::AccountStore};
use error_common::codes;
use logger_redacted::redact;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Find-or-create resolution of local accounts for external identities.
///
/// Sign-in with the derived credentials comes first; only when it fails is an
/// account created, followed by a second sign-in and a best-effort registry
/// upsert. Repeat logins therefore never write to the store.
pub struct AccountResolver {
    store: Arc<dyn AccountStore>,
    policy: CredentialPolicy,
    default_role: String,
}

impl AccountResolver {
    pub fn new(
        store: Arc<dyn AccountStore>,
        policy: CredentialPolicy,
        default_role: impl Into<String>,
    ) -> Self {
        Self {
            store,
            policy,
            default_role: default_role.into(),
        }
    }

    pub fn credentials_for(&self, external_user_id: &str) -> DerivedCredentials {
        self.policy.derive(external_user_id)
    }

    #[instrument(skip_all, fields(provider = %profile.provider))]
    pub async fn resolve(&self, profile: &AccountProfile) -> Result<ResolvedAccount> {
        let credentials = self.credentials_for(&profile.external_user_id);

        // Sign-in failure does not tell "unknown account" apart from a
        // transient store error; both fall through to creation.
        match self
            .store
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await
        {
            Ok(session) => {
                debug!("Signed in existing account");
                return Ok(ResolvedAccount {
                    session,
                    created: false,
                });
            }
            Err(err) => {
                info!(reason = %redact(&err.to_string()), "Sign-in with derived credentials failed, creating account");
            }
        }

        let account = NewAccount {
            email: credentials.email.clone(),
            password: SecretString::new(credentials.password.expose_secret().clone()),
            email_confirm: true,
            user_metadata: UserMetadata::from(profile),
        };

        let created = self.store.create_user(&account).await.map_err(|err| {
            let message = match err {
                IdentityError::StoreStatus { message, .. } => message,
                other => other.to_string(),
            };
            warn!(
                code = codes::account::CREATION_FAILED,
                reason = %redact(&message),
                "Account creation failed"
            );
            IdentityError::AccountCreationFailed(message)
        })?;

        info!(account_id = %created.id, "Created account for external identity");

        let signed_in = self
            .store
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await;

        let row = RegistryRow {
            id: created.id.clone(),
            email: credentials.email,
            full_name: profile.display_name.clone(),
            role: self.default_role.clone(),
        };

        // Best effort; the account is usable without its registry row
        if let Err(err) = self.store.upsert_user_row(&row).await {
            warn!(
                code = codes::account::REGISTRY_UPSERT_FAILED,
                account_id = %created.id,
                error = %redact(&err.to_string()),
                "Registry upsert failed, continuing with login"
            );
        }

        let session = signed_in.map_err(|err| {
            warn!(
                code = codes::account::SESSION_UNAVAILABLE,
                account_id = %created.id,
                "Sign-in after account creation failed"
            );
            IdentityError::SessionUnavailable(err.to_string())
        })?;

        Ok(ResolvedAccount {
            session,
            created: true,
        })
    }
}
