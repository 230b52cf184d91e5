use crate::auth::TokenIssuer;
use crate::error::FlowError;
use crate::identity::IdentityDeriver;
use enrol_common::models::user::{RegistrationInput, RegistrationResponse, UserRecord};
use enrol_db::UserStore;

/// Register (or re-register) a user and mint an access token.
///
/// 1. Reject input without a usable email.
/// 2. Derive the id from the email.
/// 3. Insert the record (last write wins).
/// 4. Re-read the id to confirm the record is stored.
/// 5. Issue a token bound to the stored record.
///
/// Nothing is written when step 1 fails.
#[tracing::instrument(skip_all)]
pub async fn register(
    store: &dyn UserStore,
    deriver: &IdentityDeriver,
    issuer: &TokenIssuer,
    input: RegistrationInput,
) -> Result<RegistrationResponse, FlowError> {
    let email = match input.usable_email() {
        Some(email) => email.to_string(),
        None => {
            tracing::warn!("Rejected registration without email");
            return Err(FlowError::InvalidInput("email is required".to_string()));
        }
    };

    let id = deriver.derive_id(&email)?;

    let record = UserRecord {
        id: id.clone(),
        first_name: input.first_name,
        last_name: input.last_name,
        email: Some(email),
        marketing_consent: input.marketing_consent,
    };
    store.insert(&record).await?;

    // Existence check: a token is only minted for a record we can read back.
    match store.find_by_id(&id).await? {
        Some(stored) if stored.id == id => {}
        _ => {
            tracing::warn!("User {} not found after insert, refusing to issue token", id);
            return Err(FlowError::Unauthorized);
        }
    }

    let email = record.email.as_deref().unwrap_or_default();
    let token = issuer.issue(&id, &record.first_name, email)?;

    tracing::info!("Registered user {}", id);

    Ok(RegistrationResponse {
        id,
        access_token: token.token,
    })
}
