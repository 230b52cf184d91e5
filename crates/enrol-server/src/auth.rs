use crate::config::{AuthConfig, SubjectClaim};
use chrono::{DateTime, Duration, Utc};
use enrol_common::models::auth::Claims;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token claims do not match: {0}")]
    ClaimMismatch(String),
    #[error("failed to sign token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),
}

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct AuthToken {
    pub subject_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub token: String,
}

/// Mints HS256 access tokens for registered users.
pub struct TokenIssuer {
    key: EncodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
    subject: SubjectClaim,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::seconds(i64::from(
                u32::try_from(config.token_ttl_secs).unwrap_or(u32::MAX),
            )),
            subject: config.subject,
        }
    }

    pub fn issue(
        &self,
        subject_id: &str,
        first_name: &str,
        email: &str,
    ) -> Result<AuthToken, AuthError> {
        self.issue_at(subject_id, first_name, email, Utc::now())
    }

    /// Issue a token as if minted at `now`.
    pub fn issue_at(
        &self,
        subject_id: &str,
        first_name: &str,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<AuthToken, AuthError> {
        let expires_at = now + self.ttl;
        let sub = match self.subject {
            SubjectClaim::FirstName => first_name,
            SubjectClaim::UserId => subject_id,
        };
        let claims = Claims {
            token_id: uuid::Uuid::new_v4().to_string(),
            sub: sub.to_string(),
            email: email.to_string(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(AuthError::Encode)?;
        Ok(AuthToken {
            subject_id: subject_id.to_string(),
            issued_at: now,
            expires_at,
            token,
        })
    }
}

/// Checks signature, issuer and audience. Expiry is only enforced when
/// `validate_lifetime` is set.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.validate_exp = config.validate_lifetime;
        validation.validate_nbf = config.validate_lifetime;
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        match jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::InvalidIssuer => AuthError::ClaimMismatch("issuer".to_string()),
                ErrorKind::InvalidAudience => AuthError::ClaimMismatch("audience".to_string()),
                ErrorKind::ExpiredSignature => AuthError::ClaimMismatch("expired".to_string()),
                ErrorKind::ImmatureSignature => {
                    AuthError::ClaimMismatch("not yet valid".to_string())
                }
                ErrorKind::MissingRequiredClaim(claim) => {
                    AuthError::ClaimMismatch(format!("missing {}", claim))
                }
                // signature checked out but the payload is not our claim set
                ErrorKind::Json(e) => AuthError::ClaimMismatch(format!("malformed claims: {}", e)),
                _ => AuthError::InvalidSignature,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            issuer: "enrol".to_string(),
            audience: "enrol-clients".to_string(),
            jwt_secret: "test-jwt-secret".to_string(),
            id_salt: "salt".to_string(),
            token_ttl_secs: 300,
            validate_lifetime: false,
            subject: SubjectClaim::FirstName,
        }
    }

    #[test]
    fn test_jwt_issue_and_verify() {
        let config = test_config();
        let token = TokenIssuer::new(&config)
            .issue("user-123", "Ada", "ada@example.com")
            .unwrap();
        let claims = TokenVerifier::new(&config).verify(&token.token).unwrap();
        assert_eq!(claims.sub, "Ada");
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.iss, "enrol");
        assert_eq!(claims.aud, "enrol-clients");
        assert_eq!(claims.exp - claims.iat, 300);
        assert_eq!(token.subject_id, "user-123");
        assert_eq!(token.expires_at - token.issued_at, Duration::minutes(5));
    }

    #[test]
    fn test_jwt_random_ids_per_token() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);
        let one = verifier
            .verify(&issuer.issue("user-123", "Ada", "a@example.com").unwrap().token)
            .unwrap();
        let two = verifier
            .verify(&issuer.issue("user-123", "Ada", "a@example.com").unwrap().token)
            .unwrap();
        assert_ne!(one.jti, two.jti);
        assert_ne!(one.token_id, two.token_id);
        assert_ne!(one.token_id, "user-123");
    }

    #[test]
    fn test_jwt_subject_bound_to_user_id() {
        let mut config = test_config();
        config.subject = SubjectClaim::UserId;
        let token = TokenIssuer::new(&config)
            .issue("user-123", "Ada", "ada@example.com")
            .unwrap();
        let claims = TokenVerifier::new(&config).verify(&token.token).unwrap();
        assert_eq!(claims.sub, "user-123");
    }

    #[test]
    fn test_jwt_wrong_secret_fails() {
        let config = test_config();
        let token = TokenIssuer::new(&config)
            .issue("user-123", "Ada", "ada@example.com")
            .unwrap();
        let mut other = test_config();
        other.jwt_secret = "different-secret".to_string();
        let result = TokenVerifier::new(&other).verify(&token.token);
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_jwt_signed_payload_missing_claims() {
        let config = test_config();
        let now = Utc::now().timestamp();
        let payload = serde_json::json!({
            "sub": "Ada",
            "email": "ada@example.com",
            "iss": "enrol",
            "aud": "enrol-clients",
            "iat": now,
            "exp": now + 300,
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();
        let result = TokenVerifier::new(&config).verify(&token);
        assert!(matches!(result, Err(AuthError::ClaimMismatch(_))));
    }

    #[test]
    fn test_jwt_garbage_fails() {
        let result = TokenVerifier::new(&test_config()).verify("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_jwt_issuer_mismatch() {
        let mut config = test_config();
        config.issuer = "someone-else".to_string();
        let token = TokenIssuer::new(&config)
            .issue("user-123", "Ada", "ada@example.com")
            .unwrap();
        let result = TokenVerifier::new(&test_config()).verify(&token.token);
        assert!(matches!(result, Err(AuthError::ClaimMismatch(_))));
    }

    #[test]
    fn test_jwt_audience_mismatch() {
        let mut config = test_config();
        config.audience = "other-clients".to_string();
        let token = TokenIssuer::new(&config)
            .issue("user-123", "Ada", "ada@example.com")
            .unwrap();
        let result = TokenVerifier::new(&test_config()).verify(&token.token);
        assert!(matches!(result, Err(AuthError::ClaimMismatch(_))));
    }

    #[test]
    fn test_jwt_expired_token_still_accepted_by_default() {
        let config = test_config();
        let an_hour_ago = Utc::now() - Duration::hours(1);
        let token = TokenIssuer::new(&config)
            .issue_at("user-123", "Ada", "ada@example.com", an_hour_ago)
            .unwrap();
        assert!(token.expires_at < Utc::now());
        let claims = TokenVerifier::new(&config).verify(&token.token).unwrap();
        assert_eq!(claims.sub, "Ada");
    }

    #[test]
    fn test_jwt_expired_token_rejected_with_lifetime_validation() {
        let mut config = test_config();
        config.validate_lifetime = true;
        let an_hour_ago = Utc::now() - Duration::hours(1);
        let token = TokenIssuer::new(&config)
            .issue_at("user-123", "Ada", "ada@example.com", an_hour_ago)
            .unwrap();
        let verifier = TokenVerifier::new(&config);
        assert!(matches!(
            verifier.verify(&token.token),
            Err(AuthError::ClaimMismatch(_))
        ));

        let fresh = TokenIssuer::new(&config)
            .issue("user-123", "Ada", "ada@example.com")
            .unwrap();
        assert!(verifier.verify(&fresh.token).is_ok());
    }
}
