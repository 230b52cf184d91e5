use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token.
///
/// `Id` and `jti` are fresh random values per token. `sub` is whatever the
/// issuer was configured to bind (first name by default, derived user id
/// otherwise), so it must not be used to look a user up unless the
/// deployment binds it to the user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "Id")]
    pub token_id: String,
    pub sub: String,
    pub email: String,
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}
