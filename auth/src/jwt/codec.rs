use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;
use crate::settings::AuthSettings;

/// Signs and verifies access tokens.
///
/// HS256 over the configured secret. Validation runs with zero leeway and then
/// re-checks expiry strictly, so a token is dead at its `exp` second.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from validated settings.
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret()),
            decoding_key: DecodingKey::from_secret(settings.secret()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims::for_subject(subject, Utc::now(), ttl);
        self.encode_claims(&claims)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn encode_claims(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - `exp` is not strictly in the future
    /// * `BadSignature` - Signed with another secret or altered
    /// * `MissingSubject` - No `sub` claim
    /// * `Malformed` - Not a JWT, wrong algorithm, or undecodable payload
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)?.claims;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// Same as [`TokenCodec::decode`], plus `MissingSubject` for an empty subject.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.decode(token)?;

        claims
            .subject()
            .map(str::to_string)
            .ok_or(TokenError::MissingSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HashCost;

    fn codec_with(secret: &str) -> TokenCodec {
        let settings =
            AuthSettings::new(secret, Duration::minutes(30), HashCost::default()).unwrap();
        TokenCodec::new(&settings)
    }

    fn codec() -> TokenCodec {
        codec_with("my_secret_key_at_least_32_bytes_long!")
    }

    /// Replace one character in the middle of the payload segment.
    fn tamper(token: &str) -> String {
        let payload_start = token.find('.').unwrap() + 1;
        let payload_end = token[payload_start..].find('.').unwrap() + payload_start;
        let position = (payload_start + payload_end) / 2;

        let mut chars: Vec<char> = token.chars().collect();
        chars[position] = if chars[position] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }

    #[test]
    fn test_issue_and_validate() {
        let codec = codec();

        let token = codec
            .issue("a@example.com", Duration::minutes(30))
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let subject = codec.validate(&token).expect("Failed to validate token");
        assert_eq!(subject, "a@example.com");
    }

    #[test]
    fn test_issued_expiry_matches_ttl() {
        let codec = codec();

        let token = codec.issue("a@example.com", Duration::seconds(90)).unwrap();
        let claims = codec.decode(&token).unwrap();

        assert_eq!(claims.exp - claims.iat.unwrap(), 90);
    }

    #[test]
    fn test_validate_expires_after_ttl() {
        let codec = codec();

        let token = codec.issue("a@example.com", Duration::seconds(2)).unwrap();
        assert!(codec.validate(&token).is_ok());

        std::thread::sleep(std::time::Duration::from_millis(3100));

        assert_eq!(codec.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_rejects_past_expiry() {
        let codec = codec();
        let now = Utc::now().timestamp();

        let token = codec
            .encode_claims(&Claims {
                sub: Some("a@example.com".to_string()),
                exp: now - 10,
                iat: Some(now - 100),
            })
            .unwrap();

        assert_eq!(codec.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_rejects_expiry_at_now() {
        let codec = codec();
        let now = Utc::now().timestamp();

        let token = codec
            .encode_claims(&Claims {
                sub: Some("a@example.com".to_string()),
                exp: now,
                iat: Some(now - 100),
            })
            .unwrap();

        assert_eq!(codec.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_validate_rejects_tampered_token() {
        let codec = codec();

        let token = codec.issue("a@example.com", Duration::minutes(30)).unwrap();
        let tampered = tamper(&token);

        assert_ne!(token, tampered);
        assert!(codec.validate(&tampered).is_err());
    }

    #[test]
    fn test_validate_rejects_other_secret() {
        let issuer = codec_with("secret1_at_least_32_bytes_long_key!");
        let verifier = codec_with("secret2_at_least_32_bytes_long_key!");

        let token = issuer.issue("a@example.com", Duration::minutes(30)).unwrap();

        assert_eq!(verifier.validate(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_validate_rejects_missing_subject() {
        let codec = codec();
        let now = Utc::now().timestamp();

        let without_sub = codec
            .encode_claims(&Claims {
                sub: None,
                exp: now + 600,
                iat: Some(now),
            })
            .unwrap();
        let empty_sub = codec
            .encode_claims(&Claims {
                sub: Some(String::new()),
                exp: now + 600,
                iat: Some(now),
            })
            .unwrap();

        assert_eq!(codec.validate(&without_sub), Err(TokenError::MissingSubject));
        assert_eq!(codec.validate(&empty_sub), Err(TokenError::MissingSubject));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let codec = codec();

        for token in ["", "invalid.token.here", "not-a-token"] {
            assert!(matches!(
                codec.validate(token),
                Err(TokenError::Malformed(_))
            ));
        }
    }
}
