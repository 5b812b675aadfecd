use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

use crate::models::Claims;

pub const ADMIN_SUBJECT: &str = "admin";

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as usize)
        .unwrap_or_default()
}

pub fn generate_admin_token(secret: &str, ttl: usize) -> Result<(String, Claims), Error> {
    let claims = Claims {
        sub: ADMIN_SUBJECT.to_string(),
        exp: now().saturating_add(ttl),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, claims))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
    .and_then(|claims| {
        if claims.sub == ADMIN_SUBJECT {
            Ok(claims)
        } else {
            Err("token subject is not the admin session".to_string())
        }
    })
}
