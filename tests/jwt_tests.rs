//! JWT 令牌签发与验证测试

use chrono::Duration;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::Secret;

use commerce_system::auth::jwt::{Claims, JwtService, TokenError};

mod common;
use common::create_test_config;

#[test]
fn test_issue_and_verify_round_trip() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let token = service.issue_access_token(42).unwrap();

    // 三段式紧凑格式：header.claims.signature
    assert_eq!(token.split('.').count(), 3);

    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.sub, "42");
    assert!(claims.exp > claims.iat);
}

#[test]
fn test_subject_is_carried_as_string() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let token = service.issue_access_token(9007199254740993).unwrap();
    let claims = service.verify(&token).unwrap();

    // 数值型用户 ID 以字符串承载
    assert_eq!(claims.sub, "9007199254740993");
}

#[test]
fn test_expired_token_fails_with_expiry_error() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let token = service.issue(42, Duration::seconds(-5)).unwrap();

    assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
}

#[test]
fn test_token_signed_with_different_secret_fails() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let mut other_config = create_test_config();
    other_config.security.jwt_secret =
        Secret::new("another_secret_key_32_characters_x!".to_string());
    let other_service = JwtService::from_config(&other_config).unwrap();

    let foreign_token = other_service.issue_access_token(42).unwrap();

    assert!(matches!(
        service.verify(&foreign_token),
        Err(TokenError::InvalidSignature)
    ));
}

#[test]
fn test_token_signed_with_different_algorithm_fails() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    // 同一密钥但使用 HS384 签名，验证端只接受 HS256
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: "42".to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(15)).timestamp(),
        jti: "test-jti".to_string(),
    };
    let token = encode(
        &Header::new(Algorithm::HS384),
        &claims,
        &EncodingKey::from_secret("test_secret_key_32_characters_long!".as_bytes()),
    )
    .unwrap();

    assert!(service.verify(&token).is_err());
}

#[test]
fn test_unsigned_token_fails() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    // alg=none 的令牌（无签名段）必须被拒绝
    let none_token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJzdWIiOiI0MiIsImV4cCI6OTk5OTk5OTk5OX0.";

    assert!(service.verify(none_token).is_err());
}

#[test]
fn test_malformed_token_fails() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    assert!(matches!(
        service.verify("not-a-jwt"),
        Err(TokenError::Malformed)
    ));
    assert!(service.verify("").is_err());
}

#[test]
fn test_tampered_token_fails() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let token = service.issue_access_token(42).unwrap();

    // 篡改 payload 的一个字符
    let mut parts: Vec<String> = token.split('.').map(|s| s.to_string()).collect();
    let mut payload: Vec<u8> = parts[1].clone().into_bytes();
    payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
    parts[1] = String::from_utf8(payload).unwrap();
    let tampered = parts.join(".");

    assert!(service.verify(&tampered).is_err());
}

#[test]
fn test_two_tokens_for_same_subject_differ() {
    let service = JwtService::from_config(&create_test_config()).unwrap();

    let first = service.issue_access_token(42).unwrap();
    let second = service.issue_access_token(42).unwrap();

    // jti 保证同一 subject 连续签发的令牌不同
    assert_ne!(first, second);
}
