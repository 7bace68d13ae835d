use solar_quote_backend::util::jwt::*;
use solar_quote_backend::config::JwtConfig;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};

fn create_test_jwt_utils() -> JwtTokenUtilsImpl {
    JwtTokenUtilsImpl::new(JwtConfig::default())
}

struct TestUser {
    id: String,
    email: String,
    role: String,
}

impl TestUser {
    fn new_user() -> Self {
        Self {
            id: "user123".to_string(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    fn new_admin() -> Self {
        Self {
            id: "admin456".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }
}

fn sign(claims: &Claims, secret: &str) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_ref())).unwrap()
}

#[test]
fn test_generate_and_validate_access_token() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_user();

    let token = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    let claims = jwt_utils.validate_access_token(&token).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, user.email);
    assert_eq!(claims.role, user.role);
    assert_eq!(claims.token_type, "access");
    assert!(claims.exp > Utc::now().timestamp());
    assert_eq!(claims.exp - claims.iat, 60 * 60);
}

#[test]
fn test_tokens_have_unique_ids() {
    let jwt_utils = create_test_jwt_utils();
    let user = TestUser::new_admin();
    let a = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    let b = jwt_utils.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    let jti_a = jwt_utils.validate_access_token(&a).unwrap().jti;
    let jti_b = jwt_utils.validate_access_token(&b).unwrap().jti;
    assert_ne!(jti_a, jti_b);
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let jwt_utils = create_test_jwt_utils();
    let other = JwtTokenUtilsImpl::new(JwtConfig {
        jwt_secret: "another_secret_key_that_is_also_long_enough_for_hs256".to_string(),
        ..JwtConfig::default()
    });
    let user = TestUser::new_user();
    let token = other.generate_access_token(&user.id, &user.email, &user.role).unwrap();
    assert!(matches!(jwt_utils.validate_access_token(&token), Err(JwtError::DecodingFailed(_))));
}

#[test]
fn test_expired_token_is_rejected() {
    let jwt_utils = create_test_jwt_utils();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "user123".to_string(),
        email: "user@example.com".to_string(),
        role: "user".to_string(),
        iat: now - 7200,
        exp: now - 3600,
        token_type: "access".to_string(),
        jti: "expired".to_string(),
    };
    let token = sign(&claims, &jwt_utils.jwt_config.jwt_secret);
    assert!(matches!(jwt_utils.validate_access_token(&token), Err(JwtError::TokenExpired)));
}

#[test]
fn test_refresh_token_type_is_rejected() {
    let jwt_utils = create_test_jwt_utils();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "user123".to_string(),
        email: "user@example.com".to_string(),
        role: "admin".to_string(),
        iat: now,
        exp: now + 600,
        token_type: "refresh".to_string(),
        jti: "refresh".to_string(),
    };
    let token = sign(&claims, &jwt_utils.jwt_config.jwt_secret);
    assert!(matches!(
        jwt_utils.validate_access_token(&token),
        Err(JwtError::InvalidTokenType { .. })
    ));
}

#[test]
fn test_extract_token_from_header() {
    let jwt_utils = create_test_jwt_utils();
    assert_eq!(jwt_utils.extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    assert_eq!(jwt_utils.extract_token_from_header("Bearer   abc  ").unwrap(), "abc");
    assert!(jwt_utils.extract_token_from_header("Basic abc").is_err());
    assert!(jwt_utils.extract_token_from_header("Bearer ").is_err());
    assert!(jwt_utils.extract_token_from_header("").is_err());
}

#[test]
fn test_current_user() {
    let jwt_utils = create_test_jwt_utils();
    let admin = TestUser::new_admin();
    let token = jwt_utils.generate_access_token(&admin.id, &admin.email, &admin.role).unwrap();

    let user = jwt_utils.current_user(Some(&format!("Bearer {}", token))).unwrap();
    assert_eq!(user.email, "admin@example.com");
    assert!(user.is_admin());

    assert!(jwt_utils.current_user(None).is_none());
    assert!(jwt_utils.current_user(Some("Bearer garbage")).is_none());
}
