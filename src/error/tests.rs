//! # 错误处理测试

use crate::error::{AuthError, ChirpyError, ErrorCategory, GENERIC_ERROR_MESSAGE};
use axum::http::StatusCode;
use std::error::Error;

#[test]
fn test_status_codes_are_distinguishable() {
    let unauthorized = ChirpyError::unauthorized("Unauthorized");
    let forbidden = ChirpyError::forbidden("not your chirp");
    let not_found = ChirpyError::not_found("Chirp", "42");

    assert_eq!(unauthorized.to_http_response_parts().0, StatusCode::UNAUTHORIZED);
    assert_eq!(forbidden.to_http_response_parts().0, StatusCode::FORBIDDEN);
    assert_eq!(not_found.to_http_response_parts().0, StatusCode::NOT_FOUND);
    assert_eq!(
        ChirpyError::validation("bad").to_http_response_parts().0,
        StatusCode::BAD_REQUEST
    );
}

#[test]
fn test_server_errors_hide_details() {
    let err = ChirpyError::internal_with_source(
        "signing failed with secret s3cr3t",
        std::io::Error::other("boom"),
    );

    assert_eq!(err.category(), ErrorCategory::Server);
    assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);
    assert!(err.source().is_some());
}

#[test]
fn test_client_errors_keep_message() {
    let err = ChirpyError::validation("Chirp is too long");
    assert_eq!(err.category(), ErrorCategory::Client);
    assert_eq!(err.public_message(), "Chirp is too long");

    let err = ChirpyError::not_found("User", "a@b.com");
    assert_eq!(err.public_message(), "User not found: a@b.com");
}

#[test]
fn test_auth_error_conversion() {
    let err: ChirpyError = AuthError::MissingCredential("Authorization header").into();
    assert!(matches!(err, ChirpyError::Unauthorized { .. }));
    // 具体原因只保留在 source 中
    assert_eq!(err.public_message(), "Unauthorized");
    assert!(err.source().is_some());

    let err: ChirpyError = AuthError::TokenExpired.into();
    assert!(matches!(err, ChirpyError::Unauthorized { .. }));

    let err: ChirpyError = AuthError::Hashing(bcrypt::BcryptError::InvalidHash(
        "not-a-hash".to_string(),
    ))
    .into();
    assert!(matches!(err, ChirpyError::Internal { .. }));
    assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
    let err: ChirpyError = io_err.into();
    assert!(matches!(err, ChirpyError::Io { .. }));
    assert_eq!(err.category(), ErrorCategory::Server);
}

#[test]
fn test_error_macros() {
    let err = crate::validation_error!("field {} is empty", "email");
    assert_eq!(err.to_string(), "field email is empty");

    let err = crate::config_error!("port {} is invalid", 0);
    assert!(matches!(err, ChirpyError::Config { .. }));
}

#[test]
fn test_password_too_long_is_validation() {
    let err: ChirpyError = AuthError::PasswordTooLong { max: 72 }.into();
    assert!(matches!(err, ChirpyError::Validation { .. }));
    assert_eq!(err.public_message(), "Password must be at most 72 bytes");
}
