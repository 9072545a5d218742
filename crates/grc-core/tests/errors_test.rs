//! Tests for error codes and conversions.

use grc_core::errors::error_code;
use grc_core::errors::{GrcError, GrcErrorCode, StorageError, ValidationError};

#[test]
fn test_subsystem_errors_convert_with_codes() {
    let err: GrcError = ValidationError::Required { field: "description" }.into();
    assert_eq!(err.error_code(), error_code::VALIDATION_ERROR);
    assert!(err.is_client_error());
    assert_eq!(err.to_string(), "Validation error: description is required");

    let err: GrcError = StorageError::SqliteError {
        message: "disk I/O error".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::STORAGE_ERROR);
    assert!(!err.is_client_error());
}

#[test]
fn test_constraint_violation_is_a_conflict() {
    let err: GrcError = StorageError::ConstraintViolation {
        message: "UNIQUE constraint failed: risks.risk_id".to_string(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFLICT);
    assert!(err.is_client_error());
}

#[test]
fn test_not_found_message() {
    let err = GrcError::not_found("risk", 99);
    assert_eq!(err.error_code(), error_code::NOT_FOUND);
    assert_eq!(err.to_string(), "risk 99 not found");
}

#[test]
fn test_out_of_range_message_names_bounds() {
    let err = ValidationError::OutOfRange {
        field: "impact",
        value: 7,
        min: 1,
        max: 5,
    };
    assert_eq!(err.to_string(), "impact must be between 1 and 5, got 7");
}
