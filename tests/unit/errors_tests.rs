/*!
 * Tests for error types and conversions
 */

use assedit::document::LineId;
use assedit::errors::{AppError, ConfigError, EditError};

#[test]
fn test_editError_noActiveLine_shouldDisplayCorrectly() {
    let display = format!("{}", EditError::NoActiveLine);
    assert!(display.contains("No active line"));
}

#[test]
fn test_editError_unknownLine_shouldIncludeLineId() {
    let display = format!("{}", EditError::UnknownLine(LineId(42)));
    assert!(display.contains("line 42"));
}

#[test]
fn test_editError_invalidColor_shouldIncludeLiteral() {
    let display = format!("{}", EditError::InvalidColor("&Hxyz&".to_string()));
    assert!(display.contains("&Hxyz&"));
}

#[test]
fn test_appError_fromEditError_shouldWrap() {
    let error: AppError = EditError::UnknownFlag("blink".to_string()).into();
    assert!(matches!(error, AppError::Edit(EditError::UnknownFlag(_))));
    assert!(error.to_string().contains("blink"));
}

#[test]
fn test_appError_fromConfigError_shouldWrap() {
    let error: AppError = ConfigError::Invalid("zero window".to_string()).into();
    assert!(matches!(error, AppError::Config(_)));
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
    let error: AppError = io.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref msg) if msg == "boom"));
}
