use super::error::SubmitError;
use super::types::{NavigationTarget, QueryEncoding, RawResponse, UploadResult};
use serde_json::Value;
use tracing::{debug, warn};

const SUCCESS: &str = "success";

/// Reads a field the way property access on the parsed body would: anything
/// that is not an object has no fields.
fn text_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

fn required_text(body: &Value, field: &str) -> Result<String, SubmitError> {
    text_field(body, field)
        .map(str::to_string)
        .ok_or_else(|| SubmitError::Parse(format!("missing field `{field}` in success response")))
}

/// Parses the verdict. `status` is loosely typed: anything other than the
/// string "success" is a failure. A `null` body has no properties to read and
/// is rejected.
pub fn parse_result(body: &[u8]) -> Result<UploadResult, SubmitError> {
    let body: Value = serde_json::from_slice(body)?;
    if body.is_null() {
        return Err(SubmitError::Parse(
            "response body is null, cannot read `status`".to_string(),
        ));
    }

    if let Some(logs) = text_field(&body, "logs") {
        debug!(%logs, "compile logs");
    }

    if text_field(&body, "status") != Some(SUCCESS) {
        return Ok(UploadResult::Failure {
            reason: text_field(&body, "error").map(str::to_string),
        });
    }

    let chip = required_text(&body, "chip")?;
    let gerber = required_text(&body, "gerber")?;

    Ok(UploadResult::Success { chip, gerber })
}

/// Turns a completed exchange into the page to navigate to. The HTTP status
/// code plays no part in the decision.
pub fn interpret(
    response: &RawResponse,
    encoding: QueryEncoding,
) -> Result<NavigationTarget, SubmitError> {
    let result = parse_result(&response.body)?;
    if let UploadResult::Failure {
        reason: Some(reason),
    } = &result
    {
        warn!(status = response.status, %reason, "upload service rejected the file");
    }
    Ok(NavigationTarget::for_result(&result, encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    fn target(body: &str) -> Result<NavigationTarget, SubmitError> {
        interpret(&response(200, body), QueryEncoding::Verbatim)
    }

    #[test]
    fn success_interpolates_chip_and_gerber() {
        let target = target(r#"{"status":"success","chip":"esp32","gerber":"board1.zip"}"#)
            .expect("target");
        assert_eq!(
            target.as_str(),
            "result.html?status=success&chip=esp32&gerber=board1.zip"
        );
    }

    #[test]
    fn success_values_are_not_encoded_by_default() {
        let target = target(
            r#"{"status":"success","chip":"arduino:avr:uno","gerber":"/downloads/example_gerber.zip"}"#,
        )
        .expect("target");
        assert_eq!(
            target.as_str(),
            "result.html?status=success&chip=arduino:avr:uno&gerber=/downloads/example_gerber.zip"
        );
    }

    #[test]
    fn any_other_status_goes_to_fail_page() {
        for body in [
            r#"{"status":"fail"}"#,
            r#"{"status":"failed","chip":"esp32","gerber":"x.zip"}"#,
            r#"{"status":"Success"}"#,
            r#"{"status":null}"#,
            r#"{"status":1}"#,
            r#"{}"#,
            r#"[]"#,
            r#"["success","esp32","g"]"#,
            r#""ok""#,
            r#""success""#,
            r#"42"#,
            r#"true"#,
        ] {
            let target = target(body).expect("target");
            assert_eq!(target.as_str(), "result.html?status=fail", "body: {body}");
        }
    }

    #[test]
    fn error_status_code_is_decided_by_body() {
        let body = r#"{"status":"success","chip":"esp32","gerber":"g.zip"}"#;
        let target = interpret(&response(500, body), QueryEncoding::Verbatim).expect("target");
        assert!(target.is_success());
    }

    #[test]
    fn rejection_reason_is_kept_off_the_target() {
        let result = parse_result(br#"{"status":"failed","error":"No file uploaded"}"#)
            .expect("result");
        assert_eq!(
            result,
            UploadResult::Failure {
                reason: Some("No file uploaded".to_string())
            }
        );
        let target = NavigationTarget::for_result(&result, QueryEncoding::Verbatim);
        assert_eq!(target.as_str(), "result.html?status=fail");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = target("<html>Internal Server Error</html>").expect_err("must fail");
        assert!(matches!(err, SubmitError::Parse(_)));
    }

    #[test]
    fn null_body_is_a_parse_error() {
        let err = target("null").expect_err("must fail");
        assert!(matches!(err, SubmitError::Parse(_)));
        assert_eq!(err.to_string(), "response body is null, cannot read `status`");
    }

    #[test]
    fn success_without_gerber_is_a_parse_error() {
        let err = target(r#"{"status":"success","chip":"esp32","gerber":null}"#)
            .expect_err("must fail");
        assert_eq!(
            err.to_string(),
            "missing field `gerber` in success response"
        );
    }
}
