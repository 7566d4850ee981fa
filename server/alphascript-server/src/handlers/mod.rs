pub mod audio;
pub mod health;
pub mod patients;
pub mod recordings;
pub mod reports;
pub mod templates;

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Parse a client-supplied identifier, treating a blank string as absent
pub(crate) fn parse_optional_id(field: &str, value: Option<&str>) -> ApiResult<Option<Uuid>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => Uuid::parse_str(raw)
            .map(Some)
            .map_err(|_| ApiError::invalid_field(field, "must be a valid UUID")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_optional_id("recording_id", Some(&id.to_string())).unwrap(), Some(id));
        assert_eq!(parse_optional_id("recording_id", Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_id("recording_id", None).unwrap(), None);

        let err = parse_optional_id("template_id", Some("tmpl-1")).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
