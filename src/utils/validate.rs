use crate::error::{AppError, AppResult};
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `validator` checks.
///
/// Any body axum cannot decode (bad JSON, wrong content type, wrong shape)
/// is reported uniformly as "invalid request format".
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected request body");
            AppError::invalid_argument("invalid request format")
        })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `{id}` path segment parsed as a positive user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::invalid_argument("invalid user id"))?;
        parse_user_id(&raw).map(UserId)
    }
}

fn parse_user_id(raw: &str) -> AppResult<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::invalid_argument("invalid user id")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(length(min = 1, message = "email is required"))]
        email: String,
    }

    fn json_request(content_type: &str, body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_json() {
        let request = json_request("application/json", r#"{"name":"a","email":"a@x.com"}"#);

        let ValidatedJson(body) = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(body.name, "a");
        assert_eq!(body.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_empty_fields_report_each_message() {
        let request = json_request("application/json", r#"{"name":"","email":""}"#);

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();
        match error {
            AppError::ValidationErrors { errors } => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(messages, vec!["email is required", "name is required"]);
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_invalid_argument() {
        let request = json_request("application/json", "{not json");

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(
            matches!(error, AppError::InvalidArgument { ref message } if message == "invalid request format")
        );
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_invalid_argument() {
        let request = json_request("text/plain", r#"{"name":"a","email":"b"}"#);

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::InvalidArgument { .. }));
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1").unwrap(), 1);
        assert_eq!(parse_user_id("2147483647").unwrap(), i32::MAX);

        for raw in ["0", "-3", "abc", "", "1.5", "2147483648"] {
            assert!(
                matches!(parse_user_id(raw), Err(AppError::InvalidArgument { .. })),
                "{:?} should be rejected",
                raw
            );
        }
    }
}
