use axum::{
    extract::{FromRequest, Request},
    http::header,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Request body accepted either as JSON or as a urlencoded form, chosen by
/// the `Content-Type` header. Anything that isn't JSON is read as a form.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

/// `application/json` or any `application/*+json`, case-insensitively.
fn is_json(req: &Request) -> bool {
    let Some(mime) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<mime::Mime>().ok())
    else {
        return false;
    };

    mime.type_().as_str().eq_ignore_ascii_case("application")
        && (mime.subtype().as_str().eq_ignore_ascii_case("json")
            || mime
                .suffix()
                .is_some_and(|suffix| suffix.as_str().eq_ignore_ascii_case("json")))
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            Ok(Self(value))
        }
    }
}
