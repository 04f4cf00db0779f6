//! Request body extractor shared by the account endpoints.
//!
//! Account forms are posted either as `multipart/form-data` (text fields plus
//! an optional `profileImg` file part) or as plain JSON / urlencoded bodies.
//! `FormPayload` accepts all of them and always rejects with the standard
//! `{success, message}` error body.

use crate::errors::ServiceError;
use crate::utils::uploads::ImageUpload;
use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Name of the multipart part carrying the profile image.
pub const PROFILE_IMAGE_FIELD: &str = "profileImg";

const INVALID_MULTIPART: &str = "Request body is not valid multipart/form-data";

/// Parsed request body plus the optional uploaded image.
pub struct FormPayload<T> {
    pub data: T,
    pub image: Option<ImageUpload>,
}

impl<S, T> FromRequest<S> for FormPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text(), INVALID_MULTIPART))?;
            return from_multipart(multipart).await;
        }

        if content_type.starts_with("application/json") {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text(), "Request body is not valid JSON"))?;
            return Ok(Self { data, image: None });
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(data) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text(), "Request body is not a valid form"))?;
            return Ok(Self { data, image: None });
        }

        if content_type.is_empty() {
            // Bodiless requests (e.g. a PATCH that changes nothing) read as an empty form.
            return Ok(Self {
                data: deserialize_fields(Map::new())?,
                image: None,
            });
        }

        Err(ServiceError::validation(
            "Request body must be JSON or multipart/form-data",
        ))
    }
}

async fn from_multipart<T: DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<FormPayload<T>, ServiceError> {
    let mut fields = Map::new();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| rejected(e.status(), e.body_text(), INVALID_MULTIPART))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == PROFILE_IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| rejected(e.status(), e.body_text(), INVALID_MULTIPART))?;

            // Browsers send an empty part when no file was chosen.
            let nothing_chosen = bytes.is_empty() && file_name.as_deref().is_none_or(str::is_empty);
            if !nothing_chosen {
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| rejected(e.status(), e.body_text(), INVALID_MULTIPART))?;
        fields.insert(name, Value::String(text));
    }

    Ok(FormPayload {
        data: deserialize_fields(fields)?,
        image,
    })
}

/// Maps an axum body rejection to a client error without echoing its text.
fn rejected(status: StatusCode, detail: String, message: &str) -> ServiceError {
    tracing::debug!("Rejected request body ({}): {}", status, detail);
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::PayloadTooLarge
    } else {
        ServiceError::validation(message)
    }
}

fn deserialize_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ServiceError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ServiceError::validation(format!("Invalid form data: {}", e)))
}
