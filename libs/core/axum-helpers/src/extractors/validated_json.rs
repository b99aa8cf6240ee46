//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the body with the `validator` crate.
///
/// Deserialization failures (malformed JSON, unknown enum values, missing
/// required fields, bad date strings) and validation failures both become
/// 400 responses with the standard `{"error": <message>}` body.
///
/// # Example
/// ```ignore
/// async fn create_task(
///     ValidatedJson(input): ValidatedJson<CreateTask>,
/// ) -> TaskResult<impl IntoResponse> {
///     // input has passed both serde and validator checks
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        data.validate()
            .map_err(|errors| AppError::from(errors).into_response())?;

        Ok(ValidatedJson(data))
    }
}
