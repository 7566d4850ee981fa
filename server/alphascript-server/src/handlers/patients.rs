use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use record_store::{NewPatient, Patient};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::extractors::CurrentUser;
use crate::server::AlphaScriptServer;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(default, alias = "dateOfBirth")]
    pub date_of_birth: Option<NaiveDate>,
}

pub async fn list_patients(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Patient>>> {
    Ok(Json(server.store.list_patients(user).await?))
}

pub async fn create_patient(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Patient>)> {
    let Json(req) = payload?;
    req.validate()?;

    if req
        .date_of_birth
        .is_some_and(|dob| dob > chrono::Utc::now().date_naive())
    {
        return Err(ApiError::invalid_field("date_of_birth", "cannot be in the future"));
    }

    let patient = server
        .store
        .create_patient(
            user,
            NewPatient {
                name: req.name,
                date_of_birth: req.date_of_birth,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn get_patient(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(patient_id): Path<Uuid>,
) -> ApiResult<Json<Patient>> {
    Ok(Json(server.store.get_patient(user, patient_id).await?))
}
