use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error, web};
use derive_more::derive::{Display, Error};
use log::debug;
use serde::Serialize;

use crate::domain::queue::DispatchError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("Request data is invalid.")]
	BadClientDataError,
	#[display("Payment queue is full, try again later.")]
	QueueFullError,
	#[display("Service is shutting down.")]
	ShuttingDownError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError => "Bad request".to_string(),
			ApiError::QueueFullError | ApiError::ShuttingDownError => {
				"Service Unavailable".to_string()
			}
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError => StatusCode::BAD_REQUEST,
			ApiError::QueueFullError | ApiError::ShuttingDownError => {
				StatusCode::SERVICE_UNAVAILABLE
			}
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<DispatchError> for ApiError {
	fn from(err: DispatchError) -> Self {
		match err {
			DispatchError::QueueFull => ApiError::QueueFullError,
			DispatchError::Closed => ApiError::ShuttingDownError,
		}
	}
}

/// Rejects unreadable payment bodies with the JSON error shape above.
pub fn json_config() -> web::JsonConfig {
	web::JsonConfig::default().error_handler(|err, _req| {
		debug!("Rejected payment body: {err}");
		ApiError::BadClientDataError.into()
	})
}
