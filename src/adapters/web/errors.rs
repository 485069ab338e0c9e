use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::gateway::GatewayError;
use crate::use_cases::errors::DonationError;

/// Error body in the shape the donations frontend already understands.
#[derive(Serialize)]
struct ErrorResponse {
	detail: String,
}

#[derive(Debug, Display, Error, PartialEq)]
pub enum ApiError {
	#[display("{message}")]
	Validation { message: String },
	#[display("Checkout session not found.")]
	SessionNotFound,
	#[display("{message}")]
	PaymentGateway { message: String },
	#[display("We could not record your donation. Please try again.")]
	Storage,
	#[display("Internal server error.")]
	InternalServerError,
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				detail: self.to_string(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
			ApiError::SessionNotFound => StatusCode::NOT_FOUND,
			ApiError::PaymentGateway { .. } => StatusCode::BAD_GATEWAY,
			ApiError::Storage => StatusCode::INTERNAL_SERVER_ERROR,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<DonationError> for ApiError {
	fn from(err: DonationError) -> Self {
		match err {
			DonationError::Validation { source } => ApiError::Validation {
				message: source.to_string(),
			},
			DonationError::Gateway {
				source: GatewayError::SessionNotFound { .. },
			} => ApiError::SessionNotFound,
			DonationError::Gateway {
				source: GatewayError::Rejected { message, .. },
			} => ApiError::PaymentGateway {
				message: format!("The payment provider declined the request: {message}"),
			},
			DonationError::Gateway { .. } => ApiError::PaymentGateway {
				message: "The payment provider is unavailable. Please try again later."
					.to_string(),
			},
			DonationError::Storage { .. } => ApiError::Storage,
		}
	}
}
