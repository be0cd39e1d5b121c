use actix_web::{HttpResponse, Responder, ResponseError, post, web};
use log::{debug, warn};

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::schema::PaymentRequest;
use crate::infrastructure::queue::dispatch_queue::DispatchQueue;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::dto::CreatePaymentCommand;

#[post("/payments")]
pub async fn payments(
	payload: web::Json<PaymentRequest>,
	create_payment_use_case: web::Data<CreatePaymentUseCase<DispatchQueue>>,
) -> impl Responder {
	let PaymentRequest {
		correlation_id,
		amount,
	} = payload.into_inner();

	match create_payment_use_case.execute(CreatePaymentCommand {
		correlation_id: correlation_id.clone(),
		amount,
	}) {
		Ok(()) => {
			debug!("Payment received and queued: {correlation_id}");
			HttpResponse::Created().finish()
		}
		Err(e) => {
			warn!("Payment {correlation_id} refused: {e}");
			ApiError::from(e).error_response()
		}
	}
}
