use actix_web::{HttpResponse, Responder, post, web};
use log::info;

use crate::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

#[post("/purge-payments")]
pub async fn payments_purge(
	purge_use_case: web::Data<PurgePaymentsUseCase<InMemoryPaymentRepository>>,
) -> impl Responder {
	info!("Received request to purge payments");
	purge_use_case.execute();
	HttpResponse::Accepted().finish()
}
