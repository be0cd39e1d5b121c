use actix_web::{HttpResponse, Responder, get, web};

use crate::adapters::web::schema::PaymentsSummaryFilter;
use crate::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;
use crate::use_cases::dto::GetPaymentSummaryQuery;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;

type SummaryUseCase = GetPaymentSummaryUseCase<InMemoryPaymentRepository>;

async fn summary(
	filter: &PaymentsSummaryFilter,
	use_case: &SummaryUseCase,
	merge_peer: bool,
) -> HttpResponse {
	let query = GetPaymentSummaryQuery {
		from: filter.window_start(),
		to: filter.window_end(),
		merge_peer,
	};

	HttpResponse::Ok().json(use_case.execute(query).await)
}

/// Summary of this instance merged with the peer's, when one is configured.
#[get("/payments-summary")]
pub async fn payments_summary(
	filter: web::Query<PaymentsSummaryFilter>,
	get_payment_summary_use_case: web::Data<SummaryUseCase>,
) -> impl Responder {
	summary(&filter, &get_payment_summary_use_case, true).await
}

/// Summary of this instance only.
#[get("/payments-summary-single")]
pub async fn payments_summary_single(
	filter: web::Query<PaymentsSummaryFilter>,
	get_payment_summary_use_case: web::Data<SummaryUseCase>,
) -> impl Responder {
	summary(&filter, &get_payment_summary_use_case, false).await
}
