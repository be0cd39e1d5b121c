use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rinha_payments_dispatcher::adapters::web::errors::json_config;
use rinha_payments_dispatcher::adapters::web::payments_handler::payments;
use rinha_payments_dispatcher::infrastructure::queue::dispatch_queue::DispatchQueue;
use rinha_payments_dispatcher::use_cases::create_payment::CreatePaymentUseCase;
use serde_json::{Value, json};
use uuid::Uuid;

#[actix_web::test]
async fn test_payment_is_accepted_and_queued() {
	let queue = DispatchQueue::new(10);
	let app = test::init_service(
		App::new()
			.app_data(json_config())
			.app_data(web::Data::new(CreatePaymentUseCase::new(queue.clone())))
			.service(payments),
	)
	.await;
	let correlation_id = Uuid::new_v4().to_string();

	let req = test::TestRequest::post()
		.uri("/payments")
		.set_json(json!({ "correlationId": correlation_id, "amount": 19.90 }))
		.to_request();
	let resp = test::call_service(&app, req).await;

	assert_eq!(resp.status(), StatusCode::CREATED);
	assert_eq!(queue.pending_submissions(), 1);
	let queued = queue.next().await.unwrap();
	assert_eq!(queued.payment.correlation_id, correlation_id);
	assert_eq!(queued.payment.amount, 19.90);
}

#[actix_web::test]
async fn test_full_queue_is_reported_as_unavailable() {
	let queue = DispatchQueue::new(1);
	let app = test::init_service(
		App::new()
			.app_data(json_config())
			.app_data(web::Data::new(CreatePaymentUseCase::new(queue.clone())))
			.service(payments),
	)
	.await;

	let mut statuses = Vec::new();
	for _ in 0..2 {
		let req = test::TestRequest::post()
			.uri("/payments")
			.set_json(json!({ "correlationId": Uuid::new_v4(), "amount": 1.0 }))
			.to_request();
		statuses.push(test::call_service(&app, req).await.status());
	}

	assert_eq!(statuses, vec![
		StatusCode::CREATED,
		StatusCode::SERVICE_UNAVAILABLE
	]);
	assert_eq!(queue.pending_submissions(), 1);
}

#[actix_web::test]
async fn test_closed_queue_fails_fast() {
	let queue = DispatchQueue::new(10);
	queue.close();
	let app = test::init_service(
		App::new()
			.app_data(json_config())
			.app_data(web::Data::new(CreatePaymentUseCase::new(queue.clone())))
			.service(payments),
	)
	.await;

	let req = test::TestRequest::post()
		.uri("/payments")
		.set_json(json!({ "correlationId": "late", "amount": 1.0 }))
		.to_request();
	let resp = test::call_service(&app, req).await;

	assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[actix_web::test]
async fn test_malformed_payment_is_rejected() {
	let queue = DispatchQueue::new(10);
	let app = test::init_service(
		App::new()
			.app_data(json_config())
			.app_data(web::Data::new(CreatePaymentUseCase::new(queue.clone())))
			.service(payments),
	)
	.await;

	let req = test::TestRequest::post()
		.uri("/payments")
		.set_json(json!({ "amount": 1.0 }))
		.to_request();
	let resp = test::call_service(&app, req).await;

	assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["statusCode"], 400);
	assert_eq!(queue.pending_submissions(), 0);
}
