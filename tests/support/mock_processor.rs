use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

#[derive(Default)]
pub struct MockProcessorState {
	failing:           AtomicBool,
	min_response_time: AtomicU64,
	payments:          Mutex<Vec<Value>>,
	health_checks:     AtomicUsize,
}

/// Payment processor stand-in served in-process on an ephemeral port.
pub struct MockProcessor {
	pub url: String,
	state:   web::Data<MockProcessorState>,
	handle:  ServerHandle,
}

impl MockProcessor {
	pub async fn start() -> Self {
		let state = web::Data::new(MockProcessorState::default());
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let port = listener.local_addr().unwrap().port();

		let app_state = state.clone();
		let server = HttpServer::new(move || {
			App::new()
				.app_data(app_state.clone())
				.route("/payments", web::post().to(accept_payment))
				.route("/payments/service-health/", web::get().to(service_health))
		})
		.workers(1)
		.listen(listener)
		.unwrap()
		.run();
		let handle = server.handle();
		actix_web::rt::spawn(server);

		Self {
			url: format!("http://127.0.0.1:{port}"),
			state,
			handle,
		}
	}

	pub fn set_failing(&self, failing: bool) {
		self.state.failing.store(failing, Ordering::SeqCst);
	}

	pub fn set_min_response_time(&self, millis: u64) {
		self.state.min_response_time.store(millis, Ordering::SeqCst);
	}

	pub fn received(&self) -> Vec<Value> {
		self.state.payments.lock().unwrap().clone()
	}

	pub fn health_checks(&self) -> usize {
		self.state.health_checks.load(Ordering::SeqCst)
	}

	pub async fn stop(self) {
		self.handle.stop(false).await;
	}
}

async fn accept_payment(
	state: web::Data<MockProcessorState>,
	body: web::Json<Value>,
) -> HttpResponse {
	if state.failing.load(Ordering::SeqCst) {
		return HttpResponse::InternalServerError().finish();
	}
	state.payments.lock().unwrap().push(body.into_inner());
	HttpResponse::Ok().json(json!({ "message": "payment processed successfully" }))
}

async fn service_health(state: web::Data<MockProcessorState>) -> HttpResponse {
	state.health_checks.fetch_add(1, Ordering::SeqCst);
	HttpResponse::Ok().json(json!({
		"failing": state.failing.load(Ordering::SeqCst),
		"minResponseTime": state.min_response_time.load(Ordering::SeqCst),
	}))
}
