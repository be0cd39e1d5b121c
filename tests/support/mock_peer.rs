use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;

struct MockPeerState {
	summary: Value,
	queries: Mutex<Vec<HashMap<String, String>>>,
}

/// Sibling instance answering `/payments-summary-single` with a fixed body.
pub struct MockPeer {
	pub url: String,
	state:   web::Data<MockPeerState>,
	handle:  ServerHandle,
}

impl MockPeer {
	pub async fn start(summary: Value) -> Self {
		let state = web::Data::new(MockPeerState {
			summary,
			queries: Mutex::new(Vec::new()),
		});
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let port = listener.local_addr().unwrap().port();

		let app_state = state.clone();
		let server = HttpServer::new(move || {
			App::new()
				.app_data(app_state.clone())
				.route("/payments-summary-single", web::get().to(local_summary))
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

	pub fn queries(&self) -> Vec<HashMap<String, String>> {
		self.state.queries.lock().unwrap().clone()
	}

	pub async fn stop(self) {
		self.handle.stop(false).await;
	}
}

async fn local_summary(
	state: web::Data<MockPeerState>,
	query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
	state.queries.lock().unwrap().push(query.into_inner());
	HttpResponse::Ok().json(&state.summary)
}
