use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, HttpServer, web};
use log::{error, info};

use crate::adapters::web::errors::json_config;
use crate::adapters::web::payments_handler::payments;
use crate::adapters::web::payments_purge_handler::payments_purge;
use crate::adapters::web::payments_summary_handler::{
	payments_summary, payments_summary_single,
};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::http::payment_processor_client::{
	HttpPaymentProcessorClient, build_http_client,
};
use crate::infrastructure::http::peer_summary_client::PeerSummaryClient;
use crate::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;
use crate::infrastructure::workers::payment_dispatcher::PaymentDispatcher;
use crate::infrastructure::workers::processor_health_monitor_worker::ProcessorHealthMonitor;
use crate::infrastructure::workers::shutdown::shutdown_channel;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::get_payment_summary::GetPaymentSummaryUseCase;
use crate::use_cases::purge_payments::PurgePaymentsUseCase;

pub mod domain {
	pub mod health_status;
	pub mod payment;
	pub mod processor_client;
	pub mod queue;
	pub mod repository;
	pub mod summary;
}

pub mod use_cases {
	pub mod create_payment;
	pub mod dto;
	pub mod get_payment_summary;
	pub mod purge_payments;
}

pub mod infrastructure {
	pub mod config {
		pub mod settings;
	}
	pub mod http {
		pub mod payment_processor_client;
		pub mod peer_summary_client;
	}
	pub mod persistence {
		pub mod in_memory_payment_repository;
	}
	pub mod queue {
		pub mod dispatch_queue;
	}
	pub mod workers {
		pub mod payment_dispatcher;
		pub mod processor_health_monitor_worker;
		pub mod shutdown;
		pub mod suspend_controller;
	}
}

pub mod adapters {
	pub mod web {
		pub mod errors;
		pub mod payments_handler;
		pub mod payments_purge_handler;
		pub mod payments_summary_handler;
		pub mod schema;
	}
}

pub async fn run(config: Arc<Config>) -> io::Result<()> {
	let http_client =
		build_http_client(config.processor_timeout()).map_err(io::Error::other)?;

	let ledger = InMemoryPaymentRepository::new();
	let processor_client = Arc::new(HttpPaymentProcessorClient::new(
		http_client.clone(),
		config.default_payment_processor_url.clone(),
		config.fallback_payment_processor_url.clone(),
	));
	let (shutdown_trigger, shutdown) = shutdown_channel();

	let monitor = ProcessorHealthMonitor::new(
		processor_client.clone(),
		config.health_check_min_interval(),
	);
	let health = monitor.subscribe();
	let monitor_handle = tokio::spawn(monitor.run(shutdown.clone()));

	let dispatcher = PaymentDispatcher::start(
		config.dispatcher_settings(),
		processor_client,
		ledger.clone(),
		health,
		shutdown,
	);

	let peer = config.peer_url().map(|url| {
		info!("Merging summaries with peer at {url}");
		PeerSummaryClient::new(http_client.clone(), url)
	});
	let create_payment_use_case = CreatePaymentUseCase::new(dispatcher.queue());
	let get_payment_summary_use_case =
		GetPaymentSummaryUseCase::new(ledger.clone(), peer);
	let purge_payments_use_case = PurgePaymentsUseCase::new(ledger);

	info!(
		"Starting Actix-Web server on {}:{}...",
		config.server_host, config.server_port
	);
	let server = HttpServer::new(move || {
		App::new()
			.app_data(json_config())
			.app_data(web::Data::new(create_payment_use_case.clone()))
			.app_data(web::Data::new(get_payment_summary_use_case.clone()))
			.app_data(web::Data::new(purge_payments_use_case.clone()))
			.service(payments)
			.service(payments_summary)
			.service(payments_summary_single)
			.service(payments_purge)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind((config.server_host.as_str(), config.server_port));

	let result = match server {
		Ok(server) => server.run().await,
		Err(e) => {
			error!(
				"Could not bind {}:{}: {e}",
				config.server_host, config.server_port
			);
			Err(e)
		}
	};

	info!("Shutting down, draining dispatch workers");
	shutdown_trigger.trigger();
	dispatcher.shutdown().await;
	if let Err(e) = monitor_handle.await {
		error!("Health monitor ended abnormally: {e}");
	}

	result
}
