use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::domain::health_status::{HealthSnapshot, ProcessorHealth};
use crate::domain::payment::{PaymentSubmission, ProcessorSelection};
use crate::domain::processor_client::{PaymentProcessorClient, ProcessorError};

const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 500;
const IDLE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(90);
const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

/// Builds the pooled client shared by every outbound call. `timeout` bounds
/// both connecting and the whole request.
pub fn build_http_client(timeout: Duration) -> reqwest::Result<Client> {
	Client::builder()
		.connect_timeout(timeout)
		.timeout(timeout)
		.pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
		.pool_idle_timeout(IDLE_CONNECTION_TIMEOUT)
		.tcp_keepalive(TCP_KEEPALIVE)
		.build()
}

#[derive(Clone)]
pub struct HttpPaymentProcessorClient {
	http_client:  Client,
	default_url:  String,
	fallback_url: String,
}

impl HttpPaymentProcessorClient {
	pub fn new(
		http_client: Client,
		default_url: impl Into<String>,
		fallback_url: impl Into<String>,
	) -> Self {
		Self {
			http_client,
			default_url: default_url.into(),
			fallback_url: fallback_url.into(),
		}
	}

	fn url_of(&self, processor: ProcessorSelection) -> &str {
		match processor {
			ProcessorSelection::Default => self.default_url.trim_end_matches('/'),
			ProcessorSelection::Fallback => self.fallback_url.trim_end_matches('/'),
		}
	}

	pub async fn send_payment(
		&self,
		processor: ProcessorSelection,
		payment: &PaymentSubmission,
	) -> Result<(), ProcessorError> {
		let url = format!("{}/payments", self.url_of(processor));
		let resp = self
			.http_client
			.post(&url)
			.json(payment)
			.send()
			.await
			.map_err(|e| {
				debug!("Failed to reach {} processor: {e}", processor.name());
				ProcessorError::Unreachable
			})?;

		if resp.status().is_success() {
			Ok(())
		} else {
			Err(ProcessorError::Rejected {
				status: resp.status().as_u16(),
			})
		}
	}

	pub async fn probe(
		&self,
		processor: ProcessorSelection,
	) -> Result<ProcessorHealth, ProcessorError> {
		let url = format!("{}/payments/service-health/", self.url_of(processor));
		let resp = self
			.http_client
			.get(&url)
			.send()
			.await
			.map_err(|_| ProcessorError::Unreachable)?;

		if !resp.status().is_success() {
			return Err(ProcessorError::Rejected {
				status: resp.status().as_u16(),
			});
		}

		resp.json::<ProcessorHealth>()
			.await
			.map_err(|_| ProcessorError::MalformedResponse)
	}

	async fn probe_or_warn(
		&self,
		processor: ProcessorSelection,
	) -> Option<ProcessorHealth> {
		match self.probe(processor).await {
			Ok(health) => {
				debug!("Health of {} processor: {health:?}", processor.name());
				Some(health)
			}
			Err(e) => {
				warn!("Health check for {} processor failed: {e}", processor.name());
				None
			}
		}
	}
}

#[async_trait]
impl PaymentProcessorClient for HttpPaymentProcessorClient {
	async fn attempt(
		&self,
		payment: &PaymentSubmission,
	) -> Result<ProcessorSelection, ProcessorError> {
		for processor in [ProcessorSelection::Default, ProcessorSelection::Fallback] {
			match self.send_payment(processor, payment).await {
				Ok(()) => return Ok(processor),
				Err(e) => debug!(
					"{} processor did not take payment {}: {e}",
					processor.name(),
					payment.correlation_id
				),
			}
		}
		Err(ProcessorError::BothFailed)
	}

	async fn probe_health(&self) -> HealthSnapshot {
		let default = self.probe_or_warn(ProcessorSelection::Default).await;
		let fallback = self.probe_or_warn(ProcessorSelection::Fallback).await;
		HealthSnapshot::from_probes(default, fallback)
	}
}
