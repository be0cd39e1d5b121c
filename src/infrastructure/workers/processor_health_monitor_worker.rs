use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::watch;
use tokio::time::sleep;

use crate::domain::health_status::HealthSnapshot;
use crate::domain::processor_client::PaymentProcessorClient;
use crate::infrastructure::workers::shutdown::ShutdownSignal;

/// Sequentially probes both processors and publishes each result as a new
/// snapshot. The delay between probes comes from the processors themselves,
/// never shorter than `min_interval`.
pub struct ProcessorHealthMonitor<C: PaymentProcessorClient> {
	client:       Arc<C>,
	snapshot:     watch::Sender<HealthSnapshot>,
	min_interval: Duration,
}

impl<C: PaymentProcessorClient> ProcessorHealthMonitor<C> {
	pub fn new(client: Arc<C>, min_interval: Duration) -> Self {
		let (snapshot, _) = watch::channel(HealthSnapshot::default());
		Self {
			client,
			snapshot,
			min_interval,
		}
	}

	pub fn subscribe(&self) -> watch::Receiver<HealthSnapshot> {
		self.snapshot.subscribe()
	}

	pub async fn run(self, mut shutdown: ShutdownSignal) {
		info!("Starting processor health monitor");

		loop {
			let snapshot = tokio::select! {
				biased;
				_ = shutdown.cancelled() => break,
				snapshot = self.client.probe_health() => snapshot,
			};

			if !snapshot.any_healthy() {
				warn!("Health probe reports both processors failing");
			}
			self.snapshot.send_replace(snapshot);

			let delay = snapshot.next_check_delay().max(self.min_interval);
			tokio::select! {
				biased;
				_ = shutdown.cancelled() => break,
				_ = sleep(delay) => {}
			}
		}

		info!("Processor health monitor stopped");
	}
}
