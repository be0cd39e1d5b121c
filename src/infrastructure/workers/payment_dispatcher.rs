use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::domain::health_status::HealthSnapshot;
use crate::domain::payment::{PaymentSubmission, RecordedPayment};
use crate::domain::processor_client::PaymentProcessorClient;
use crate::domain::repository::PaymentRepository;
use crate::infrastructure::queue::dispatch_queue::DispatchQueue;
use crate::infrastructure::workers::shutdown::ShutdownSignal;
use crate::infrastructure::workers::suspend_controller::{
	SuspendController, spawn_resume_watcher,
};

#[derive(Debug, Clone, Copy)]
pub struct DispatcherSettings {
	pub workers:        usize,
	pub queue_capacity: usize,
}

/// Pool of workers delivering queued payments to the processors.
pub struct PaymentDispatcher {
	queue:      DispatchQueue,
	controller: Arc<SuspendController>,
	workers:    JoinSet<()>,
}

impl PaymentDispatcher {
	pub fn start<C, R>(
		settings: DispatcherSettings,
		client: Arc<C>,
		ledger: R,
		health: watch::Receiver<HealthSnapshot>,
		shutdown: ShutdownSignal,
	) -> Self
	where
		C: PaymentProcessorClient,
		R: PaymentRepository + Clone,
	{
		let worker_count = settings.workers.max(1);
		// The retry lane holds at least one failed payment per worker.
		let capacity = settings.queue_capacity.max(worker_count);
		let queue = DispatchQueue::new(capacity);
		let controller = Arc::new(SuspendController::new());
		let mut workers = JoinSet::new();

		for id in 0..worker_count {
			let worker = DispatchWorker {
				id,
				queue: queue.clone(),
				controller: controller.clone(),
				client: client.clone(),
				ledger: ledger.clone(),
				health: health.clone(),
				shutdown: shutdown.clone(),
			};
			workers.spawn(worker.run());
		}

		{
			let queue = queue.clone();
			let mut shutdown = shutdown.clone();
			workers.spawn(async move {
				shutdown.cancelled().await;
				queue.close();
			});
		}

		info!("Started {worker_count} dispatch workers (queue capacity {capacity})");

		Self {
			queue,
			controller,
			workers,
		}
	}

	pub fn queue(&self) -> DispatchQueue {
		self.queue.clone()
	}

	pub fn controller(&self) -> Arc<SuspendController> {
		self.controller.clone()
	}

	/// Waits for every worker to finish its current iteration and exit.
	/// Only returns once the shutdown signal has fired.
	pub async fn shutdown(mut self) {
		while let Some(result) = self.workers.join_next().await {
			if let Err(e) = result {
				error!("Dispatch worker ended abnormally: {e}");
			}
		}
		let left = self.queue.pending_retries() + self.queue.pending_submissions();
		if left > 0 {
			warn!("Dispatcher stopped with {left} payments still queued");
		}
		info!("Dispatcher stopped");
	}
}

struct DispatchWorker<C, R> {
	id:         usize,
	queue:      DispatchQueue,
	controller: Arc<SuspendController>,
	client:     Arc<C>,
	ledger:     R,
	health:     watch::Receiver<HealthSnapshot>,
	shutdown:   ShutdownSignal,
}

impl<C, R> DispatchWorker<C, R>
where
	C: PaymentProcessorClient,
	R: PaymentRepository,
{
	async fn run(mut self) {
		loop {
			tokio::select! {
				biased;
				_ = self.shutdown.cancelled() => break,
				_ = self.controller.wait_until_active() => {}
			}

			let dequeued = tokio::select! {
				biased;
				_ = self.shutdown.cancelled() => break,
				next = self.queue.next() => match next {
					Some(dequeued) => dequeued,
					None => break,
				},
			};

			if self.controller.is_suspended() {
				self.queue.requeue_front(dequeued);
				continue;
			}

			self.deliver(dequeued.payment).await;
		}

		debug!("Dispatch worker {} stopped", self.id);
	}

	async fn deliver(&self, payment: PaymentSubmission) {
		match self.client.attempt(&payment).await {
			Ok(processor) => {
				debug!(
					"Payment {} accepted by {} processor",
					payment.correlation_id,
					processor.name()
				);
				self.ledger
					.record(RecordedPayment::accepted(payment, processor));
			}
			Err(e) => {
				warn!(
					"Payment {} not delivered: {e} Queued for retry.",
					payment.correlation_id
				);
				if self.controller.suspend() {
					spawn_resume_watcher(
						self.controller.clone(),
						self.health.clone(),
						self.shutdown.clone(),
					);
				}
				self.queue.push_retry(payment).await;
			}
		}
	}
}
