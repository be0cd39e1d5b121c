use log::info;

use crate::domain::repository::PaymentRepository;

#[derive(Clone)]
pub struct PurgePaymentsUseCase<R: PaymentRepository> {
	repository: R,
}

impl<R: PaymentRepository> PurgePaymentsUseCase<R> {
	pub fn new(repository: R) -> Self {
		Self { repository }
	}

	pub fn execute(&self) {
		self.repository.purge();
		info!("Ledger purged");
	}
}
