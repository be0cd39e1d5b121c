use crate::domain::payment::PaymentSubmission;
use crate::domain::queue::{DispatchError, PaymentQueue};
use crate::use_cases::dto::CreatePaymentCommand;

#[derive(Clone)]
pub struct CreatePaymentUseCase<Q: PaymentQueue> {
	payment_queue: Q,
}

impl<Q: PaymentQueue> CreatePaymentUseCase<Q> {
	pub fn new(payment_queue: Q) -> Self {
		Self { payment_queue }
	}

	pub fn execute(&self, command: CreatePaymentCommand) -> Result<(), DispatchError> {
		self.payment_queue.submit(PaymentSubmission::new(
			command.correlation_id,
			command.amount,
		))
	}
}
