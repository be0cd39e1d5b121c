use derive_more::derive::{Display, Error};

use crate::domain::payment::PaymentSubmission;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
	#[display("Submission queue is full.")]
	QueueFull,
	#[display("Dispatcher is shut down.")]
	Closed,
}

/// Entry point for new payments; never waits on processor latency.
pub trait PaymentQueue: Send + Sync + 'static {
	fn submit(&self, payment: PaymentSubmission) -> Result<(), DispatchError>;
}
