use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::health_status::HealthSnapshot;
use crate::domain::payment::{PaymentSubmission, ProcessorSelection};

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum ProcessorError {
	#[display("Processor could not be reached.")]
	Unreachable,
	#[display("Processor rejected the request with status {status}.")]
	Rejected { status: u16 },
	#[display("Processor answered with an unreadable body.")]
	MalformedResponse,
	#[display("Both payment processors failed.")]
	BothFailed,
}

/// Outbound boundary towards the default and fallback processors.
#[async_trait]
pub trait PaymentProcessorClient: Send + Sync + 'static {
	/// Delivers the payment to the default processor, then to the fallback.
	/// Fails with [`ProcessorError::BothFailed`] when neither accepted it.
	async fn attempt(
		&self,
		payment: &PaymentSubmission,
	) -> Result<ProcessorSelection, ProcessorError>;

	/// Probes both processors. Unreachable processors are reported as failing.
	async fn probe_health(&self) -> HealthSnapshot;
}
