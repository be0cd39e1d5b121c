use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which of the two processors accepted a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessorSelection {
	Default,
	Fallback,
}

impl ProcessorSelection {
	pub fn name(&self) -> &'static str {
		match self {
			ProcessorSelection::Default => "default",
			ProcessorSelection::Fallback => "fallback",
		}
	}
}

/// A payment accepted at the boundary and waiting to be delivered.
///
/// Serializes to the body the processors expect on `POST /payments`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentSubmission {
	#[serde(rename = "correlationId")]
	pub correlation_id: String,
	pub amount:         f64,
	#[serde(rename = "requestedAt", with = "time::serde::rfc3339")]
	pub submitted_at:   OffsetDateTime,
}

impl PaymentSubmission {
	pub fn new(correlation_id: impl Into<String>, amount: f64) -> Self {
		Self {
			correlation_id: correlation_id.into(),
			amount,
			submitted_at: OffsetDateTime::now_utc(),
		}
	}
}

/// A payment one of the processors accepted, as kept by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPayment {
	pub correlation_id: String,
	pub amount:         f64,
	pub requested_at:   OffsetDateTime,
	pub processor:      ProcessorSelection,
}

impl RecordedPayment {
	pub fn accepted(
		submission: PaymentSubmission,
		processor: ProcessorSelection,
	) -> Self {
		Self {
			correlation_id: submission.correlation_id,
			amount: submission.amount,
			requested_at: submission.submitted_at,
			processor,
		}
	}
}
