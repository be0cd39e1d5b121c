use time::OffsetDateTime;

use crate::domain::payment::RecordedPayment;
use crate::domain::summary::SummaryResponse;

pub trait PaymentRepository: Send + Sync + 'static {
	/// Stores the payment, replacing any earlier one with the same
	/// correlation id.
	fn record(&self, payment: RecordedPayment);

	/// Aggregates payments requested within `[from, to]`, both ends included.
	fn summarize(&self, from: OffsetDateTime, to: OffsetDateTime)
	-> SummaryResponse;

	fn purge(&self);
}
