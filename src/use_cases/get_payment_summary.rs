use log::warn;
use time::{Duration, OffsetDateTime};

use crate::domain::repository::PaymentRepository;
use crate::domain::summary::SummaryResponse;
use crate::infrastructure::http::peer_summary_client::PeerSummaryClient;
use crate::use_cases::dto::GetPaymentSummaryQuery;

const DEFAULT_WINDOW: Duration = Duration::hours(24);

#[derive(Clone)]
pub struct GetPaymentSummaryUseCase<R: PaymentRepository> {
	payment_repo: R,
	peer:         Option<PeerSummaryClient>,
}

impl<R: PaymentRepository> GetPaymentSummaryUseCase<R> {
	pub fn new(payment_repo: R, peer: Option<PeerSummaryClient>) -> Self {
		Self { payment_repo, peer }
	}

	/// Summarises the local ledger and, when asked to and a peer is
	/// configured, adds the peer's summary for the same window. A failing
	/// peer only costs its share of the totals.
	pub async fn execute(&self, query: GetPaymentSummaryQuery) -> SummaryResponse {
		let now = OffsetDateTime::now_utc();
		let from = query.from.unwrap_or(now - DEFAULT_WINDOW);
		let to = query.to.unwrap_or(now);

		let local = self.payment_repo.summarize(from, to);

		match &self.peer {
			Some(peer) if query.merge_peer => match peer.fetch(from, to).await {
				Ok(remote) => local.merge(remote),
				Err(e) => {
					warn!("Using local summary only, peer fetch failed: {e}");
					local
				}
			},
			_ => local,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::payment::{ProcessorSelection, RecordedPayment};
	use crate::infrastructure::persistence::in_memory_payment_repository::InMemoryPaymentRepository;

	fn record(repo: &InMemoryPaymentRepository, id: &str, at: OffsetDateTime) {
		repo.record(RecordedPayment {
			correlation_id: id.to_string(),
			amount:         10.0,
			requested_at:   at,
			processor:      ProcessorSelection::Default,
		});
	}

	#[tokio::test]
	async fn test_missing_bounds_default_to_last_day() {
		let repo = InMemoryPaymentRepository::new();
		let now = OffsetDateTime::now_utc();
		record(&repo, "recent", now - Duration::hours(1));
		record(&repo, "old", now - Duration::hours(30));
		let use_case = GetPaymentSummaryUseCase::new(repo, None);

		let summary = use_case.execute(GetPaymentSummaryQuery::default()).await;

		assert_eq!(summary.default.total_requests, 1);
		assert_eq!(summary.default.total_amount, 10.0);
	}

	#[tokio::test]
	async fn test_explicit_window_is_used() {
		let repo = InMemoryPaymentRepository::new();
		let now = OffsetDateTime::now_utc();
		record(&repo, "old", now - Duration::hours(30));
		let use_case = GetPaymentSummaryUseCase::new(repo, None);

		let summary = use_case
			.execute(GetPaymentSummaryQuery {
				from:       Some(now - Duration::hours(48)),
				to:         Some(now - Duration::hours(24)),
				merge_peer: true,
			})
			.await;

		assert_eq!(summary.default.total_requests, 1);
	}
}
