use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::{Arc, PoisonError, RwLock};

use time::OffsetDateTime;

use crate::domain::payment::RecordedPayment;
use crate::domain::repository::PaymentRepository;
use crate::domain::summary::SummaryResponse;

const SHARD_COUNT: usize = 32;

type Shard = RwLock<HashMap<String, RecordedPayment>>;

/// Volatile ledger of delivered payments, keyed by correlation id.
///
/// Entries are spread over independently locked shards so writers for
/// different ids rarely contend. A summary visits the shards one after the
/// other and may or may not see writes racing with it.
#[derive(Clone)]
pub struct InMemoryPaymentRepository {
	shards: Arc<[Shard]>,
	hasher: RandomState,
}

impl InMemoryPaymentRepository {
	pub fn new() -> Self {
		Self {
			shards: (0..SHARD_COUNT)
				.map(|_| RwLock::new(HashMap::new()))
				.collect(),
			hasher: RandomState::new(),
		}
	}

	fn shard_for(&self, correlation_id: &str) -> &Shard {
		let hash = self.hasher.hash_one(correlation_id) as usize;
		&self.shards[hash % self.shards.len()]
	}

	pub fn len(&self) -> usize {
		self.shards
			.iter()
			.map(|shard| shard.read().unwrap_or_else(PoisonError::into_inner).len())
			.sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, correlation_id: &str) -> Option<RecordedPayment> {
		self.shard_for(correlation_id)
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.get(correlation_id)
			.cloned()
	}
}

impl Default for InMemoryPaymentRepository {
	fn default() -> Self {
		Self::new()
	}
}

impl PaymentRepository for InMemoryPaymentRepository {
	fn record(&self, payment: RecordedPayment) {
		let mut shard = self
			.shard_for(&payment.correlation_id)
			.write()
			.unwrap_or_else(PoisonError::into_inner);
		shard.insert(payment.correlation_id.clone(), payment);
	}

	fn summarize(
		&self,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> SummaryResponse {
		let mut summary = SummaryResponse::default();

		for shard in self.shards.iter() {
			let payments = shard.read().unwrap_or_else(PoisonError::into_inner);
			for payment in payments.values() {
				if payment.requested_at < from || payment.requested_at > to {
					continue;
				}
				summary
					.for_processor(payment.processor)
					.include(payment.amount);
			}
		}

		summary.rounded()
	}

	fn purge(&self) {
		for shard in self.shards.iter() {
			shard.write().unwrap_or_else(PoisonError::into_inner).clear();
		}
	}
}
