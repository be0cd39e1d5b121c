use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::domain::payment::PaymentSubmission;
use crate::domain::queue::{DispatchError, PaymentQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
	Retry,
	Submission,
}

/// A payment taken off the queue, remembering the lane it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dequeued {
	pub payment: PaymentSubmission,
	pub lane:    Lane,
}

#[derive(Default)]
struct Lanes {
	retries:     VecDeque<PaymentSubmission>,
	submissions: VecDeque<PaymentSubmission>,
	closed:      bool,
}

struct Inner {
	lanes:     Mutex<Lanes>,
	capacity:  usize,
	available: Notify,
	space:     Notify,
}

/// Bounded retry and submission queues shared by the dispatcher workers.
///
/// Both lanes live under one lock so a consumer always sees retries before
/// fresh submissions.
#[derive(Clone)]
pub struct DispatchQueue {
	inner: Arc<Inner>,
}

impl DispatchQueue {
	pub fn new(capacity: usize) -> Self {
		Self {
			inner: Arc::new(Inner {
				lanes: Mutex::new(Lanes::default()),
				capacity: capacity.max(1),
				available: Notify::new(),
				space: Notify::new(),
			}),
		}
	}

	fn lanes(&self) -> MutexGuard<'_, Lanes> {
		self.inner.lanes.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn pending_retries(&self) -> usize {
		self.lanes().retries.len()
	}

	pub fn pending_submissions(&self) -> usize {
		self.lanes().submissions.len()
	}

	pub fn is_closed(&self) -> bool {
		self.lanes().closed
	}

	/// Waits for the next payment, retries first. Returns `None` once the
	/// queue is closed.
	pub async fn next(&self) -> Option<Dequeued> {
		loop {
			let available = self.inner.available.notified();
			tokio::pin!(available);
			available.as_mut().enable();

			{
				let mut lanes = self.lanes();
				if lanes.closed {
					return None;
				}
				if let Some(payment) = lanes.retries.pop_front() {
					drop(lanes);
					self.inner.space.notify_one();
					return Some(Dequeued {
						payment,
						lane: Lane::Retry,
					});
				}
				if let Some(payment) = lanes.submissions.pop_front() {
					return Some(Dequeued {
						payment,
						lane: Lane::Submission,
					});
				}
			}

			available.await;
		}
	}

	/// Queues a payment whose delivery failed. Waits while the retry lane is
	/// full; once the queue is closed the payment is kept regardless.
	pub async fn push_retry(&self, payment: PaymentSubmission) {
		loop {
			let space = self.inner.space.notified();
			tokio::pin!(space);
			space.as_mut().enable();

			{
				let mut lanes = self.lanes();
				if lanes.closed || lanes.retries.len() < self.inner.capacity {
					lanes.retries.push_back(payment);
					drop(lanes);
					self.inner.available.notify_one();
					return;
				}
			}

			space.await;
		}
	}

	/// Puts a payment back at the head of the lane it was taken from.
	pub fn requeue_front(&self, dequeued: Dequeued) {
		{
			let mut lanes = self.lanes();
			match dequeued.lane {
				Lane::Retry => lanes.retries.push_front(dequeued.payment),
				Lane::Submission => lanes.submissions.push_front(dequeued.payment),
			}
		}
		self.inner.available.notify_one();
	}

	/// Stops handing out payments and rejects new submissions. Consumers
	/// waiting in [`DispatchQueue::next`] are released with `None`.
	pub fn close(&self) {
		self.lanes().closed = true;
		self.inner.available.notify_waiters();
		self.inner.space.notify_waiters();
	}
}

impl PaymentQueue for DispatchQueue {
	fn submit(&self, payment: PaymentSubmission) -> Result<(), DispatchError> {
		{
			let mut lanes = self.lanes();
			if lanes.closed {
				return Err(DispatchError::Closed);
			}
			if lanes.submissions.len() >= self.inner.capacity {
				return Err(DispatchError::QueueFull);
			}
			lanes.submissions.push_back(payment);
		}
		self.inner.available.notify_one();
		Ok(())
	}
}
