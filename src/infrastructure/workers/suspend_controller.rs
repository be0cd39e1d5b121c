use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

use crate::domain::health_status::HealthSnapshot;
use crate::infrastructure::workers::shutdown::ShutdownSignal;

struct GateState {
	suspended:  bool,
	generation: u64,
}

/// Two-state gate the dispatcher workers pass before pulling work.
///
/// `generation` grows on every release. A worker records it together with
/// the suspended flag under the same lock, so a release that lands before
/// the worker starts waiting is still observed, and a worker never waits on
/// a release that already happened.
pub struct SuspendController {
	state:    Mutex<GateState>,
	released: Notify,
}

impl SuspendController {
	pub fn new() -> Self {
		Self {
			state:    Mutex::new(GateState {
				suspended:  false,
				generation: 0,
			}),
			released: Notify::new(),
		}
	}

	fn state(&self) -> MutexGuard<'_, GateState> {
		self.state.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn is_suspended(&self) -> bool {
		self.state().suspended
	}

	pub fn generation(&self) -> u64 {
		self.state().generation
	}

	/// Returns `true` only for the call that moved the gate to suspended.
	pub fn suspend(&self) -> bool {
		let mut state = self.state();
		if state.suspended {
			return false;
		}
		state.suspended = true;
		info!("Dispatch suspended, both processors are failing");
		true
	}

	/// Releases every blocked worker. Returns `false` when the gate was not
	/// suspended, so repeated health reports never release twice.
	pub fn resume(&self) -> bool {
		let generation = {
			let mut state = self.state();
			if !state.suspended {
				return false;
			}
			state.suspended = false;
			state.generation += 1;
			state.generation
		};
		self.released.notify_waiters();
		info!("Dispatch resumed (generation {generation})");
		true
	}

	/// Waits until the gate is open, or until a release newer than the one
	/// observed on entry has happened.
	pub async fn wait_until_active(&self) {
		loop {
			let released = self.released.notified();
			tokio::pin!(released);
			released.as_mut().enable();

			let observed = {
				let state = self.state();
				if !state.suspended {
					return;
				}
				state.generation
			};

			released.await;

			let state = self.state();
			if !state.suspended || state.generation != observed {
				return;
			}
		}
	}
}

impl Default for SuspendController {
	fn default() -> Self {
		Self::new()
	}
}

/// Watches health snapshots published after the suspension and resumes the
/// gate as soon as one reports a healthy processor.
pub fn spawn_resume_watcher(
	controller: Arc<SuspendController>,
	mut health: watch::Receiver<HealthSnapshot>,
	mut shutdown: ShutdownSignal,
) -> JoinHandle<()> {
	health.mark_unchanged();

	tokio::spawn(async move {
		loop {
			tokio::select! {
				biased;
				_ = shutdown.cancelled() => {
					debug!("Resume watcher stopped by shutdown");
					return;
				}
				changed = health.changed() => {
					if changed.is_err() {
						debug!("Health monitor is gone, resume watcher stopping");
						return;
					}
				}
			}

			let snapshot = *health.borrow_and_update();
			if snapshot.any_healthy() {
				controller.resume();
				return;
			}
			debug!(
				"Processors still failing, next health report in {}ms",
				snapshot.next_check_delay_ms
			);
		}
	})
}
