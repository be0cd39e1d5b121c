use std::time::Duration;

use serde::Deserialize;

/// Health reported by a single processor's service-health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProcessorHealth {
	pub failing:           bool,
	#[serde(rename = "minResponseTime")]
	pub min_response_time: u64,
}

impl ProcessorHealth {
	pub fn is_healthy(&self) -> bool {
		!self.failing
	}
}

/// Latest known state of both processors, published as a whole by the
/// health monitor and only ever read as a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HealthSnapshot {
	pub default_healthy:     bool,
	pub fallback_healthy:    bool,
	pub next_check_delay_ms: u64,
}

impl HealthSnapshot {
	/// Combines one probe per processor. `None` means the processor could
	/// not be probed: it counts as failing and asks for an immediate recheck.
	pub fn from_probes(
		default: Option<ProcessorHealth>,
		fallback: Option<ProcessorHealth>,
	) -> Self {
		let next_check_delay_ms = match (default, fallback) {
			(Some(default), Some(fallback)) => {
				default.min_response_time.max(fallback.min_response_time)
			}
			_ => 0,
		};

		Self {
			default_healthy: default.is_some_and(|h| h.is_healthy()),
			fallback_healthy: fallback.is_some_and(|h| h.is_healthy()),
			next_check_delay_ms,
		}
	}

	pub fn any_healthy(&self) -> bool {
		self.default_healthy || self.fallback_healthy
	}

	pub fn next_check_delay(&self) -> Duration {
		Duration::from_millis(self.next_check_delay_ms)
	}
}
