use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::domain::payment::ProcessorSelection;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct WindowSummary {
	#[serde(rename = "totalRequests")]
	pub total_requests: u64,
	#[serde(rename = "totalAmount")]
	pub total_amount:   f64,
}

impl WindowSummary {
	pub fn include(&mut self, amount: f64) {
		self.total_requests += 1;
		self.total_amount += amount;
	}

	/// Rounds the total amount to one decimal place.
	pub fn rounded(self) -> Self {
		Self {
			total_requests: self.total_requests,
			total_amount:   (self.total_amount * 10.0).round() / 10.0,
		}
	}
}

impl Add for WindowSummary {
	type Output = WindowSummary;

	fn add(self, other: WindowSummary) -> WindowSummary {
		WindowSummary {
			total_requests: self.total_requests + other.total_requests,
			total_amount:   self.total_amount + other.total_amount,
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct SummaryResponse {
	pub default:  WindowSummary,
	pub fallback: WindowSummary,
}

impl SummaryResponse {
	pub fn for_processor(
		&mut self,
		processor: ProcessorSelection,
	) -> &mut WindowSummary {
		match processor {
			ProcessorSelection::Default => &mut self.default,
			ProcessorSelection::Fallback => &mut self.fallback,
		}
	}

	pub fn rounded(self) -> Self {
		Self {
			default:  self.default.rounded(),
			fallback: self.fallback.rounded(),
		}
	}

	/// Adds a peer's summary field by field.
	pub fn merge(self, peer: SummaryResponse) -> Self {
		Self {
			default:  self.default + peer.default,
			fallback: self.fallback + peer.fallback,
		}
		.rounded()
	}
}
