use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequest {
	#[serde(rename = "correlationId")]
	pub correlation_id: String,
	pub amount:         f64,
}

/// Raw window bounds; anything that is not RFC 3339 counts as absent.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct PaymentsSummaryFilter {
	pub from: Option<String>,
	pub to:   Option<String>,
}

impl PaymentsSummaryFilter {
	pub fn window_start(&self) -> Option<OffsetDateTime> {
		self.from.as_deref().and_then(parse_timestamp)
	}

	pub fn window_end(&self) -> Option<OffsetDateTime> {
		self.to.as_deref().and_then(parse_timestamp)
	}
}

fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(value, &Rfc3339).ok()
}
