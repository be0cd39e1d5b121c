use derive_more::derive::{Display, Error};
use reqwest::Client;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::summary::SummaryResponse;

#[derive(Debug, Display, Error)]
pub enum PeerError {
	#[display("Peer could not be reached: {_0}")]
	Unreachable(reqwest::Error),
	#[display("Peer answered with status {status}.")]
	Rejected { status: u16 },
	#[display("Peer summary could not be read: {_0}")]
	MalformedResponse(reqwest::Error),
	#[display("Summary window could not be formatted.")]
	InvalidWindow,
}

/// Reads the local-only summary of the sibling instance.
#[derive(Clone)]
pub struct PeerSummaryClient {
	http_client: Client,
	peer_url:    String,
}

impl PeerSummaryClient {
	pub fn new(http_client: Client, peer_url: impl Into<String>) -> Self {
		Self {
			http_client,
			peer_url: peer_url.into(),
		}
	}

	pub async fn fetch(
		&self,
		from: OffsetDateTime,
		to: OffsetDateTime,
	) -> Result<SummaryResponse, PeerError> {
		let from = from.format(&Rfc3339).map_err(|_| PeerError::InvalidWindow)?;
		let to = to.format(&Rfc3339).map_err(|_| PeerError::InvalidWindow)?;
		let url = format!(
			"{}/payments-summary-single",
			self.peer_url.trim_end_matches('/')
		);

		let resp = self
			.http_client
			.get(&url)
			.query(&[("from", from), ("to", to)])
			.send()
			.await
			.map_err(PeerError::Unreachable)?;

		if !resp.status().is_success() {
			return Err(PeerError::Rejected {
				status: resp.status().as_u16(),
			});
		}

		resp.json::<SummaryResponse>()
			.await
			.map_err(PeerError::MalformedResponse)
	}
}
