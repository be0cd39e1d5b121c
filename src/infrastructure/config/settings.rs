use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::workers::payment_dispatcher::DispatcherSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	#[serde(default = "default_server_host")]
	pub server_host: String,
	#[serde(default = "default_server_port")]
	pub server_port: u16,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive: u64,
	pub default_payment_processor_url: String,
	pub fallback_payment_processor_url: String,
	pub peer_url: Option<String>,
	#[serde(default = "default_workers")]
	pub workers: usize,
	#[serde(default = "default_queue_capacity")]
	pub queue_capacity: usize,
	#[serde(default = "default_processor_timeout_ms")]
	pub processor_timeout_ms: u64,
	#[serde(default = "default_health_check_min_interval_ms")]
	pub health_check_min_interval_ms: u64,
}

fn default_server_host() -> String {
	"0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
	9999
}

fn default_server_keepalive() -> u64 {
	5
}

fn default_workers() -> usize {
	1000
}

fn default_queue_capacity() -> usize {
	5000
}

fn default_processor_timeout_ms() -> u64 {
	10_000
}

// Processors answer 429 to more than one health call every five seconds.
fn default_health_check_min_interval_ms() -> u64 {
	5_000
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn dispatcher_settings(&self) -> DispatcherSettings {
		DispatcherSettings {
			workers:        self.workers,
			queue_capacity: self.queue_capacity,
		}
	}

	pub fn processor_timeout(&self) -> Duration {
		Duration::from_millis(self.processor_timeout_ms)
	}

	pub fn health_check_min_interval(&self) -> Duration {
		Duration::from_millis(self.health_check_min_interval_ms)
	}

	pub fn peer_url(&self) -> Option<&str> {
		self.peer_url.as_deref().filter(|url| !url.trim().is_empty())
	}
}
