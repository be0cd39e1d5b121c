use std::sync::Arc;

use rinha_payments_dispatcher::infrastructure::config::settings::Config;
use rinha_payments_dispatcher::run;

fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = Arc::new(Config::load().expect("Failed to load configuration"));

	actix_web::rt::System::with_tokio_rt(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.build()
			.expect("Failed to build the Tokio runtime")
	})
	.block_on(run(config))
}
