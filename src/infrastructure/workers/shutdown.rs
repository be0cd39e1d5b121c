use tokio::sync::watch;

/// Process-wide cancellation signal shared by every long-lived task.
#[derive(Clone)]
pub struct ShutdownSignal {
	receiver: watch::Receiver<bool>,
}

pub struct ShutdownTrigger {
	sender: watch::Sender<bool>,
}

pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
	let (sender, receiver) = watch::channel(false);
	(ShutdownTrigger { sender }, ShutdownSignal { receiver })
}

impl ShutdownTrigger {
	pub fn trigger(&self) {
		self.sender.send_replace(true);
	}
}

impl ShutdownSignal {
	pub fn is_cancelled(&self) -> bool {
		*self.receiver.borrow()
	}

	/// Resolves once shutdown is triggered or the trigger is dropped.
	pub async fn cancelled(&mut self) {
		let _ = self.receiver.wait_for(|stop| *stop).await;
	}
}
