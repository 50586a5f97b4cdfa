//! Callback-to-blocking bridge used by every adapter operation.
//!
//! The broker's primitives are asynchronous and report through a one-shot completion
//! callback; adapter call sites are synchronous. [`PendingCall`] bridges the two: the
//! caller allocates a fresh pair per invocation, hands the [`Completer`] to the broker
//! as its callback, and blocks on [`PendingCall::wait`] until the callback fires.
//!
//! The single-write invariant is enforced at the type level: [`Completer::complete`]
//! consumes the completer and `Completer` is not `Clone`, so exactly one completion can
//! occur per pending call. The wait carries no timeout and no cancellation path; if the
//! broker never completes, the caller blocks indefinitely, matching the contract of the
//! underlying platform library.

// self
use crate::_prelude::*;

struct Inner<T> {
	slot: Mutex<Option<T>>,
	signal: Condvar,
}

/// Waiting half of a one-shot completion pair.
pub struct PendingCall<T> {
	inner: Arc<Inner<T>>,
}
impl<T> PendingCall<T> {
	/// Allocates a fresh pending call and its paired completer.
	pub fn new() -> (Self, Completer<T>) {
		let inner = Arc::new(Inner { slot: Mutex::new(None), signal: Condvar::new() });
		let completer = Completer { inner: inner.clone() };

		(Self { inner }, completer)
	}

	/// Blocks the calling thread until the paired completer delivers a value.
	///
	/// A completion that happened before this call is observed immediately; the value is
	/// never lost to ordering.
	pub fn wait(self) -> T {
		let mut slot = self.inner.slot.lock();

		loop {
			if let Some(value) = slot.take() {
				return value;
			}

			self.inner.signal.wait(&mut slot);
		}
	}
}
impl<T> Debug for PendingCall<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("PendingCall(..)")
	}
}

/// Completing half of a one-shot completion pair.
pub struct Completer<T> {
	inner: Arc<Inner<T>>,
}
impl<T> Completer<T> {
	/// Writes the result slot and releases the paired waiter.
	pub fn complete(self, value: T) {
		*self.inner.slot.lock() = Some(value);

		self.inner.signal.notify_one();
	}
}
impl<T> Completer<T>
where
	T: Send + 'static,
{
	/// Boxes the completer into the callback shape broker primitives accept.
	pub fn into_callback(self) -> Box<dyn FnOnce(T) + Send + 'static> {
		Box::new(move |value| self.complete(value))
	}
}
impl<T> Debug for Completer<T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Completer(..)")
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{thread, time::Duration};
	// self
	use super::*;

	#[test]
	fn wait_observes_cross_thread_completion() {
		let (pending, completer) = PendingCall::new();
		let worker = thread::spawn(move || {
			thread::sleep(Duration::from_millis(20));
			completer.complete(42_u32);
		});

		assert_eq!(pending.wait(), 42);

		worker.join().expect("Completion thread should exit cleanly.");
	}

	#[test]
	fn completion_before_wait_is_not_lost() {
		let (pending, completer) = PendingCall::new();

		completer.complete("early");

		assert_eq!(pending.wait(), "early");
	}

	#[test]
	fn into_callback_delivers_through_boxed_closure() {
		let (pending, completer) = PendingCall::new();
		let callback = completer.into_callback();

		callback(7_u8);

		assert_eq!(pending.wait(), 7);
	}
}
