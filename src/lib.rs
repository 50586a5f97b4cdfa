//! Synchronous adapter over platform authentication brokers—bridge callback-driven broker
//! primitives to blocking call sites and normalize results into wire-shaped token responses.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod adapter;
pub mod bridge;
pub mod broker;
pub mod error;
pub mod obs;
pub mod params;
pub mod response;
pub mod window;

#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and a scripted broker fake for integration tests; enabled via
	//! `cfg(test)` or the `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		adapter::BrokerAdapter,
		broker::{AccountResult, AuthResult, BrokerAccount, CompletionCallback, PlatformBroker},
		params::AuthParameters,
		window::{StaticWindows, WindowHandle},
	};

	/// Adapter type alias used by `FakeBroker`-backed integration tests.
	pub type FakeAdapter = BrokerAdapter<FakeBroker, StaticWindows>;

	/// One invocation observed by [`FakeBroker`], with the inputs it received.
	#[derive(Clone, Debug)]
	pub enum RecordedCall {
		/// Silent sign-in primitive.
		SigninSilently {
			/// Parameters the adapter marshaled for the call.
			params: AuthParameters,
		},
		/// Interactive sign-in primitive.
		SigninInteractively {
			/// Parent window handed to the broker UI.
			window: WindowHandle,
			/// Parameters the adapter marshaled for the call.
			params: AuthParameters,
			/// Account hint forwarded from the login hint.
			account_hint: String,
		},
		/// Silent token-acquisition primitive.
		AcquireTokenSilently {
			/// Parameters the adapter marshaled for the call.
			params: AuthParameters,
			/// Resolved account the token was requested for.
			account: BrokerAccount,
		},
		/// Interactive token-acquisition primitive.
		AcquireTokenInteractively {
			/// Parent window handed to the broker UI.
			window: WindowHandle,
			/// Parameters the adapter marshaled for the call.
			params: AuthParameters,
			/// Already-resolved account the token was requested for.
			account: BrokerAccount,
		},
		/// Account lookup primitive.
		ReadAccountById {
			/// Opaque account identifier being resolved.
			account_id: String,
		},
	}

	#[derive(Debug, Default)]
	struct FakeScript {
		signin_silently: VecDeque<AuthResult>,
		signin_interactively: VecDeque<AuthResult>,
		acquire_token_silently: VecDeque<AuthResult>,
		acquire_token_interactively: VecDeque<AuthResult>,
		read_account_by_id: VecDeque<AccountResult>,
	}

	/// Scripted in-process stand-in for the platform broker.
	///
	/// Each primitive pops the next scripted result for that primitive and invokes the
	/// completion callback inline on the caller's thread, recording the invocation and
	/// its inputs so tests can assert on what the adapter marshaled.
	#[derive(Debug, Default)]
	pub struct FakeBroker {
		script: Mutex<FakeScript>,
		calls: Mutex<Vec<RecordedCall>>,
	}
	impl FakeBroker {
		/// Creates a fake with an empty script; any un-scripted primitive call panics.
		pub fn new() -> Self {
			Self::default()
		}

		/// Scripts the next result of the silent sign-in primitive.
		pub fn script_signin_silently(&self, result: AuthResult) {
			self.script.lock().signin_silently.push_back(result);
		}

		/// Scripts the next result of the interactive sign-in primitive.
		pub fn script_signin_interactively(&self, result: AuthResult) {
			self.script.lock().signin_interactively.push_back(result);
		}

		/// Scripts the next result of the silent token-acquisition primitive.
		pub fn script_acquire_token_silently(&self, result: AuthResult) {
			self.script.lock().acquire_token_silently.push_back(result);
		}

		/// Scripts the next result of the interactive token-acquisition primitive.
		pub fn script_acquire_token_interactively(&self, result: AuthResult) {
			self.script.lock().acquire_token_interactively.push_back(result);
		}

		/// Scripts the next result of the account lookup primitive.
		pub fn script_read_account_by_id(&self, result: AccountResult) {
			self.script.lock().read_account_by_id.push_back(result);
		}

		/// Snapshot of every primitive invocation observed so far, in call order.
		pub fn calls(&self) -> Vec<RecordedCall> {
			self.calls.lock().clone()
		}

		fn record(&self, call: RecordedCall) {
			self.calls.lock().push(call);
		}
	}
	impl PlatformBroker for FakeBroker {
		fn signin_silently(
			&self,
			params: &AuthParameters,
			_correlation_id: &str,
			on_complete: CompletionCallback<AuthResult>,
		) {
			self.record(RecordedCall::SigninSilently { params: params.clone() });

			let result = self
				.script
				.lock()
				.signin_silently
				.pop_front()
				.expect("FakeBroker has no scripted result for signin_silently.");

			on_complete(result);
		}

		fn signin_interactively(
			&self,
			window: WindowHandle,
			params: &AuthParameters,
			_correlation_id: &str,
			account_hint: &str,
			on_complete: CompletionCallback<AuthResult>,
		) {
			self.record(RecordedCall::SigninInteractively {
				window,
				params: params.clone(),
				account_hint: account_hint.to_owned(),
			});

			let result = self
				.script
				.lock()
				.signin_interactively
				.pop_front()
				.expect("FakeBroker has no scripted result for signin_interactively.");

			on_complete(result);
		}

		fn acquire_token_silently(
			&self,
			params: &AuthParameters,
			_correlation_id: &str,
			account: &BrokerAccount,
			on_complete: CompletionCallback<AuthResult>,
		) {
			self.record(RecordedCall::AcquireTokenSilently {
				params: params.clone(),
				account: account.clone(),
			});

			let result = self
				.script
				.lock()
				.acquire_token_silently
				.pop_front()
				.expect("FakeBroker has no scripted result for acquire_token_silently.");

			on_complete(result);
		}

		fn acquire_token_interactively(
			&self,
			window: WindowHandle,
			params: &AuthParameters,
			_correlation_id: &str,
			account: &BrokerAccount,
			on_complete: CompletionCallback<AuthResult>,
		) {
			self.record(RecordedCall::AcquireTokenInteractively {
				window,
				params: params.clone(),
				account: account.clone(),
			});

			let result = self
				.script
				.lock()
				.acquire_token_interactively
				.pop_front()
				.expect("FakeBroker has no scripted result for acquire_token_interactively.");

			on_complete(result);
		}

		fn read_account_by_id(
			&self,
			account_id: &str,
			_correlation_id: &str,
			on_complete: CompletionCallback<AccountResult>,
		) {
			self.record(RecordedCall::ReadAccountById { account_id: account_id.to_owned() });

			let result = self
				.script
				.lock()
				.read_account_by_id
				.pop_front()
				.expect("FakeBroker has no scripted result for read_account_by_id.");

			on_complete(result);
		}
	}

	/// Builds an adapter over the provided fake and a console-less window locator whose
	/// desktop handle is `0xD0`.
	pub fn build_fake_adapter(broker: Arc<FakeBroker>) -> FakeAdapter {
		BrokerAdapter::new(
			broker,
			Arc::new(StaticWindows { console: None, desktop: WindowHandle(0xD0) }),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use parking_lot::{Condvar, Mutex};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
#[cfg(test)] use {color_eyre as _, platform_broker as _};
