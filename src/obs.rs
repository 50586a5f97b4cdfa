//! Optional observability helpers for adapter calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `platform_broker.call` with the `call`
//!   (operation) and `stage` (call site) fields, plus a warning when an unsupported prompt value
//!   is dropped.
//! - Enable `metrics` to increment the `platform_broker_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Adapter operations observed by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Silent sign-in.
	SigninSilent,
	/// Interactive sign-in.
	SigninInteractive,
	/// Silent token acquisition for a known account.
	AcquireTokenSilent,
	/// Interactive token acquisition for a known account.
	AcquireTokenInteractive,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::SigninSilent => "signin_silently",
			CallKind::SigninInteractive => "signin_interactively",
			CallKind::AcquireTokenSilent => "acquire_token_silently",
			CallKind::AcquireTokenInteractive => "acquire_token_interactively",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to an adapter operation.
	Attempt,
	/// Successful completion (including broker errors returned as data).
	Success,
	/// Failure raised back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
