//! Capability seam over the platform-owned authentication broker.
//!
//! The broker itself (account storage, token issuance, consent UI, secure credential
//! storage) is host-platform property and cannot be reimplemented; this module defines
//! the narrow contract the adapter consumes so production code can bind the real
//! platform library while tests substitute a scripted fake. Every primitive is
//! asynchronous and reports through a one-shot completion callback; see
//! [`bridge`](crate::bridge) for how call sites block on that callback.

// self
use crate::{
	_prelude::*,
	params::AuthParameters,
	window::WindowHandle,
};

/// One-shot completion callback accepted by every broker primitive.
pub type CompletionCallback<T> = Box<dyn FnOnce(T) + Send + 'static>;
/// Outcome of a sign-in or token-acquisition primitive.
pub type AuthResult = std::result::Result<TokenGrant, BrokerFailure>;
/// Outcome of the account lookup primitive.
pub type AccountResult = std::result::Result<BrokerAccount, BrokerFailure>;

/// Asynchronous, callback-driven primitives exposed by the platform broker.
///
/// Implementations must invoke each completion callback exactly once. They may do so
/// inline on the calling thread or from an internal worker thread; the adapter's
/// blocking bridge tolerates either ordering.
pub trait PlatformBroker
where
	Self: Send + Sync,
{
	/// Signs in without UI, letting the platform pick a default account.
	fn signin_silently(
		&self,
		params: &AuthParameters,
		correlation_id: &str,
		on_complete: CompletionCallback<AuthResult>,
	);

	/// Signs in with broker-owned UI anchored to the provided parent window.
	///
	/// `account_hint` pre-fills the account picker and may be empty.
	fn signin_interactively(
		&self,
		window: WindowHandle,
		params: &AuthParameters,
		correlation_id: &str,
		account_hint: &str,
		on_complete: CompletionCallback<AuthResult>,
	);

	/// Acquires a token for an already-resolved account without UI.
	fn acquire_token_silently(
		&self,
		params: &AuthParameters,
		correlation_id: &str,
		account: &BrokerAccount,
		on_complete: CompletionCallback<AuthResult>,
	);

	/// Acquires a token for an already-resolved account, presenting UI when required.
	fn acquire_token_interactively(
		&self,
		window: WindowHandle,
		params: &AuthParameters,
		correlation_id: &str,
		account: &BrokerAccount,
		on_complete: CompletionCallback<AuthResult>,
	);

	/// Resolves the broker's account object for an opaque account identifier.
	fn read_account_by_id(
		&self,
		account_id: &str,
		correlation_id: &str,
		on_complete: CompletionCallback<AccountResult>,
	);
}

/// Successful payload of a sign-in or token-acquisition primitive.
///
/// The granted account is non-optional: the platform broker always attaches the account
/// a token was issued for, so the invariant is carried in the type instead of asserted
/// at every use site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Bearer access token issued by the broker.
	pub access_token: String,
	/// Access token lifetime in seconds; zero means the broker supplied none.
	pub expires_in: u64,
	/// Raw ID-token claims blob (a JSON object in string form), when issued.
	pub id_token: Option<String>,
	/// Account the token was granted for.
	pub account: BrokerAccount,
}

/// Account reference attached to broker grants and account lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerAccount {
	/// Opaque platform identifier for the account.
	pub account_id: String,
	/// Client metadata blob the identity provider associates with the account.
	pub client_info: String,
}

/// Failure reported by any broker primitive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("{}", self.describe())]
pub struct BrokerFailure {
	/// Human-readable context message describing what the broker was doing.
	pub context: String,
	/// Platform status code for the failing operation.
	pub status: i32,
	/// Provider- or broker-defined error code.
	pub error_code: i64,
	/// Opaque correlation tag for cross-system log correlation.
	pub tag: String,
}
impl BrokerFailure {
	/// Composes the wire-shaped description embedding context, status, error code, and
	/// correlation tag, in that order.
	pub fn describe(&self) -> String {
		format!(
			"{}. Status: {}, Error code: {}, Tag: {}",
			self.context, self.status, self.error_code, self.tag
		)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn describe_orders_failure_fields() {
		let failure = BrokerFailure {
			context: "No account found".into(),
			status: 6,
			error_code: -2147186943,
			tag: "0x52461746".into(),
		};

		assert_eq!(
			failure.describe(),
			"No account found. Status: 6, Error code: -2147186943, Tag: 0x52461746"
		);
	}
}
