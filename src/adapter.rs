//! The four broker-backed operations exposed to the calling library.
//!
//! Each operation marshals an [`AuthParameters`] for the request, invokes the matching
//! broker primitive with a one-shot completion callback, blocks on the
//! [`bridge`](crate::bridge) until that callback fires, and normalizes the broker's
//! result into a [`TokenResponse`]. Interactive token acquisition is the deliberate
//! exception and hands back the raw broker result; callers of that path consume the
//! grant object directly.

// crates.io
use rand::Rng as _;
// self
use crate::{
	_prelude::*,
	bridge::PendingCall,
	broker::{AccountResult, AuthResult, BrokerAccount, CompletionCallback, PlatformBroker},
	obs::{self, CallKind, CallOutcome, CallSpan},
	params::{AuthParameters, DEFAULT_SCOPE, SelectAccountOption},
	response::TokenResponse,
	window::{WindowHandle, WindowLocator},
};

/// Identity-provider code for a redirect-URI mismatch on the app registration.
const REDIRECT_URI_MISMATCH: &str = "AADSTS50011";
/// The broker requires a non-empty redirect URI but substitutes its own hardcoded one.
const PLACEHOLDER_REDIRECT_URI: &str = "placeholder";

/// Synchronous facade over a platform broker and a window locator.
///
/// The adapter owns no broker state of its own: every operation allocates fresh request
/// parameters and an isolated pending-call slot, so calls in flight from different
/// threads never interfere. Session and credential lifecycle belong entirely to the
/// underlying broker.
#[derive(Clone)]
pub struct BrokerAdapter<B, W>
where
	B: ?Sized + PlatformBroker,
	W: ?Sized + WindowLocator,
{
	/// Platform broker the adapter delegates to.
	pub broker: Arc<B>,
	/// Locator used to anchor interactive broker UI.
	pub windows: Arc<W>,
}
impl<B, W> BrokerAdapter<B, W>
where
	B: ?Sized + PlatformBroker,
	W: ?Sized + WindowLocator,
{
	/// Creates an adapter over the provided broker and window locator.
	pub fn new(broker: impl Into<Arc<B>>, windows: impl Into<Arc<W>>) -> Self {
		Self { broker: broker.into(), windows: windows.into() }
	}

	/// Signs in without UI, letting the platform select a default account.
	///
	/// `scope` defaults to [`DEFAULT_SCOPE`] when `None`. Broker failures come back as
	/// the `broker_error` response shape, never as an `Err`.
	pub fn sign_in_silently(
		&self,
		authority: &str,
		client_id: &str,
		scope: Option<&str>,
	) -> Result<TokenResponse> {
		const KIND: CallKind = CallKind::SigninSilent;

		let _span = CallSpan::new(KIND, "sign_in_silently").entered();

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = self.sign_in_silently_impl(authority, client_id, scope);

		record_outcome(KIND, &result);

		result
	}

	fn sign_in_silently_impl(
		&self,
		authority: &str,
		client_id: &str,
		scope: Option<&str>,
	) -> Result<TokenResponse> {
		let params = AuthParameters::new(client_id, parse_authority(authority)?)
			.with_requested_scopes(scope.unwrap_or(DEFAULT_SCOPE));
		let correlation_id = correlation_id();
		let result = wait_for(|on_complete| {
			self.broker.signin_silently(&params, &correlation_id, on_complete);
		});

		TokenResponse::from_result(result)
	}

	/// Signs in with broker-owned UI anchored to a resolved parent window.
	///
	/// The window is resolved as caller-supplied, else console, else desktop. A
	/// `select_account` prompt maps to the broker's local-accounts control; any other
	/// prompt value is logged and dropped so the request still proceeds. When the broker
	/// reports the identity provider's `AADSTS50011` (redirect URI mismatch), the
	/// failure is promoted to [`Error::NeedRedirectUri`] naming the redirect URI the
	/// application must register.
	pub fn sign_in_interactively(
		&self,
		authority: &str,
		client_id: &str,
		request: InteractiveSigninRequest,
	) -> Result<TokenResponse> {
		const KIND: CallKind = CallKind::SigninInteractive;

		let _span = CallSpan::new(KIND, "sign_in_interactively").entered();

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = self.sign_in_interactively_impl(authority, client_id, request);

		record_outcome(KIND, &result);

		result
	}

	fn sign_in_interactively_impl(
		&self,
		authority: &str,
		client_id: &str,
		request: InteractiveSigninRequest,
	) -> Result<TokenResponse> {
		let mut params = AuthParameters::new(client_id, parse_authority(authority)?)
			.with_requested_scopes(request.scope.as_deref().unwrap_or(DEFAULT_SCOPE))
			.with_redirect_uri(PLACEHOLDER_REDIRECT_URI);

		match request.prompt.as_deref() {
			None => (),
			Some("select_account") =>
				params = params
					.with_select_account_option(SelectAccountOption::ShowLocalAccountsControl),
			Some(other) => obs::warn_unsupported_prompt(other),
		}

		for (key, value) in &request.extra_parameters {
			params = params.with_additional_parameter(key.as_str(), value);
		}

		if let Some(claims) = request.claims.as_deref() {
			params = params.with_decoded_claims(claims);
		}

		let window = self.resolve_parent_window(request.window);
		let account_hint = request.login_hint.as_deref().unwrap_or("");
		let correlation_id = correlation_id();
		let result = wait_for(|on_complete| {
			self.broker.signin_interactively(
				window,
				&params,
				&correlation_id,
				account_hint,
				on_complete,
			);
		});
		let response = TokenResponse::from_result(result)?;

		if response
			.error_description
			.as_deref()
			.is_some_and(|description| description.contains(REDIRECT_URI_MISMATCH))
		{
			return Err(Error::NeedRedirectUri { client_id: client_id.to_owned() });
		}

		Ok(response)
	}

	/// Acquires a token without UI for an account previously returned by sign-in.
	///
	/// The opaque `account_id` is resolved through the broker's blocking account lookup
	/// first; a lookup failure short-circuits to the normalized error without ever
	/// invoking the token primitive.
	pub fn acquire_token_silently(
		&self,
		authority: &str,
		client_id: &str,
		account_id: &str,
		scope: &str,
		claims: Option<&str>,
	) -> Result<TokenResponse> {
		const KIND: CallKind = CallKind::AcquireTokenSilent;

		let _span = CallSpan::new(KIND, "acquire_token_silently").entered();

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result =
			self.acquire_token_silently_impl(authority, client_id, account_id, scope, claims);

		record_outcome(KIND, &result);

		result
	}

	fn acquire_token_silently_impl(
		&self,
		authority: &str,
		client_id: &str,
		account_id: &str,
		scope: &str,
		claims: Option<&str>,
	) -> Result<TokenResponse> {
		let account = match self.read_account_by_id(account_id) {
			Ok(account) => account,
			Err(failure) => return Ok(TokenResponse::from_failure(&failure)),
		};
		let mut params =
			AuthParameters::new(client_id, parse_authority(authority)?).with_requested_scopes(scope);

		if let Some(claims) = claims {
			params = params.with_decoded_claims(claims);
		}

		let correlation_id = correlation_id();
		let result = wait_for(|on_complete| {
			self.broker.acquire_token_silently(&params, &correlation_id, &account, on_complete);
		});

		TokenResponse::from_result(result)
	}

	/// Acquires a token with broker-owned UI against an already-resolved account.
	///
	/// Unlike the other operations this returns the raw broker result; callers on this
	/// path consume the grant and failure objects directly rather than the wire-shaped
	/// mapping. The parent window must be supplied explicitly.
	pub fn acquire_token_interactively(
		&self,
		authority: &str,
		client_id: &str,
		account: &BrokerAccount,
		scopes: &[String],
		window: WindowHandle,
		options: AcquireTokenOptions,
	) -> Result<AuthResult> {
		const KIND: CallKind = CallKind::AcquireTokenInteractive;

		let _span = CallSpan::new(KIND, "acquire_token_interactively").entered();

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = self
			.acquire_token_interactively_impl(authority, client_id, account, scopes, window, options);

		record_outcome(KIND, &result);

		result
	}

	fn acquire_token_interactively_impl(
		&self,
		authority: &str,
		client_id: &str,
		account: &BrokerAccount,
		scopes: &[String],
		window: WindowHandle,
		options: AcquireTokenOptions,
	) -> Result<AuthResult> {
		let mut params = AuthParameters::new(client_id, parse_authority(authority)?)
			.with_requested_scopes(scopes.join(" "));

		if let Some(login_hint) = options.login_hint.as_deref() {
			params = params.with_login_hint(login_hint);
		}
		if let Some(claims_challenge) = options.claims_challenge.as_deref() {
			params = params.with_decoded_claims(claims_challenge);
		}

		let correlation_id = correlation_id();

		Ok(wait_for(|on_complete| {
			self.broker.acquire_token_interactively(
				window,
				&params,
				&correlation_id,
				account,
				on_complete,
			);
		}))
	}

	fn read_account_by_id(&self, account_id: &str) -> AccountResult {
		let correlation_id = correlation_id();

		wait_for(|on_complete| {
			self.broker.read_account_by_id(account_id, &correlation_id, on_complete);
		})
	}

	fn resolve_parent_window(&self, caller_window: Option<WindowHandle>) -> WindowHandle {
		caller_window
			.or_else(|| self.windows.console_window())
			.unwrap_or_else(|| self.windows.desktop_window())
	}
}
impl<B, W> Debug for BrokerAdapter<B, W>
where
	B: ?Sized + PlatformBroker,
	W: ?Sized + WindowLocator,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("BrokerAdapter(..)")
	}
}

/// Caller-tunable inputs to [`BrokerAdapter::sign_in_interactively`].
#[derive(Clone, Debug, Default)]
pub struct InteractiveSigninRequest {
	/// Space-delimited scopes; defaults to [`DEFAULT_SCOPE`] when unset.
	pub scope: Option<String>,
	/// Parent window for the broker UI; console and desktop are tried when unset.
	pub window: Option<WindowHandle>,
	/// Requested UI prompt behavior (`select_account` is the only supported value).
	pub prompt: Option<String>,
	/// Login hint forwarded to the broker as its account hint.
	pub login_hint: Option<String>,
	/// Decoded claims challenge to attach to the request.
	pub claims: Option<String>,
	/// Additional query parameters forwarded string-coerced (domain hint, max age, ...).
	pub extra_parameters: BTreeMap<String, String>,
}
impl InteractiveSigninRequest {
	/// Creates an empty request; every field is optional.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the requested scope string.
	pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
		self.scope = Some(scope.into());

		self
	}

	/// Sets the parent window for the broker UI.
	pub fn with_window(mut self, window: WindowHandle) -> Self {
		self.window = Some(window);

		self
	}

	/// Sets the requested prompt behavior.
	pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
		self.prompt = Some(prompt.into());

		self
	}

	/// Sets the login hint.
	pub fn with_login_hint(mut self, login_hint: impl Into<String>) -> Self {
		self.login_hint = Some(login_hint.into());

		self
	}

	/// Sets the decoded claims challenge.
	pub fn with_claims(mut self, claims: impl Into<String>) -> Self {
		self.claims = Some(claims.into());

		self
	}

	/// Adds one extra query parameter, string-coercing the value.
	pub fn with_extra_parameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
		self.extra_parameters.insert(key.into(), value.to_string());

		self
	}
}

/// Caller-tunable inputs to [`BrokerAdapter::acquire_token_interactively`].
#[derive(Clone, Debug, Default)]
pub struct AcquireTokenOptions {
	/// Login hint attached to the request parameters.
	pub login_hint: Option<String>,
	/// Claims challenge re-submitted with the request.
	pub claims_challenge: Option<String>,
}
impl AcquireTokenOptions {
	/// Creates empty options; every field is optional.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the login hint.
	pub fn with_login_hint(mut self, login_hint: impl Into<String>) -> Self {
		self.login_hint = Some(login_hint.into());

		self
	}

	/// Sets the claims challenge.
	pub fn with_claims_challenge(mut self, claims_challenge: impl Into<String>) -> Self {
		self.claims_challenge = Some(claims_challenge.into());

		self
	}
}

/// Fresh random correlation id threaded through one broker primitive call.
fn correlation_id() -> String {
	format!("{:032x}", rand::rng().random::<u128>())
}

fn parse_authority(authority: &str) -> Result<Url> {
	Url::parse(authority).map_err(|source| Error::InvalidAuthority { source })
}

fn record_outcome<T>(kind: CallKind, result: &Result<T>) {
	match result {
		Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
		Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
	}
}

fn wait_for<T>(invoke: impl FnOnce(CompletionCallback<T>)) -> T
where
	T: Send + 'static,
{
	let (pending, completer) = PendingCall::new();

	invoke(completer.into_callback());

	pending.wait()
}
