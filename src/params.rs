//! Per-call request parameters marshaled for broker primitives.

// self
use crate::_prelude::*;

/// Scope requested when the caller supplies none.
pub const DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Parameters describing one broker request.
///
/// Built fresh for every adapter call and never persisted. Builders are consuming so
/// call sites read as a single marshaling expression; optional fields left unset are
/// simply not forwarded to the broker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthParameters {
	/// OAuth 2.0 client identifier of the requesting application.
	pub client_id: String,
	/// Identity-provider authority the request targets.
	pub authority: Url,
	/// Space-delimited requested scopes.
	pub requested_scopes: Option<String>,
	/// Redirect URI; the broker substitutes its own, but requires a non-empty value.
	pub redirect_uri: Option<String>,
	/// Login hint pre-filling the identity field.
	pub login_hint: Option<String>,
	/// Decoded claims challenge to re-submit with the request.
	pub decoded_claims: Option<String>,
	/// Account-selection UI option for interactive flows.
	pub select_account_option: Option<SelectAccountOption>,
	/// Additional query parameters forwarded verbatim (key-ordered, string-coerced).
	pub additional_parameters: BTreeMap<String, String>,
}
impl AuthParameters {
	/// Creates parameters for the provided client identifier and authority.
	pub fn new(client_id: impl Into<String>, authority: Url) -> Self {
		Self {
			client_id: client_id.into(),
			authority,
			requested_scopes: None,
			redirect_uri: None,
			login_hint: None,
			decoded_claims: None,
			select_account_option: None,
			additional_parameters: BTreeMap::new(),
		}
	}

	/// Sets the space-delimited requested scopes.
	pub fn with_requested_scopes(mut self, scopes: impl Into<String>) -> Self {
		self.requested_scopes = Some(scopes.into());

		self
	}

	/// Sets the redirect URI forwarded to the broker.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = Some(redirect_uri.into());

		self
	}

	/// Sets the login hint.
	pub fn with_login_hint(mut self, login_hint: impl Into<String>) -> Self {
		self.login_hint = Some(login_hint.into());

		self
	}

	/// Sets the decoded claims challenge.
	pub fn with_decoded_claims(mut self, claims: impl Into<String>) -> Self {
		self.decoded_claims = Some(claims.into());

		self
	}

	/// Sets the account-selection UI option.
	pub fn with_select_account_option(mut self, option: SelectAccountOption) -> Self {
		self.select_account_option = Some(option);

		self
	}

	/// Adds one additional query parameter, string-coercing the value.
	pub fn with_additional_parameter(
		mut self,
		key: impl Into<String>,
		value: impl ToString,
	) -> Self {
		self.additional_parameters.insert(key.into(), value.to_string());

		self
	}
}

/// Account-selection behavior of the broker's interactive UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectAccountOption {
	/// Show the local-accounts control in the account picker.
	ShowLocalAccountsControl,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn authority() -> Url {
		Url::parse("https://login.microsoftonline.com/common")
			.expect("Authority fixture should parse.")
	}

	#[test]
	fn builders_populate_optional_fields() {
		let params = AuthParameters::new("client-1", authority())
			.with_requested_scopes(DEFAULT_SCOPE)
			.with_redirect_uri("placeholder")
			.with_login_hint("user@example.com")
			.with_decoded_claims(r#"{"access_token":{}}"#)
			.with_select_account_option(SelectAccountOption::ShowLocalAccountsControl);

		assert_eq!(params.requested_scopes.as_deref(), Some(DEFAULT_SCOPE));
		assert_eq!(params.redirect_uri.as_deref(), Some("placeholder"));
		assert_eq!(params.login_hint.as_deref(), Some("user@example.com"));
		assert_eq!(params.decoded_claims.as_deref(), Some(r#"{"access_token":{}}"#));
		assert_eq!(
			params.select_account_option,
			Some(SelectAccountOption::ShowLocalAccountsControl)
		);
	}

	#[test]
	fn additional_parameters_are_string_coerced() {
		let params = AuthParameters::new("client-1", authority())
			.with_additional_parameter("max_age", 86400)
			.with_additional_parameter("domain_hint", "contoso.com");

		assert_eq!(params.additional_parameters.get("max_age").map(String::as_str), Some("86400"));
		assert_eq!(
			params.additional_parameters.get("domain_hint").map(String::as_str),
			Some("contoso.com")
		);
	}
}
