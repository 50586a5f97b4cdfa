//! Adapter-level error types.
//!
//! Broker-reported failures are deliberately absent here: the adapter returns those as
//! plain response data (see [`TokenResponse`](crate::response::TokenResponse)) rather
//! than raising them, with the single exception of the redirect-URI misconfiguration,
//! which no caller can recover from without changing their app registration.

// self
use crate::_prelude::*;

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The application's registration is missing the broker-plugin redirect URI.
	///
	/// Raised when interactive sign-in fails with the identity provider's `AADSTS50011`
	/// (redirect URI mismatch); no token can be obtained until the named URI is added to
	/// the app registration, so this is surfaced as an error instead of response data.
	#[error(
		"Please register one more redirect_uri to your app: \
		 ms-appx-web://Microsoft.AAD.BrokerPlugin/{client_id}"
	)]
	NeedRedirectUri {
		/// OAuth 2.0 client identifier to substitute into the redirect URI.
		client_id: String,
	},
	/// The authority string is not a valid URL.
	#[error("Authority is not a valid URL.")]
	InvalidAuthority {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The broker returned an ID token whose claims blob is not valid JSON.
	#[error("Broker returned malformed ID token claims.")]
	IdTokenClaims {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn need_redirect_uri_embeds_client_id() {
		let err = Error::NeedRedirectUri { client_id: "my-client".into() };

		assert!(
			err.to_string().contains("ms-appx-web://Microsoft.AAD.BrokerPlugin/my-client"),
			"Remediation message should name the exact broker-plugin redirect URI."
		);
	}
}
