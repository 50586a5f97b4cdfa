//! Normalization of broker results into wire-shaped token responses.
//!
//! Callers above this layer expect the mapping an identity provider would return on the
//! wire: optional `access_token`/`expires_in`/`id_token_claims`/`client_info`/
//! `_account_id` keys on success, or `error` + `error_description` on failure.
//! Empty and zero values are treated as genuinely absent and never emitted.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	broker::{AuthResult, BrokerFailure, TokenGrant},
};

/// Error label attached to every normalized broker failure.
pub const BROKER_ERROR: &str = "broker_error";

/// Wire-shaped token response produced from a broker result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer access token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub access_token: Option<String>,
	/// Access token lifetime in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<u64>,
	/// Parsed ID-token claims object.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token_claims: Option<Map<String, Value>>,
	/// Client metadata blob from the granted account.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_info: Option<String>,
	/// Opaque broker account identifier for subsequent silent acquisitions.
	#[serde(default, rename = "_account_id", skip_serializing_if = "Option::is_none")]
	pub account_id: Option<String>,
	/// Error label, always [`BROKER_ERROR`] when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	/// Composed description embedding context, status, error code, and tag.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_description: Option<String>,
}
impl TokenResponse {
	/// Normalizes a raw broker result.
	///
	/// Fails only when a granted ID-token claims blob is not valid JSON; broker-reported
	/// failures normalize into the error shape instead of propagating.
	pub fn from_result(result: AuthResult) -> Result<Self> {
		match result {
			Ok(grant) => Self::from_grant(&grant),
			Err(failure) => Ok(Self::from_failure(&failure)),
		}
	}

	/// Normalizes a successful grant, dropping empty and zero values.
	pub fn from_grant(grant: &TokenGrant) -> Result<Self> {
		let id_token_claims = match grant.id_token.as_deref() {
			None | Some("") => None,
			Some(raw) => Some(parse_claims(raw)?).filter(|claims| !claims.is_empty()),
		};

		Ok(Self {
			access_token: non_empty(&grant.access_token),
			expires_in: (grant.expires_in != 0).then_some(grant.expires_in),
			id_token_claims,
			client_info: non_empty(&grant.account.client_info),
			account_id: non_empty(&grant.account.account_id),
			error: None,
			error_description: None,
		})
	}

	/// Normalizes a broker failure into the `error` + `error_description` shape.
	pub fn from_failure(failure: &BrokerFailure) -> Self {
		Self {
			error: Some(BROKER_ERROR.into()),
			error_description: Some(failure.describe()),
			..Default::default()
		}
	}

	/// Returns true when the response carries the error shape.
	pub fn is_error(&self) -> bool {
		self.error.is_some()
	}
}

fn non_empty(value: &str) -> Option<String> {
	if value.is_empty() { None } else { Some(value.to_owned()) }
}

fn parse_claims(raw: &str) -> Result<Map<String, Value>> {
	let mut deserializer = serde_json::Deserializer::from_str(raw);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::IdTokenClaims { source })
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::broker::BrokerAccount;

	fn grant() -> TokenGrant {
		TokenGrant {
			access_token: "AT1".into(),
			expires_in: 3600,
			id_token: None,
			account: BrokerAccount { account_id: "ACC1".into(), client_info: "CI1".into() },
		}
	}

	#[test]
	fn success_mapping_omits_absent_keys() {
		let response =
			TokenResponse::from_grant(&grant()).expect("Grant fixture should normalize.");
		let value = serde_json::to_value(&response).expect("Response should serialize.");

		assert_eq!(
			value,
			json!({
				"access_token": "AT1",
				"expires_in": 3600,
				"client_info": "CI1",
				"_account_id": "ACC1",
			})
		);
	}

	#[test]
	fn falsy_values_are_treated_as_absent() {
		let mut sparse = grant();

		sparse.expires_in = 0;
		sparse.id_token = Some("{}".into());
		sparse.account.client_info = String::new();

		let response =
			TokenResponse::from_grant(&sparse).expect("Sparse grant should normalize.");

		assert_eq!(response.expires_in, None);
		assert_eq!(response.id_token_claims, None);
		assert_eq!(response.client_info, None);
		assert_eq!(response.access_token.as_deref(), Some("AT1"));
	}

	#[test]
	fn id_token_claims_are_parsed_when_present() {
		let mut with_claims = grant();

		with_claims.id_token = Some(r#"{"preferred_username":"user@example.com"}"#.into());

		let response =
			TokenResponse::from_grant(&with_claims).expect("Claims fixture should normalize.");
		let claims = response.id_token_claims.expect("Claims object should be present.");

		assert_eq!(claims["preferred_username"], json!("user@example.com"));
	}

	#[test]
	fn malformed_id_token_claims_error() {
		let mut broken = grant();

		broken.id_token = Some("not-json".into());

		let err = TokenResponse::from_grant(&broken)
			.expect_err("Malformed claims blob must be rejected.");

		assert!(matches!(err, Error::IdTokenClaims { .. }));
	}

	#[test]
	fn failure_mapping_contains_exactly_error_keys() {
		let failure = BrokerFailure {
			context: "Sign in failed".into(),
			status: 4,
			error_code: 10,
			tag: "tag-1".into(),
		};
		let response = TokenResponse::from_failure(&failure);
		let value = serde_json::to_value(&response).expect("Response should serialize.");

		assert_eq!(
			value,
			json!({
				"error": "broker_error",
				"error_description": "Sign in failed. Status: 4, Error code: 10, Tag: tag-1",
			})
		);
		assert!(response.is_error());
	}
}
