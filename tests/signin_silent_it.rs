// crates.io
use serde_json::json;
// self
use platform_broker::{
	_preludet::*,
	broker::{BrokerAccount, BrokerFailure, TokenGrant},
	params::DEFAULT_SCOPE,
};

const AUTHORITY: &str = "https://login.microsoftonline.com/common";
const CLIENT_ID: &str = "client-1";

fn grant() -> TokenGrant {
	TokenGrant {
		access_token: "AT1".into(),
		expires_in: 3600,
		id_token: None,
		account: BrokerAccount { account_id: "ACC1".into(), client_info: "CI1".into() },
	}
}

#[test]
fn silent_signin_normalizes_a_grant_into_the_wire_mapping() {
	let broker = Arc::new(FakeBroker::new());

	broker.script_signin_silently(Ok(grant()));

	let adapter = build_fake_adapter(broker);
	let response = adapter
		.sign_in_silently(AUTHORITY, CLIENT_ID, None)
		.expect("Silent sign-in against the fake broker should succeed.");
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
fn silent_signin_defaults_the_requested_scope() {
	let broker = Arc::new(FakeBroker::new());

	broker.script_signin_silently(Ok(grant()));

	let adapter = build_fake_adapter(broker.clone());

	adapter
		.sign_in_silently(AUTHORITY, CLIENT_ID, None)
		.expect("Silent sign-in against the fake broker should succeed.");

	let calls = broker.calls();

	assert_eq!(calls.len(), 1);

	match &calls[0] {
		RecordedCall::SigninSilently { params } => {
			assert_eq!(params.requested_scopes.as_deref(), Some(DEFAULT_SCOPE));
			assert_eq!(params.client_id, CLIENT_ID);
			assert_eq!(params.authority.as_str(), AUTHORITY);
		},
		other => panic!("Unexpected broker call: {other:?}"),
	}
}

#[test]
fn silent_signin_respects_a_caller_supplied_scope() {
	let broker = Arc::new(FakeBroker::new());

	broker.script_signin_silently(Ok(grant()));

	let adapter = build_fake_adapter(broker.clone());

	adapter
		.sign_in_silently(AUTHORITY, CLIENT_ID, Some("User.Read"))
		.expect("Silent sign-in against the fake broker should succeed.");

	match &broker.calls()[0] {
		RecordedCall::SigninSilently { params } =>
			assert_eq!(params.requested_scopes.as_deref(), Some("User.Read")),
		other => panic!("Unexpected broker call: {other:?}"),
	}
}

#[test]
fn silent_signin_returns_broker_failures_as_response_data() {
	let broker = Arc::new(FakeBroker::new());

	broker.script_signin_silently(Err(BrokerFailure {
		context: "No default account".into(),
		status: 6,
		error_code: -2147186943,
		tag: "0x52461746".into(),
	}));

	let adapter = build_fake_adapter(broker);
	let response = adapter
		.sign_in_silently(AUTHORITY, CLIENT_ID, None)
		.expect("Broker failures must come back as data, not as an Err.");

	assert!(response.is_error());

	let value = serde_json::to_value(&response).expect("Response should serialize.");

	assert_eq!(
		value,
		json!({
			"error": "broker_error",
			"error_description":
				"No default account. Status: 6, Error code: -2147186943, Tag: 0x52461746",
		})
	);

	let description =
		response.error_description.expect("Error responses carry a composed description.");
	let positions = ["No default account", "Status: 6", "Error code: -2147186943", "Tag:"]
		.map(|needle| description.find(needle).expect("Description substring should be present."));

	assert!(
		positions.windows(2).all(|pair| pair[0] < pair[1]),
		"Context, status, error code, and tag must appear in that order."
	);
}
