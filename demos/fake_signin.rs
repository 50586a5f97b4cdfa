//! Walks the interactive-then-silent sequence against the scripted fake broker.
//!
//! ```sh
//! cargo run --example fake_signin --features test
//! ```

// crates.io
use color_eyre::Result;
// self
use platform_broker::{
	_preludet::*,
	adapter::InteractiveSigninRequest,
	broker::{BrokerAccount, TokenGrant},
};

const AUTHORITY: &str = "https://login.microsoftonline.com/common";
const CLIENT_ID: &str = "26a7ee05-5602-4d76-a7ba-eae8b7b67941";
const SCOPE: &str = "https://graph.microsoft.com/.default";

fn main() -> Result<()> {
	color_eyre::install()?;

	let broker = Arc::new(FakeBroker::new());
	let account = BrokerAccount { account_id: "ACC1".into(), client_info: "CI1".into() };

	broker.script_signin_interactively(Ok(TokenGrant {
		access_token: "AT-interactive".into(),
		expires_in: 3600,
		id_token: Some(r#"{"preferred_username":"user@contoso.com"}"#.into()),
		account: account.clone(),
	}));
	broker.script_read_account_by_id(Ok(account.clone()));
	broker.script_acquire_token_silently(Ok(TokenGrant {
		access_token: "AT-silent".into(),
		expires_in: 3600,
		id_token: None,
		account,
	}));

	let adapter = build_fake_adapter(broker);
	let signin = adapter.sign_in_interactively(
		AUTHORITY,
		CLIENT_ID,
		InteractiveSigninRequest::new().with_scope(SCOPE).with_prompt("select_account"),
	)?;

	println!("sign-in response: {}", serde_json::to_string_pretty(&signin)?);

	let account_id = signin.account_id.as_deref().unwrap_or_default();
	let token = adapter.acquire_token_silently(AUTHORITY, CLIENT_ID, account_id, SCOPE, None)?;

	println!("silent token response: {}", serde_json::to_string_pretty(&token)?);

	Ok(())
}
