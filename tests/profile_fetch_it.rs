#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use oauth2_clerk::{
	config::ClerkStrategyOptions,
	error::{Error, ProfileError},
	http::{ReqwestUserinfoClient, UserinfoHttpClient},
	profile::ProfileValue,
	strategy::ClerkStrategy,
};

const USERINFO_BODY: &str = "{\"user_id\":\"u1\",\"name\":\"Jane Doe\",\"given_name\":\"Jane\",\
	\"family_name\":\"Doe\",\"email\":\"j@x.com\",\"picture\":\"http://x/p.png\"}";

/// Builds a reqwest transport that accepts the self-signed certificates produced by
/// `httpmock` during tests.
fn insecure_userinfo_client() -> ReqwestUserinfoClient {
	let client = reqwest::Client::builder()
		.danger_accept_invalid_certs(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestUserinfoClient::with_client(client)
}

fn strategy_for(server: &MockServer) -> ClerkStrategy<ReqwestUserinfoClient> {
	ClerkStrategy::with_http_client(
		ClerkStrategyOptions::new(
			format!("localhost:{}", server.address().port()),
			"CLIENT_ID",
			"CLIENT_SECRET",
			"https://example.app/callback",
		),
		insecure_userinfo_client(),
	)
}

#[tokio::test]
async fn transport_sends_a_bare_bearer_get() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/oauth/userinfo")
				.header("authorization", "Bearer access-123");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = insecure_userinfo_client();
	let response = client
		.fetch_userinfo(&server.url("/oauth/userinfo"), "access-123")
		.await
		.expect("Userinfo request should succeed against the mock.");

	mock.assert_async().await;

	assert_eq!(response.status, 200);
	assert_eq!(response.body, b"{}");
}

#[tokio::test]
async fn fetch_profile_queries_the_derived_userinfo_endpoint() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/oauth/userinfo")
				.header("authorization", "Bearer access-123");
			then.status(200).header("content-type", "application/json").body(USERINFO_BODY);
		})
		.await;
	let strategy = strategy_for(&server);
	let profile = strategy
		.fetch_profile("access-123")
		.await
		.expect("Profile fetch should succeed against the mock provider.");

	mock.assert_async().await;

	assert_eq!(profile.provider, "clerk");
	assert_eq!(profile.id.as_deref(), Some("u1"));
	assert_eq!(profile.display_name.as_deref(), Some("Jane Doe"));
	assert_eq!(profile.emails, Some(vec![ProfileValue { value: "j@x.com".into() }]));
	assert_eq!(profile.photos, Some(vec![ProfileValue { value: "http://x/p.png".into() }]));

	let raw = profile.raw.expect("The raw payload should ride along unmodified.");

	assert_eq!(raw.given_name.as_deref(), Some("Jane"));
	assert_eq!(raw.family_name.as_deref(), Some("Doe"));
}

#[tokio::test]
async fn provider_error_statuses_fail_the_fetch() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/oauth/userinfo");
			then.status(401).body("Unauthorized");
		})
		.await;
	let strategy = strategy_for(&server);
	let err = strategy
		.fetch_profile("expired-token")
		.await
		.expect_err("A 401 from the provider must fail the fetch.");

	mock.assert_async().await;

	assert!(matches!(
		err,
		Error::Profile(ProfileError::Endpoint { status: 401, body_preview: Some(preview) })
			if preview == "Unauthorized"
	));
}
