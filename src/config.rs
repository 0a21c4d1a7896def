//! Strategy options and the endpoint resolution derived from them.
//!
//! Resolution is deterministic, I/O-free string construction: the configured domain is
//! trusted as a bare host (no scheme, no trailing slash) and is deliberately not
//! validated; a malformed value propagates into malformed endpoint URLs and surfaces
//! downstream as a parse or request failure.

// self
use crate::{_prelude::*, scope::ScopeParam};

/// Options captured once per strategy registration.
///
/// Immutable for the lifetime of the strategy instance that owns them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClerkStrategyOptions {
	/// Clerk instance domain as a bare host, e.g. `clerk.example.com`.
	pub domain: String,
	/// OAuth 2.0 client identifier issued by Clerk.
	pub client_id: String,
	/// OAuth 2.0 client secret issued by Clerk.
	pub client_secret: String,
	/// Redirect URI the provider sends the authorization code back to.
	pub callback_url: String,
	/// Optional scope configuration; absent means the default scope set.
	pub scopes: Option<ScopeParam>,
}
impl ClerkStrategyOptions {
	/// Creates options for the provided domain and client credentials.
	pub fn new(
		domain: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		callback_url: impl Into<String>,
	) -> Self {
		Self {
			domain: domain.into(),
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			callback_url: callback_url.into(),
			scopes: None,
		}
	}

	/// Requests an ordered list of scopes, joined with single spaces when resolved.
	pub fn with_scopes<I>(mut self, scopes: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<crate::scope::ClerkScope>,
	{
		self.scopes = Some(ScopeParam::List(scopes.into_iter().map(Into::into).collect()));

		self
	}

	/// Requests a pre-joined scope string forwarded verbatim.
	pub fn with_scope_string(mut self, scopes: impl Into<String>) -> Self {
		self.scopes = Some(ScopeParam::Literal(scopes.into()));

		self
	}
}

/// Endpoint trio derived from the configured domain.
///
/// All three endpoints share the same domain; no per-endpoint path override exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEndpoints {
	/// Authorization endpoint the end user is redirected to.
	pub authorization: String,
	/// Token endpoint used by the external code-for-token exchange.
	pub token: String,
	/// Userinfo endpoint queried with the bearer access token.
	pub userinfo: String,
}
impl ResolvedEndpoints {
	/// Derives the endpoint trio from a bare host.
	pub fn from_domain(domain: &str) -> Self {
		Self {
			authorization: format!("https://{domain}/oauth/authorize"),
			token: format!("https://{domain}/oauth/token"),
			userinfo: format!("https://{domain}/oauth/userinfo"),
		}
	}
}
