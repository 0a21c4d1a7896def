//! The Clerk strategy: authorization-request customization and profile fetch.
//!
//! The strategy owns immutable configuration only, so one instance is safely shared
//! across concurrent authentication attempts without locking. Its two active duties are
//! decorating the authorization redirect with Clerk's `scopes` quirk parameter and
//! turning a bearer access token into a [`CanonicalProfile`] via the userinfo endpoint;
//! everything in between (state, PKCE, the code-for-token exchange) belongs to the
//! external [`oauth2`] engine.

// crates.io
use oauth2::{
	AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RedirectUrl, TokenUrl,
	basic::BasicClient,
};
// self
use crate::{
	_prelude::*,
	config::{ClerkStrategyOptions, ResolvedEndpoints},
	error::{ConfigError, ProfileError},
	http::UserinfoHttpClient,
	obs::{self, StageKind, StageOutcome, StageSpan},
	profile::{CanonicalProfile, PROVIDER, RawUserInfo},
	scope,
	token::TokenExtras,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestUserinfoClient;

/// Query parameter Clerk's authorize endpoint recognizes in addition to the standard
/// `scope` parameter. Both end up carrying the same resolved value; the duplication is
/// observed provider behavior, preserved as-is. The mirroring is exact: an empty
/// resolved scope (from an empty scope list) is carried verbatim, with no fallback to
/// [`DEFAULT_SCOPE`](crate::scope::DEFAULT_SCOPE).
pub const SCOPES_PARAM: &str = "scopes";

/// [`oauth2`] client wired with the resolved Clerk endpoints and credentials.
pub type ConfiguredClerkClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestClerkStrategy = ClerkStrategy<ReqwestUserinfoClient>;

/// One step of an authentication attempt, expressed as data instead of control flow.
///
/// The original strategy family signals redirects by throwing a response object; modeled
/// here as a tagged result so exceptions stay reserved for true faults.
#[derive(Clone, Debug, PartialEq)]
pub enum StrategyStep {
	/// The end user must be redirected to the provider's authorize endpoint.
	Redirect(Url),
	/// The attempt completed; the profile and its untouched token companions are ready
	/// for the caller's verification step.
	Complete {
		/// Normalized identity profile.
		profile: CanonicalProfile,
		/// Token-exchange companions, passed through unmodified.
		extras: TokenExtras,
	},
}

/// Authorization Code strategy specialized for a single Clerk instance.
#[derive(Clone)]
pub struct ClerkStrategy<C>
where
	C: ?Sized + UserinfoHttpClient,
{
	/// HTTP client used for the userinfo round trip.
	pub http_client: Arc<C>,
	/// Options captured at registration time.
	pub options: ClerkStrategyOptions,
	/// Endpoint trio derived from the configured domain.
	pub endpoints: ResolvedEndpoints,
	/// Space-joined scope value, resolved exactly once at construction.
	pub scope: String,
}
impl<C> ClerkStrategy<C>
where
	C: ?Sized + UserinfoHttpClient,
{
	/// Registration name under which the strategy identifies itself.
	pub const NAME: &'static str = PROVIDER;

	/// Creates a strategy that reuses the caller-provided transport.
	///
	/// Construction is pure: endpoints and scope are resolved deterministically without
	/// I/O, and a malformed domain is accepted here only to fail downstream.
	pub fn with_http_client(
		options: ClerkStrategyOptions,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let endpoints = ResolvedEndpoints::from_domain(&options.domain);
		let scope = scope::resolve_scope(options.scopes.as_ref());

		Self { http_client: http_client.into(), options, endpoints, scope }
	}

	/// Adds or overwrites Clerk's scope-carrying parameter on an in-progress
	/// authorization request, returning the map for chaining.
	///
	/// Idempotent: re-applying the hook overwrites rather than appends.
	pub fn authorization_params<'p>(
		&self,
		params: &'p mut BTreeMap<String, String>,
	) -> &'p mut BTreeMap<String, String> {
		params.insert(SCOPES_PARAM.to_owned(), self.scope.clone());

		params
	}

	/// Builds the authorization redirect for the provided `state` and caller extras.
	///
	/// The engine-level parameters (`response_type=code`, `client_id`, `redirect_uri`,
	/// `scope`, `state`) are populated first, caller-supplied extras layered on top, and
	/// the [`authorization_params`](Self::authorization_params) hook applied last.
	pub fn begin_authorization(
		&self,
		state: &str,
		extra_params: &[(String, String)],
	) -> Result<StrategyStep> {
		const STAGE: StageKind = StageKind::Authorize;

		let _guard = StageSpan::new(STAGE, "begin_authorization").entered();

		obs::record_stage_outcome(STAGE, StageOutcome::Attempt);

		let result = self.build_authorize_url(state, extra_params).map(StrategyStep::Redirect);

		match &result {
			Ok(_) => obs::record_stage_outcome(STAGE, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(STAGE, StageOutcome::Failure),
		}

		result
	}

	/// Fetches the userinfo endpoint with the obtained access token and maps the
	/// response into the canonical profile shape.
	///
	/// Exactly one network round trip; no retries and no strategy-level timeout. Every
	/// failure (transport, non-success status, malformed JSON) bubbles to the caller
	/// unchanged, while missing claims are silently omitted from the profile.
	pub async fn fetch_profile(&self, access_token: &str) -> Result<CanonicalProfile> {
		const STAGE: StageKind = StageKind::Userinfo;

		let span = StageSpan::new(STAGE, "fetch_profile");

		obs::record_stage_outcome(STAGE, StageOutcome::Attempt);

		let result = span
			.instrument(async move {
				let response = self
					.http_client
					.fetch_userinfo(&self.endpoints.userinfo, access_token)
					.await?;

				if !(200..300).contains(&response.status) {
					return Err(ProfileError::endpoint(response.status, &response.body).into());
				}

				let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
				let raw: RawUserInfo = serde_path_to_error::deserialize(&mut deserializer)
					.map_err(|source| ProfileError::Parse { source, status: response.status })?;

				Ok(CanonicalProfile::from_raw(raw))
			})
			.await;

		match &result {
			Ok(_) => obs::record_stage_outcome(STAGE, StageOutcome::Success),
			Err(_) => obs::record_stage_outcome(STAGE, StageOutcome::Failure),
		}

		result
	}

	/// Completes an authentication attempt: fetches the profile and pairs it with the
	/// untouched token-exchange companions.
	pub async fn complete(
		&self,
		access_token: &str,
		extras: TokenExtras,
	) -> Result<StrategyStep> {
		let profile = self.fetch_profile(access_token).await?;

		Ok(StrategyStep::Complete { profile, extras })
	}

	/// Wires the resolved endpoints and credentials into an [`oauth2`] client for the
	/// external code-for-token exchange.
	///
	/// This is the first place a malformed domain manifests, as
	/// [`ConfigError::InvalidEndpoint`].
	pub fn oauth2_client(&self) -> Result<ConfiguredClerkClient> {
		let auth_url = AuthUrl::new(self.endpoints.authorization.clone())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(self.endpoints.token.clone())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let redirect_url = RedirectUrl::new(self.options.callback_url.clone())
			.map_err(|source| ConfigError::InvalidRedirect { source })?;
		let client = BasicClient::new(ClientId::new(self.options.client_id.clone()))
			.set_client_secret(ClientSecret::new(self.options.client_secret.clone()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_redirect_uri(redirect_url);

		Ok(client)
	}

	fn build_authorize_url(&self, state: &str, extra_params: &[(String, String)]) -> Result<Url> {
		let mut params = BTreeMap::new();

		params.insert("response_type".to_owned(), "code".to_owned());
		params.insert("client_id".to_owned(), self.options.client_id.clone());
		params.insert("redirect_uri".to_owned(), self.options.callback_url.clone());
		params.insert("scope".to_owned(), self.scope.clone());
		params.insert("state".to_owned(), state.to_owned());

		for (key, value) in extra_params {
			params.insert(key.clone(), value.clone());
		}

		self.authorization_params(&mut params);

		let mut url = Url::parse(&self.endpoints.authorization)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;

		url.query_pairs_mut().extend_pairs(params.iter());

		Ok(url)
	}
}
#[cfg(feature = "reqwest")]
impl ClerkStrategy<ReqwestUserinfoClient> {
	/// Creates a strategy backed by a default reqwest transport.
	pub fn new(options: ClerkStrategyOptions) -> Self {
		Self::with_http_client(options, ReqwestUserinfoClient::default())
	}
}
impl<C> Debug for ClerkStrategy<C>
where
	C: ?Sized + UserinfoHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClerkStrategy")
			.field("domain", &self.options.domain)
			.field("client_id", &self.options.client_id)
			.field("client_secret_set", &!self.options.client_secret.is_empty())
			.field("callback_url", &self.options.callback_url)
			.field("scope", &self.scope)
			.finish()
	}
}
