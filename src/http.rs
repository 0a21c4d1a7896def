//! Transport primitives for the userinfo round trip.
//!
//! [`UserinfoHttpClient`] is the strategy's only dependency on an HTTP stack. The default
//! reqwest-backed implementation lives behind the `reqwest` feature; tests and downstream
//! users can inject any transport by implementing the trait themselves. Policy decisions
//! (retries, timeouts, pooling) belong to the implementation, never to the strategy.

// std
use std::ops::Deref;
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::error::TransportError;

/// Boxed future returned by [`UserinfoHttpClient::fetch_userinfo`].
///
/// Boxing keeps the trait object-safe and lets the strategy hold `Arc<dyn ...>`-style
/// transports without generics leaking into every call site. The future must be `Send`
/// so concurrent authentication attempts can hop executors freely.
pub type UserinfoFuture<'a> = Pin<Box<dyn Future<Output = Result<UserinfoResponse>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the userinfo GET.
///
/// Implementations perform exactly one request: `GET {url}` with an
/// `Authorization: Bearer {access_token}` header and no body. Transport-level failures
/// are surfaced as [`TransportError`](crate::error::TransportError) values; non-success
/// statuses are not an error at this layer and travel back inside [`UserinfoResponse`].
pub trait UserinfoHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes the userinfo request with the provided bearer token.
	fn fetch_userinfo<'a>(&'a self, url: &'a str, access_token: &'a str) -> UserinfoFuture<'a>;
}

/// Raw outcome of one userinfo round trip, prior to any JSON handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserinfoResponse {
	/// HTTP status code returned by the provider.
	pub status: u16,
	/// Unparsed response body.
	pub body: Vec<u8>,
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The wrapped client's own configuration governs timeouts and connection reuse; the
/// strategy layers nothing on top.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestUserinfoClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestUserinfoClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestUserinfoClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestUserinfoClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl UserinfoHttpClient for ReqwestUserinfoClient {
	fn fetch_userinfo<'a>(&'a self, url: &'a str, access_token: &'a str) -> UserinfoFuture<'a> {
		Box::pin(async move {
			let response = self
				.0
				.get(url)
				.bearer_auth(access_token)
				.send()
				.await
				.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(UserinfoResponse { status, body })
		})
	}
}
