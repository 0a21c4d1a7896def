//! Token exchange companions typed for Clerk.
//!
//! The exchange itself belongs to the external [`oauth2`] engine; this module only types
//! what Clerk returns alongside the standard fields and repackages it, untouched, for the
//! caller's verification step.

// crates.io
use oauth2::{ExtraTokenFields, StandardTokenResponse, TokenResponse, basic::BasicTokenType};
// self
use crate::_prelude::*;

/// Non-standard fields Clerk includes in token exchange responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClerkTokenFields {
	/// OpenID Connect ID token issued alongside the access token, when granted.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
}
impl ExtraTokenFields for ClerkTokenFields {}

/// Token response shape produced by the authorization-code exchange against Clerk.
pub type ClerkTokenResponse = StandardTokenResponse<ClerkTokenFields, BasicTokenType>;

/// Companion record handed to the caller's verification step without interpretation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenExtras {
	/// Scope string granted by the provider.
	pub scope: String,
	/// Access token lifetime in seconds.
	pub expires_in: u64,
	/// Token type; Clerk issues `Bearer` tokens.
	pub token_type: String,
	/// Optional OpenID Connect ID token.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
}
impl From<&ClerkTokenResponse> for TokenExtras {
	fn from(response: &ClerkTokenResponse) -> Self {
		let scope = response
			.scopes()
			.map(|scopes| scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" "))
			.unwrap_or_default();

		Self {
			scope,
			expires_in: response.expires_in().map(|lifetime| lifetime.as_secs()).unwrap_or_default(),
			token_type: token_type_label(response.token_type()),
			id_token: response.extra_fields().id_token.clone(),
		}
	}
}

fn token_type_label(token_type: &BasicTokenType) -> String {
	match token_type {
		BasicTokenType::Bearer => "Bearer".to_owned(),
		BasicTokenType::Mac => "Mac".to_owned(),
		BasicTokenType::Extension(raw) => raw.clone(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_extras_pass_through_the_exchange_response() {
		let response: ClerkTokenResponse = serde_json::from_str(
			"{\"access_token\":\"access-123\",\"token_type\":\"bearer\",\"expires_in\":3600,\
			\"scope\":\"profile email\",\"id_token\":\"jwt-456\"}",
		)
		.expect("Token response fixture should deserialize.");
		let extras = TokenExtras::from(&response);

		assert_eq!(extras.scope, "profile email");
		assert_eq!(extras.expires_in, 3_600);
		assert_eq!(extras.token_type, "Bearer");
		assert_eq!(extras.id_token.as_deref(), Some("jwt-456"));
	}

	#[test]
	fn token_extras_tolerate_minimal_responses() {
		let response: ClerkTokenResponse = serde_json::from_str(
			"{\"access_token\":\"access-123\",\"token_type\":\"bearer\"}",
		)
		.expect("Minimal token response should deserialize.");
		let extras = TokenExtras::from(&response);

		assert_eq!(extras.scope, "");
		assert_eq!(extras.expires_in, 0);
		assert!(extras.id_token.is_none());
	}
}
