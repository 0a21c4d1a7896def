//! Userinfo claims and their normalization into the canonical profile shape.
//!
//! Every mapping rule is gated on presence: a raw field that is missing, `null`, or an
//! empty string simply never appears in the canonical profile. Absence stays
//! distinguishable from "known empty" for downstream consumers, so no field is ever
//! defaulted to a sentinel value.

// crates.io
use serde_json::{Map, Value};
// self
use crate::_prelude::*;

/// Identity tag attached to every canonical profile produced by this crate.
pub const PROVIDER: &str = "clerk";

/// Raw JSON payload returned by Clerk's userinfo endpoint.
///
/// Lives for the duration of one profile fetch, then travels untouched inside
/// [`CanonicalProfile::raw`]. No claim is mandatory and unknown claims are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawUserInfo {
	/// Response object marker, `oauth_user_info` when present.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub object: Option<String>,
	/// Clerk instance the user belongs to.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub instance_id: Option<String>,
	/// Primary email address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Whether the primary email address has been verified.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email_verified: Option<bool>,
	/// Family name claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
	/// Given name claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	/// Full display name claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Username claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// Avatar URL claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub picture: Option<String>,
	/// Stable Clerk user identifier.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user_id: Option<String>,
	/// Publicly visible metadata, passed through opaquely.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub public_metadata: Option<Map<String, Value>>,
	/// Backend-only metadata, passed through opaquely.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub private_metadata: Option<Map<String, Value>>,
	/// Client-writable metadata, passed through opaquely.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub unsafe_metadata: Option<Map<String, Value>>,
}

/// Structured name component of the canonical profile.
///
/// Only materialized when at least one member claim is present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileName {
	/// Given name, when the raw payload carried one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	/// Family name, when the raw payload carried one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
}

/// Single-value wrapper used by the `emails` and `photos` sequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileValue {
	/// The wrapped value.
	pub value: String,
}

/// Normalized, provider-agnostic identity representation.
///
/// Everything beyond `provider` is optional; fields are omitted (not nulled) when the
/// corresponding raw claim was absent or empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanonicalProfile {
	/// Constant identity tag, always [`PROVIDER`].
	pub provider: String,
	/// Stable user identifier, from the `user_id` claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Display name, from the `name` claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Structured name, from the `given_name`/`family_name` claims.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<ProfileName>,
	/// Email addresses, wrapped from the single `email` claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub emails: Option<Vec<ProfileValue>>,
	/// Profile photos, wrapped from the single `picture` claim.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub photos: Option<Vec<ProfileValue>>,
	/// Complete unmodified userinfo payload the profile was mapped from.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub raw: Option<RawUserInfo>,
}
impl CanonicalProfile {
	/// Maps a raw userinfo payload into the canonical shape.
	pub fn from_raw(raw: RawUserInfo) -> Self {
		let id = present(&raw.user_id);
		let display_name = present(&raw.name);
		let name = match (present(&raw.given_name), present(&raw.family_name)) {
			(None, None) => None,
			(given_name, family_name) => Some(ProfileName { given_name, family_name }),
		};
		let emails = present(&raw.email).map(|value| vec![ProfileValue { value }]);
		let photos = present(&raw.picture).map(|value| vec![ProfileValue { value }]);

		Self {
			provider: PROVIDER.to_owned(),
			id,
			display_name,
			name,
			emails,
			photos,
			raw: Some(raw),
		}
	}
}

// Empty strings count as absent, matching the provider's own omission behavior.
fn present(claim: &Option<String>) -> Option<String> {
	claim.as_deref().filter(|value| !value.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn raw(payload: Value) -> RawUserInfo {
		serde_json::from_value(payload).expect("Userinfo fixture should deserialize.")
	}

	#[test]
	fn full_payload_maps_every_field() {
		let profile = CanonicalProfile::from_raw(raw(json!({
			"user_id": "u1",
			"name": "Jane Doe",
			"given_name": "Jane",
			"family_name": "Doe",
			"email": "j@x.com",
			"picture": "http://x/p.png",
		})));

		assert_eq!(profile.provider, "clerk");
		assert_eq!(profile.id.as_deref(), Some("u1"));
		assert_eq!(profile.display_name.as_deref(), Some("Jane Doe"));
		assert_eq!(
			profile.name,
			Some(ProfileName {
				given_name: Some("Jane".into()),
				family_name: Some("Doe".into())
			})
		);
		assert_eq!(profile.emails, Some(vec![ProfileValue { value: "j@x.com".into() }]));
		assert_eq!(profile.photos, Some(vec![ProfileValue { value: "http://x/p.png".into() }]));
	}

	#[test]
	fn empty_payload_keeps_only_provider_and_raw() {
		let profile = CanonicalProfile::from_raw(raw(json!({})));

		assert_eq!(profile.provider, "clerk");
		assert!(profile.id.is_none());
		assert!(profile.display_name.is_none());
		assert!(profile.name.is_none());
		assert!(profile.emails.is_none());
		assert!(profile.photos.is_none());
		assert_eq!(profile.raw, Some(RawUserInfo::default()));
	}

	#[test]
	fn family_name_alone_builds_a_partial_name() {
		let profile = CanonicalProfile::from_raw(raw(json!({ "family_name": "Doe" })));
		let name = profile.name.expect("A lone family name should materialize the name object.");

		assert_eq!(name.family_name.as_deref(), Some("Doe"));
		assert!(name.given_name.is_none());
	}

	#[test]
	fn empty_string_claims_are_treated_as_absent() {
		let profile =
			CanonicalProfile::from_raw(raw(json!({ "user_id": "", "email": "j@x.com" })));

		assert!(profile.id.is_none());
		assert_eq!(profile.emails, Some(vec![ProfileValue { value: "j@x.com".into() }]));
	}

	#[test]
	fn absent_fields_are_omitted_from_serialization() {
		let profile = CanonicalProfile::from_raw(RawUserInfo::default());
		let serialized =
			serde_json::to_value(&profile).expect("Canonical profile should serialize.");

		assert_eq!(serialized, json!({ "provider": "clerk", "raw": {} }));
	}

	#[test]
	fn unknown_claims_are_ignored_and_metadata_passes_through() {
		let parsed = raw(json!({
			"object": "oauth_user_info",
			"public_metadata": { "plan": "pro" },
			"brand_new_claim": 42,
		}));

		assert_eq!(parsed.object.as_deref(), Some("oauth_user_info"));
		assert_eq!(
			parsed
				.public_metadata
				.as_ref()
				.and_then(|metadata| metadata.get("plan")),
			Some(&json!("pro"))
		);

		let profile = CanonicalProfile::from_raw(parsed.clone());

		assert_eq!(profile.raw, Some(parsed));
	}
}
