//! Clerk scope modeling and resolution.
//!
//! Clerk accepts either a pre-joined scope string or an ordered scope list; resolution is
//! pure string construction and never fails. No validation, splitting, or deduplication
//! happens here; callers own the ordering and uniqueness of what they request.

// self
use crate::_prelude::*;

/// Scope string requested when the caller supplies none.
pub const DEFAULT_SCOPE: &str = "profile email public_metadata";
/// Separator used when joining a scope list into the wire value.
pub const SCOPE_SEPARATOR: char = ' ';

/// Scopes recognized by Clerk's OAuth applications.
///
/// The enumeration is intentionally open-ended: [`ClerkScope::Custom`] carries any scope
/// this crate does not know about yet, so conversions from strings are infallible.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClerkScope {
	/// Basic profile claims (name, picture, username).
	Profile,
	/// Email address and verification state.
	Email,
	/// Publicly visible user metadata.
	PublicMetadata,
	/// Backend-only user metadata.
	PrivateMetadata,
	/// Provider-specific scope not covered by the known set.
	Custom(String),
}
impl ClerkScope {
	/// Returns the wire representation of the scope.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Profile => "profile",
			Self::Email => "email",
			Self::PublicMetadata => "public_metadata",
			Self::PrivateMetadata => "private_metadata",
			Self::Custom(raw) => raw,
		}
	}
}
impl From<String> for ClerkScope {
	fn from(value: String) -> Self {
		match value.as_str() {
			"profile" => Self::Profile,
			"email" => Self::Email,
			"public_metadata" => Self::PublicMetadata,
			"private_metadata" => Self::PrivateMetadata,
			_ => Self::Custom(value),
		}
	}
}
impl From<&str> for ClerkScope {
	fn from(value: &str) -> Self {
		Self::from(value.to_owned())
	}
}
impl From<ClerkScope> for String {
	fn from(value: ClerkScope) -> Self {
		match value {
			ClerkScope::Custom(raw) => raw,
			known => known.as_str().to_owned(),
		}
	}
}
impl FromStr for ClerkScope {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}
impl Display for ClerkScope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Caller-supplied scope configuration.
///
/// Mirrors the two shapes Clerk integrations pass at registration time: an opaque
/// pre-joined string forwarded verbatim, or an ordered list joined with a single space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeParam {
	/// Pre-joined scope string used as-is.
	Literal(String),
	/// Ordered scope list; joined in input order, duplicates preserved.
	List(Vec<ClerkScope>),
}
impl ScopeParam {
	/// Resolves the parameter into the wire scope value.
	pub fn resolve(&self) -> String {
		match self {
			Self::Literal(raw) => raw.clone(),
			Self::List(scopes) => {
				let mut buf = String::new();

				for (idx, scope) in scopes.iter().enumerate() {
					if idx > 0 {
						buf.push(SCOPE_SEPARATOR);
					}

					buf.push_str(scope.as_str());
				}

				buf
			},
		}
	}
}

/// Resolves the optional scope configuration into the final scope string.
///
/// Absent configuration falls back to [`DEFAULT_SCOPE`]; everything else defers to
/// [`ScopeParam::resolve`]. An empty list resolves to an empty string, which is a valid
/// (if unusual) scope value.
pub fn resolve_scope(scopes: Option<&ScopeParam>) -> String {
	scopes.map(ScopeParam::resolve).unwrap_or_else(|| DEFAULT_SCOPE.to_owned())
}
