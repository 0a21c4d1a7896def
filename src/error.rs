//! Strategy-level error types shared across configuration, transport, and profile handling.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Userinfo fetch or normalization failure.
	#[error(transparent)]
	Profile(#[from] ProfileError),
}

/// Configuration and wiring failures raised by the strategy.
///
/// The configured domain is never validated up front; a malformed host only surfaces
/// here (or as a transport failure) once a derived endpoint is actually used.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A derived endpoint URL cannot be parsed.
	#[error("The {endpoint} endpoint derived from the configured domain is not a valid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed parsing.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidRedirect {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Userinfo endpoint failures surfaced by the profile fetch.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Userinfo endpoint answered with a non-success status.
	#[error("Userinfo endpoint returned HTTP {status}.")]
	Endpoint {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Preview of the response body, when non-empty.
		body_preview: Option<String>,
	},
	/// Userinfo endpoint responded with malformed JSON that could not be parsed.
	#[error("Userinfo endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure carrying the failing JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the offending response.
		status: u16,
	},
}
impl ProfileError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Builds a [`ProfileError::Endpoint`] value with a truncated body preview.
	pub fn endpoint(status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let trimmed = text.trim();
		let body_preview =
			if trimmed.is_empty() { None } else { Some(truncate_preview(trimmed)) };

		Self::Endpoint { status, body_preview }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the userinfo endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the userinfo endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= ProfileError::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= ProfileError::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_error_previews_and_truncates_bodies() {
		let err = ProfileError::endpoint(500, b"  upstream exploded  ");

		assert!(matches!(
			&err,
			ProfileError::Endpoint { status: 500, body_preview: Some(preview) }
				if preview == "upstream exploded"
		));

		let err = ProfileError::endpoint(502, b"   ");

		assert!(matches!(err, ProfileError::Endpoint { status: 502, body_preview: None }));

		let long = "x".repeat(1_024);
		let err = ProfileError::endpoint(500, long.as_bytes());

		if let ProfileError::Endpoint { body_preview: Some(preview), .. } = err {
			assert_eq!(preview.chars().count(), ProfileError::BODY_PREVIEW_LIMIT + 1);
			assert!(preview.ends_with('…'));
		} else {
			panic!("Expected an endpoint error with a preview.");
		}
	}
}
