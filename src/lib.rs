//! Clerk-flavored OAuth 2.0 Authorization Code strategy: derive the Clerk endpoint trio from a
//! single domain, inject the provider's `scopes` quirk parameter, and normalize userinfo claims
//! into a canonical profile.
//!
//! The generic Authorization Code machinery (state handling, PKCE, the code-for-token exchange)
//! stays with the [`oauth2`] crate and the host application; this crate supplies the
//! Clerk-specific customization layer on top of it.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod profile;
pub mod scope;
pub mod strategy;
pub mod token;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::Result;
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, tokio as _};
