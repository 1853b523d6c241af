// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # mutuals API
//!
//! The remote-platform side of the `mutuals` workspace:
//!
//! - [`http`] - the narrow [`HttpTransport`] capability the rest of the
//!   crate depends on, plus its production reqwest implementation
//! - [`client`] - [`ApiClient`], the rate-limited API client (fixed
//!   pre-call throttle, rate-limit header tracking, error classification)
//! - [`fetcher`] - paginated fetching of follower/following sets
//! - [`token`] - bearer-token resolution from environment or the system
//!   keychain
//!
//! All network access goes through [`HttpTransport`], so every operation
//! is testable against a scripted transport with no live network.

pub mod client;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod token;

pub use client::{ApiClient, ClientSettings};
pub use error::{ApiError, KeychainError};
pub use fetcher::{RelationKind, SetFetcher};
pub use http::{ApiRequest, HttpTransport, Method, RawResponse, ReqwestTransport};
pub use token::{
    EnvTokenSource, KeychainTokenSource, TokenSource, delete_token, resolve_token, store_token,
};
