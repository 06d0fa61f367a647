//! # Pordego
//!
//! `pordego` issues and validates signed session tokens for a web backend.
//! A login request is checked against an [`auth::Authenticator`], the user's
//! roles are read from an [`auth::UserStore`], and the [`token::TokenCodec`]
//! mints a signed, time-limited HS256 token carrying the identity and role
//! claims. Later requests present the token and the codec verifies it
//! offline; validity is entirely self-contained in the signature and the
//! expiry claim, so there is no server-side session store.
//!
//! Every failure anywhere in the chain is translated exactly once, by
//! [`error::ErrorResponse`], into a stable wire payload of
//! `{status, error, message, path}`.

pub mod auth;
pub mod cli;
pub mod error;
pub mod pordego;
pub mod token;
