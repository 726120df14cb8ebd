// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod google;
pub mod session;

pub use credentials::CredentialService;
pub use google::GoogleOAuthService;
pub use session::{SessionManager, SessionUser, SESSION_COOKIE};
