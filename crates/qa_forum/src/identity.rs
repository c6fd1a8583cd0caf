// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Who is using the forum.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::error::{ForumError, Result};
use crate::ids::UserId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
        }
    }
}

/// Supplies the signed-in user and starts sign-in when one is needed.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<User>;

    /// Ask the user to sign in (the login prompt).
    fn begin_sign_in(&self);
}

/// The current user, or [`ForumError::Unauthenticated`] after prompting for
/// sign-in.
pub(crate) fn require_user(
    identity: &dyn IdentityProvider,
    action: &str,
) -> Result<User> {
    match identity.current_user() {
        Some(user) => Ok(user),
        None => {
            tracing::warn!(action, "sign in required");
            identity.begin_sign_in();
            Err(ForumError::Unauthenticated)
        }
    }
}

/// A fixed identity that counts sign-in requests.
#[derive(Debug, Default)]
pub struct StaticIdentity {
    user: Option<User>,
    sign_in_requests: Cell<usize>,
}

impl StaticIdentity {
    pub fn signed_in(user: User) -> Self {
        Self {
            user: Some(user),
            sign_in_requests: Cell::new(0),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in_requests(&self) -> usize {
        self.sign_in_requests.get()
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }

    fn begin_sign_in(&self) {
        self.sign_in_requests.set(self.sign_in_requests.get() + 1);
    }
}
