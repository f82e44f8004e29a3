use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, Result};

/// Raw profile handle as reported by the platform registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileHandle(i32);

impl ProfileHandle {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> i32 {
        self.0
    }
}

/// Identity of one user or profile on the device
///
/// Equality is by the numeric id. Negative ids are platform pseudo users
/// ("current", "all", "null") and never name a real profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// The device owner's user
    pub const SYSTEM: UserId = UserId(0);

    pub fn new(id: i32) -> Result<Self> {
        if id < 0 {
            return Err(ResolverError::InvalidUser(id));
        }
        Ok(Self(id))
    }

    /// Identity behind a registry handle
    pub const fn of(handle: ProfileHandle) -> Self {
        Self(handle.id())
    }

    pub const fn identifier(&self) -> i32 {
        self.0
    }

    pub const fn handle(&self) -> ProfileHandle {
        ProfileHandle::new(self.0)
    }

    pub const fn is_valid(&self) -> bool {
        self.0 >= 0
    }
}

impl TryFrom<i32> for UserId {
    type Error = ResolverError;

    fn try_from(id: i32) -> Result<Self> {
        UserId::new(id)
    }
}

impl From<UserId> for i32 {
    fn from(user: UserId) -> Self {
        user.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId{{{}}}", self.0)
    }
}

/// Registry metadata for a single profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfo {
    /// A full (non-restricted, non-managed) user
    pub is_full_profile: bool,
}
