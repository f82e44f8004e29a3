//! Profile resolution
//!
//! Turns the platform's raw profile group into the ordered list of users a
//! session federates across. Every anomaly degrades to a smaller list that
//! still contains the current user exactly once.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::gate::CapabilityGate;
use crate::platform::{PlatformContext, ProfileRegistry};
use crate::types::{ProfileHandle, UserId};

/// Outcome of one resolution pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Parent (if any) first, then the current user, then managed profiles
    pub users: Arc<[UserId]>,
    /// Entry at index 0 when more than one user is visible
    pub parent: Option<UserId>,
    /// Entry at index 1 when more than one user is visible
    pub managed: Option<UserId>,
}

impl Resolution {
    pub fn single(current: UserId) -> Self {
        Self::from_users(vec![current])
    }

    fn from_users(users: Vec<UserId>) -> Self {
        let (parent, managed) = match users.as_slice() {
            [first, second, ..] => (Some(*first), Some(*second)),
            _ => (None, None),
        };
        Self {
            users: users.into(),
            parent,
            managed,
        }
    }

    pub fn is_federated(&self) -> bool {
        self.users.len() > 1
    }
}

/// Compute the users visible to `current`
pub fn resolve_profiles(
    current: UserId,
    gate: CapabilityGate,
    platform: &dyn PlatformContext,
) -> Resolution {
    if !gate.is_supported() {
        return Resolution::single(current);
    }

    let Some(registry) = platform.profile_registry() else {
        error!(user = %current, "Cannot obtain profile registry");
        return Resolution::single(current);
    };

    let handles = registry.list_profile_handles(current);
    if handles.len() < 2 {
        debug!(user = %current, profiles = handles.len(), "No linked profiles");
        return Resolution::single(current);
    }

    let mut users = vec![current];
    let own = current.handle();

    if registry.is_managed_profile(own) {
        match registry.parent_of(own).map(UserId::of) {
            Some(parent) if parent != current => users.insert(0, parent),
            Some(_) => {
                error!(user = %current, "Managed profile reports itself as its parent");
            }
            None => {
                error!(user = %current, "Managed profile has no parent");
            }
        }
    } else if is_group_root(registry.as_ref(), own) {
        for handle in &handles {
            let candidate = UserId::of(*handle);
            if users.contains(&candidate) || !registry.is_managed_profile(*handle) {
                continue;
            }
            users.push(candidate);
        }
    } else {
        warn!(
            user = %current,
            "Profile is neither a group root nor a managed profile, not federating"
        );
    }

    debug!(user = %current, users = ?users, "Resolved visible users");
    Resolution::from_users(users)
}

/// A full profile with no parent of its own
fn is_group_root(registry: &dyn ProfileRegistry, handle: ProfileHandle) -> bool {
    registry.parent_of(handle).is_none()
        && registry
            .profile_info(handle)
            .map(|info| info.is_full_profile)
            .unwrap_or(false)
}
