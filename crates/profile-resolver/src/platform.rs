//! Platform collaborators consumed by the resolver
//!
//! Both traits wrap synchronous, local platform services. Implementations
//! are expected to answer quickly: the resolver calls them while holding its
//! cache lock.

use std::sync::Arc;

use crate::types::{ProfileHandle, ProfileInfo, UserId};

/// The platform's profile registry
pub trait ProfileRegistry: Send + Sync {
    /// Every profile handle in `session`'s profile group, in platform order
    fn list_profile_handles(&self, session: UserId) -> Vec<ProfileHandle>;

    fn is_managed_profile(&self, handle: ProfileHandle) -> bool;

    /// The profile that owns `handle`, if it has one
    fn parent_of(&self, handle: ProfileHandle) -> Option<ProfileHandle>;

    /// `None` when the registry has no record of `handle`
    fn profile_info(&self, handle: ProfileHandle) -> Option<ProfileInfo>;
}

/// Process-level view of the platform
pub trait PlatformContext: Send + Sync {
    /// The profile registry, or `None` when the service cannot be reached
    fn profile_registry(&self) -> Option<Arc<dyn ProfileRegistry>>;

    /// Whether this process holds the interact-across-users privilege
    fn has_cross_profile_permission(&self) -> bool;

    fn platform_version_at_least(&self, min_version: u32) -> bool;
}
