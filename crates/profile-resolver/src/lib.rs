//! Cross-profile user resolution
//!
//! Works out which user profiles a file-management session should federate
//! documents across: the current user plus, where the device links them, its
//! parent or managed profiles. The answer is computed lazily, cached, and
//! dropped whenever a profile is added to or removed from the session's
//! profile group.

pub mod config;
pub mod error;
pub mod gate;
pub mod platform;
pub mod resolve;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ResolverConfig;
pub use error::{ResolverError, Result};
pub use gate::CapabilityGate;
pub use platform::{PlatformContext, ProfileRegistry};
pub use resolve::{resolve_profiles, Resolution};
pub use resolver::{ProfileResolver, ResolverStats, UserIdManager};
pub use types::{ProfileHandle, ProfileInfo, UserId};
