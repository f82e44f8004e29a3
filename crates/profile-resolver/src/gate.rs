//! Cross-profile capability gate
//!
//! Evaluated once when a resolver is built. A permission granted to the
//! process afterwards is not picked up until a new resolver is created.

use tracing::info;

use crate::config::ResolverConfig;
use crate::platform::PlatformContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityGate {
    supported: bool,
}

impl CapabilityGate {
    /// Feature flag AND minimum platform version AND interact-across-users
    pub fn evaluate(config: &ResolverConfig, platform: &dyn PlatformContext) -> Self {
        let supported = config.cross_profile_enabled
            && platform.platform_version_at_least(config.min_platform_version)
            && platform.has_cross_profile_permission();

        info!(
            supported,
            feature_enabled = config.cross_profile_enabled,
            min_platform_version = config.min_platform_version,
            "Evaluated cross-profile capability"
        );
        Self { supported }
    }

    /// A gate with a fixed answer, bypassing the platform checks
    pub const fn forced(supported: bool) -> Self {
        Self { supported }
    }

    pub const fn is_supported(&self) -> bool {
        self.supported
    }
}
