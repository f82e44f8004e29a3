//! Cached profile resolver
//!
//! The resolution is computed on the first query and kept until a topology
//! change arrives for the current user's session. A single lock covers the
//! empty-check/populate sequence and the clear, so no caller can observe a
//! half-written cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use profile_events::{EventBus, Subscription, TopologyEvent};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::error::{ResolverError, Result};
use crate::gate::CapabilityGate;
use crate::platform::PlatformContext;
use crate::resolve::{resolve_profiles, Resolution};
use crate::types::UserId;

/// Query surface for the users whose documents a session should show
pub trait UserIdManager: Send + Sync {
    /// Every user to query for documents; always includes the current user
    fn user_ids(&self) -> Arc<[UserId]>;
}

/// Counters describing cache behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub computations: u64,
    pub invalidations: u64,
    pub last_invalidated: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct CacheSlot {
    resolution: Option<Arc<Resolution>>,
    last_invalidated: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct ResolverCache {
    slot: Mutex<CacheSlot>,
    computations: AtomicU64,
    invalidations: AtomicU64,
}

impl ResolverCache {
    fn clear(&self, at: DateTime<Utc>) {
        let mut slot = self.slot.lock();
        slot.resolution = None;
        slot.last_invalidated = Some(at);
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }
}

pub struct ProfileResolver {
    current: UserId,
    gate: CapabilityGate,
    platform: Arc<dyn PlatformContext>,
    cache: Arc<ResolverCache>,
    _subscription: Subscription,
}

impl ProfileResolver {
    /// Build a resolver, evaluating the capability gate from `config`
    pub fn new(
        current: UserId,
        config: &ResolverConfig,
        platform: Arc<dyn PlatformContext>,
        events: &EventBus,
    ) -> Result<Self> {
        let gate = CapabilityGate::evaluate(config, platform.as_ref());
        Self::with_gate(current, gate, platform, events)
    }

    /// Build a resolver with configuration read from the environment
    pub fn from_env(
        current: UserId,
        platform: Arc<dyn PlatformContext>,
        events: &EventBus,
    ) -> Result<Self> {
        let config = ResolverConfig::from_env()?;
        Self::new(current, &config, platform, events)
    }

    /// Build a resolver with an already-decided capability gate
    pub fn with_gate(
        current: UserId,
        gate: CapabilityGate,
        platform: Arc<dyn PlatformContext>,
        events: &EventBus,
    ) -> Result<Self> {
        if !current.is_valid() {
            return Err(ResolverError::InvalidUser(current.identifier()));
        }

        let cache = Arc::new(ResolverCache::default());
        let handler_cache = cache.clone();
        let subscription = events.subscribe(current.identifier(), move |event: &TopologyEvent| {
            debug!(change = ?event.change, profile = ?event.profile, "Profile topology changed");
            handler_cache.clear(event.time);
        });

        Ok(Self {
            current,
            gate,
            platform,
            cache,
            _subscription: subscription,
        })
    }

    pub fn current_user(&self) -> UserId {
        self.current
    }

    pub fn gate(&self) -> CapabilityGate {
        self.gate
    }

    fn resolution(&self) -> Arc<Resolution> {
        let mut slot = self.cache.slot.lock();
        if let Some(resolution) = &slot.resolution {
            return resolution.clone();
        }

        let resolution = Arc::new(resolve_profiles(
            self.current,
            self.gate,
            self.platform.as_ref(),
        ));
        self.cache.computations.fetch_add(1, Ordering::Relaxed);
        debug!(user = %self.current, users = resolution.users.len(), "Populated user cache");

        slot.resolution = Some(resolution.clone());
        resolution
    }

    /// Users to federate across, parent first when one exists
    pub fn user_ids(&self) -> Arc<[UserId]> {
        self.resolution().users.clone()
    }

    /// The parent/system user, when more than one user is visible
    pub fn system_user(&self) -> Option<UserId> {
        self.resolution().parent
    }

    /// The managed user, when more than one user is visible
    pub fn managed_user(&self) -> Option<UserId> {
        self.resolution().managed
    }

    /// Drop the cached resolution; the next query recomputes
    pub fn invalidate(&self) {
        self.cache.clear(Utc::now());
    }

    pub fn stats(&self) -> ResolverStats {
        let last_invalidated = self.cache.slot.lock().last_invalidated;
        ResolverStats {
            computations: self.cache.computations.load(Ordering::Relaxed),
            invalidations: self.cache.invalidations.load(Ordering::Relaxed),
            last_invalidated,
        }
    }
}

impl UserIdManager for ProfileResolver {
    fn user_ids(&self) -> Arc<[UserId]> {
        ProfileResolver::user_ids(self)
    }
}
