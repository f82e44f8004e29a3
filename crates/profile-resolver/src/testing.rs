//! In-memory platform fakes shared by the unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::platform::{PlatformContext, ProfileRegistry};
use crate::types::{ProfileHandle, ProfileInfo, UserId};

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub(crate) fn user(id: i32) -> UserId {
    UserId::of(ProfileHandle::new(id))
}

#[derive(Debug, Clone)]
pub(crate) struct FakeProfile {
    pub id: i32,
    pub managed: bool,
    pub parent: Option<i32>,
    /// `None` means the registry has no info record
    pub full: Option<bool>,
}

impl FakeProfile {
    pub fn owner(id: i32) -> Self {
        Self {
            id,
            managed: false,
            parent: None,
            full: Some(true),
        }
    }

    pub fn managed(id: i32, parent: i32) -> Self {
        Self {
            id,
            managed: true,
            parent: Some(parent),
            full: Some(false),
        }
    }
}

/// Registry backed by a mutable profile list, counting enumeration calls
#[derive(Default)]
pub(crate) struct FakeRegistry {
    profiles: Mutex<Vec<FakeProfile>>,
    list_calls: AtomicUsize,
    list_delay: Mutex<Option<Duration>>,
}

impl FakeRegistry {
    pub fn new(profiles: Vec<FakeProfile>) -> Arc<Self> {
        Arc::new(Self {
            profiles: Mutex::new(profiles),
            ..Default::default()
        })
    }

    pub fn set_profiles(&self, profiles: Vec<FakeProfile>) {
        *self.profiles.lock() = profiles;
    }

    pub fn set_list_delay(&self, delay: Duration) {
        *self.list_delay.lock() = Some(delay);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn find(&self, handle: ProfileHandle) -> Option<FakeProfile> {
        self.profiles
            .lock()
            .iter()
            .find(|p| p.id == handle.id())
            .cloned()
    }
}

impl ProfileRegistry for FakeRegistry {
    fn list_profile_handles(&self, _session: UserId) -> Vec<ProfileHandle> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.list_delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }
        self.profiles
            .lock()
            .iter()
            .map(|p| ProfileHandle::new(p.id))
            .collect()
    }

    fn is_managed_profile(&self, handle: ProfileHandle) -> bool {
        self.find(handle).map(|p| p.managed).unwrap_or(false)
    }

    fn parent_of(&self, handle: ProfileHandle) -> Option<ProfileHandle> {
        self.find(handle)?.parent.map(ProfileHandle::new)
    }

    fn profile_info(&self, handle: ProfileHandle) -> Option<ProfileInfo> {
        let full = self.find(handle)?.full?;
        Some(ProfileInfo {
            is_full_profile: full,
        })
    }
}

pub(crate) struct FakePlatform {
    pub registry: Option<Arc<FakeRegistry>>,
    pub permission: bool,
    pub version: u32,
}

impl FakePlatform {
    pub fn with_registry(registry: Arc<FakeRegistry>) -> Arc<Self> {
        Arc::new(Self {
            registry: Some(registry),
            permission: true,
            version: 30,
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            registry: None,
            permission: true,
            version: 30,
        })
    }
}

impl PlatformContext for FakePlatform {
    fn profile_registry(&self) -> Option<Arc<dyn ProfileRegistry>> {
        self.registry
            .clone()
            .map(|r| r as Arc<dyn ProfileRegistry>)
    }

    fn has_cross_profile_permission(&self) -> bool {
        self.permission
    }

    fn platform_version_at_least(&self, min_version: u32) -> bool {
        self.version >= min_version
    }
}
