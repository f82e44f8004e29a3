//! Topology-change event types

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EventError, Result};

pub const ACTION_PROFILE_ADDED: &str = "android.intent.action.MANAGED_PROFILE_ADDED";
pub const ACTION_PROFILE_REMOVED: &str = "android.intent.action.MANAGED_PROFILE_REMOVED";

/// What happened to the profile group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopologyChange {
    ProfileAdded,
    ProfileRemoved,
}

impl TopologyChange {
    /// Map a platform broadcast action to a change kind
    pub fn from_action(action: &str) -> Result<Self> {
        match action {
            ACTION_PROFILE_ADDED => Ok(TopologyChange::ProfileAdded),
            ACTION_PROFILE_REMOVED => Ok(TopologyChange::ProfileRemoved),
            other => Err(EventError::UnknownAction(other.to_string())),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            TopologyChange::ProfileAdded => ACTION_PROFILE_ADDED,
            TopologyChange::ProfileRemoved => ACTION_PROFILE_REMOVED,
        }
    }
}

/// A change to the set of profiles linked to a user session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyEvent {
    pub change: TopologyChange,
    /// Raw id of the user session the broadcast is scoped to
    pub session: i32,
    /// Raw id of the profile that was added or removed, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<i32>,
    pub time: DateTime<Utc>,
}

/// Broadcast as delivered by the platform (internal)
#[derive(Debug, Deserialize)]
struct RawBroadcast {
    action: String,
    session: i32,
    profile: Option<i32>,
    time_ms: Option<i64>,
}

impl TopologyEvent {
    pub fn new(change: TopologyChange, session: i32, profile: Option<i32>) -> Self {
        Self {
            change,
            session,
            profile,
            time: Utc::now(),
        }
    }

    /// Parse a raw platform broadcast
    pub fn parse(text: &str) -> Result<Self> {
        let raw: RawBroadcast = serde_json::from_str(text)?;
        let change = TopologyChange::from_action(&raw.action)?;

        let time = raw
            .time_ms
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or_else(Utc::now);

        Ok(Self {
            change,
            session: raw.session,
            profile: raw.profile,
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_added() {
        let json = r#"{
            "action": "android.intent.action.MANAGED_PROFILE_ADDED",
            "session": 0,
            "profile": 10,
            "time_ms": 1704067200000
        }"#;

        let event = TopologyEvent::parse(json).unwrap();
        assert_eq!(event.change, TopologyChange::ProfileAdded);
        assert_eq!(event.session, 0);
        assert_eq!(event.profile, Some(10));
        assert_eq!(event.time.timestamp_millis(), 1704067200000);
    }

    #[test]
    fn test_parse_profile_removed_without_profile_or_time() {
        let json = r#"{
            "action": "android.intent.action.MANAGED_PROFILE_REMOVED",
            "session": 0
        }"#;

        let event = TopologyEvent::parse(json).unwrap();
        assert_eq!(event.change, TopologyChange::ProfileRemoved);
        assert!(event.profile.is_none());
    }

    #[test]
    fn test_parse_unknown_action() {
        let json = r#"{"action": "android.intent.action.USER_UNLOCKED", "session": 0}"#;
        let err = TopologyEvent::parse(json).unwrap_err();
        assert!(matches!(err, EventError::UnknownAction(a) if a.ends_with("USER_UNLOCKED")));
    }

    #[test]
    fn test_parse_malformed() {
        let err = TopologyEvent::parse(r#"{"session": "zero"}"#).unwrap_err();
        assert!(matches!(err, EventError::JsonParse(_)));
    }

    #[test]
    fn test_change_action_mapping() {
        for change in [TopologyChange::ProfileAdded, TopologyChange::ProfileRemoved] {
            assert_eq!(TopologyChange::from_action(change.action()).unwrap(), change);
        }
    }

    #[test]
    fn test_event_serialization_omits_missing_profile() {
        let event = TopologyEvent::new(TopologyChange::ProfileRemoved, 0, None);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"profile_removed\""));
        assert!(!json.contains("\"profile\""));
    }
}
