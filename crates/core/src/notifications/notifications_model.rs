//! Notification domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::{Error, Result, ValidationError};
use crate::events::DomainEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    GoalCompleted,
    GoalSurpassed,
    GangRequest,
    GroupInvite,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::GoalCompleted => "goal_completed",
            NotificationType::GoalSurpassed => "goal_surpassed",
            NotificationType::GangRequest => "gang_request",
            NotificationType::GroupInvite => "group_invite",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "goal_completed" => Ok(NotificationType::GoalCompleted),
            "goal_surpassed" => Ok(NotificationType::GoalSurpassed),
            "gang_request" => Ok(NotificationType::GangRequest),
            "group_invite" => Ok(NotificationType::GroupInvite),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "unknown notification type '{}'",
                other
            )))),
        }
    }
}

/// Domain model representing a persisted notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub data: Option<serde_json::Value>,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub body: String,
    pub data: Option<serde_json::Value>,
}

impl NewNotification {
    /// Renders the user-facing notification for a goal status event.
    pub fn from_event(event: &DomainEvent) -> Self {
        match event {
            DomainEvent::GoalCompleted {
                user_id,
                goal_id,
                goal_title,
                was_surpassed,
            } => {
                let (notification_type, title, body) = if *was_surpassed {
                    (
                        NotificationType::GoalSurpassed,
                        "Goal surpassed!".to_string(),
                        format!("You went past your target for \"{}\".", goal_title),
                    )
                } else {
                    (
                        NotificationType::GoalCompleted,
                        "Goal completed!".to_string(),
                        format!("You reached your target for \"{}\".", goal_title),
                    )
                };
                NewNotification {
                    user_id: user_id.clone(),
                    notification_type,
                    title,
                    body,
                    data: Some(json!({
                        "goalId": goal_id,
                        "goalTitle": goal_title,
                        "wasSurpassed": was_surpassed,
                    })),
                }
            }
            DomainEvent::GoalSurpassed {
                user_id,
                goal_id,
                goal_title,
            } => NewNotification {
                user_id: user_id.clone(),
                notification_type: NotificationType::GoalSurpassed,
                title: "Goal surpassed!".to_string(),
                body: format!("You kept going past your target for \"{}\".", goal_title),
                data: Some(json!({
                    "goalId": goal_id,
                    "goalTitle": goal_title,
                    "wasSurpassed": true,
                })),
            },
        }
    }

    pub fn into_notification(self, id: String, now: NaiveDateTime) -> Notification {
        Notification {
            id,
            user_id: self.user_id,
            notification_type: self.notification_type,
            title: self.title,
            body: self.body,
            data: self.data,
            is_read: false,
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_round_trips_through_str() {
        for kind in [
            NotificationType::GoalCompleted,
            NotificationType::GoalSurpassed,
            NotificationType::GangRequest,
            NotificationType::GroupInvite,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationType>().unwrap(), kind);
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
        assert!("goal_done".parse::<NotificationType>().is_err());
    }

    #[test]
    fn test_completion_event_renders_completed_notification() {
        let event = DomainEvent::GoalCompleted {
            user_id: "u1".to_string(),
            goal_id: "g1".to_string(),
            goal_title: "Save $500".to_string(),
            was_surpassed: false,
        };
        let n = NewNotification::from_event(&event);
        assert_eq!(n.user_id, "u1");
        assert_eq!(n.notification_type, NotificationType::GoalCompleted);
        assert!(n.body.contains("Save $500"));
        let data = n.data.unwrap();
        assert_eq!(data["goalId"], "g1");
        assert_eq!(data["wasSurpassed"], false);
    }

    #[test]
    fn test_overshooting_completion_renders_surpassed_notification() {
        let event = DomainEvent::GoalCompleted {
            user_id: "u1".to_string(),
            goal_id: "g1".to_string(),
            goal_title: "Run".to_string(),
            was_surpassed: true,
        };
        let n = NewNotification::from_event(&event);
        assert_eq!(n.notification_type, NotificationType::GoalSurpassed);
        assert_eq!(n.data.unwrap()["wasSurpassed"], true);
    }

    #[test]
    fn test_notification_serializes_type_field() {
        let n = NewNotification::from_event(&DomainEvent::GoalSurpassed {
            user_id: "u1".to_string(),
            goal_id: "g1".to_string(),
            goal_title: "Run".to_string(),
        })
        .into_notification("n1".to_string(), chrono::Utc::now().naive_utc());
        let value = serde_json::to_value(&n).unwrap();
        assert_eq!(value["type"], "goal_surpassed");
        assert_eq!(value["isRead"], false);
        assert_eq!(value["userId"], "u1");
    }
}
