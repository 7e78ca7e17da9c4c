//! Notices and direct messages.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{ClassId, MessageId, NoticeId, UserId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticeAudience {
    #[default]
    All,
    Students,
    Teachers,
    Parents,
    Staff,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoticePriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub audience: NoticeAudience,
    #[serde(default)]
    pub priority: NoticePriority,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub publish_date: NaiveDate,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub author_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Notice {
    /// Published and not yet expired on `today`.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.publish_date <= today && self.expiry_date.is_none_or(|expiry| expiry >= today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_notice_dates"))]
pub struct NoticeForm {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    pub audience: NoticeAudience,
    #[serde(default)]
    pub priority: NoticePriority,
    pub class_id: Option<ClassId>,
    pub publish_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
}

fn validate_notice_dates(form: &NoticeForm) -> Result<(), ValidationError> {
    if form
        .expiry_date
        .is_some_and(|expiry| expiry < form.publish_date)
    {
        return Err(error(
            "expiry_date",
            "Expiry date cannot be before the publish date",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub recipient_id: UserId,
    #[serde(default)]
    pub recipient_name: Option<String>,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MessageForm {
    #[validate(custom(function = "not_blank"))]
    pub recipient_id: UserId,
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub subject: String,
    #[validate(custom(function = "not_blank"), length(max = 5000))]
    pub body: String,
}

/// Number of unread messages in a mailbox.
pub fn unread_count(messages: &[Message]) -> usize {
    messages.iter().filter(|message| !message.is_read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::validate_form;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn notice(expiry: Option<NaiveDate>) -> Notice {
        Notice {
            id: NoticeId::new("n1"),
            title: "Sports Day".into(),
            content: "Friday".into(),
            audience: NoticeAudience::All,
            priority: NoticePriority::High,
            class_id: None,
            publish_date: date(2024, 6, 1),
            expiry_date: expiry,
            author_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_notice_active_window() {
        let with_expiry = notice(Some(date(2024, 6, 7)));
        assert!(!with_expiry.is_active(date(2024, 5, 31)));
        assert!(with_expiry.is_active(date(2024, 6, 7)));
        assert!(!with_expiry.is_active(date(2024, 6, 8)));
        assert!(notice(None).is_active(date(2030, 1, 1)));
    }

    #[test]
    fn test_notice_form_expiry_before_publish() {
        let form = NoticeForm {
            title: "Closure".into(),
            content: "School closed".into(),
            publish_date: date(2024, 6, 10),
            expiry_date: Some(date(2024, 6, 9)),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(
            errors.first("expiry_date"),
            Some("Expiry date cannot be before the publish date")
        );
    }

    #[test]
    fn test_priority_orders_by_urgency() {
        assert!(NoticePriority::Urgent > NoticePriority::Normal);
        assert!(NoticePriority::Low < NoticePriority::High);
    }

    #[test]
    fn test_message_form_requires_all_fields() {
        let errors = validate_form(&MessageForm::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_unread_count() {
        let json = r#"[
            {"id":"m1","senderId":"u1","recipientId":"u2","subject":"Hi","body":"..","sentAt":"2024-06-01T08:00:00Z"},
            {"id":"m2","senderId":"u1","recipientId":"u2","subject":"Re","body":"..","isRead":true,"sentAt":"2024-06-01T09:00:00Z"}
        ]"#;
        let messages: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(unread_count(&messages), 1);
    }
}
