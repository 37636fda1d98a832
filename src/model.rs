//! Entities as the management system actually stores them: loosely linked,
//! with two historical field-naming conventions (camelCase and snake_case)
//! coexisting in the same collections. Serde aliases fold the variants, so
//! the rest of the engine only ever sees one canonical shape. All entities
//! are read-only inputs — the engine never mutates them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

use crate::date_util::parse_datetime;
use crate::link::{Identified, RecordRef};
use crate::range::Timestamped;

/// Lenient date field: absent, null, malformed, or of an unexpected JSON
/// type all come out as `None`. A bad date excludes one record from
/// time-windowed sections; it never fails deserialization.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => parse_datetime(&s),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .and_then(chrono::DateTime::from_timestamp_millis)
            .map(|dt| dt.naive_utc()),
        _ => None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PaymentStatus {
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "failed")]
    Failed,
    #[serde(alias = "refunded")]
    Refunded,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SubscriptionStatus {
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "expired")]
    Expired,
    #[serde(alias = "suspended")]
    Suspended,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CheckInStatus {
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "cancelled")]
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ScheduleStatus {
    #[serde(alias = "confirmed")]
    Confirmed,
    #[serde(alias = "completed")]
    Completed,
    #[serde(alias = "cancelled")]
    Cancelled,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PackageType {
    #[serde(alias = "membership")]
    Membership,
    #[serde(alias = "combo")]
    Combo,
    #[serde(rename = "PT", alias = "Pt", alias = "pt")]
    Pt,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PackageType {
    pub fn label(&self) -> &'static str {
        match self {
            PackageType::Membership => "Membership",
            PackageType::Combo => "Combo",
            PackageType::Pt => "PT",
            PackageType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "membershipLevel")]
    pub membership_level: Option<String>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_date")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "memberId")]
    pub member_id: Option<RecordRef>,
    #[serde(default, alias = "packageId")]
    pub package_id: Option<RecordRef>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, alias = "endDate", deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default, alias = "isSuspended")]
    pub is_suspended: bool,
    #[serde(default, alias = "ptSessionsRemaining")]
    pub pt_sessions_remaining: Option<u32>,
    #[serde(default, alias = "ptSessionsUsed")]
    pub pt_sessions_used: Option<u32>,
}

impl Subscription {
    /// Whether this is a live subscription at `now`: Active, not suspended,
    /// and not past its end date.
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        self.status == SubscriptionStatus::Active
            && !self.is_suspended
            && self.end_date.is_some_and(|end| now <= end)
    }
}

/// A member's active subscription: first match in input order wins when a
/// member somehow holds more than one.
pub fn active_subscription<'a>(
    subscriptions: &'a [Subscription],
    member_id: &str,
    now: NaiveDateTime,
) -> Option<&'a Subscription> {
    subscriptions.iter().find(|s| {
        s.is_active(now)
            && s.member_id
                .as_ref()
                .and_then(RecordRef::resolve_id)
                .is_some_and(|id| id == member_id)
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "subscriptionId")]
    pub subscription_id: Option<RecordRef>,
    #[serde(default, alias = "memberId")]
    pub member_id: Option<RecordRef>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default, alias = "originalAmount")]
    pub original_amount: Option<f64>,
    #[serde(default, alias = "paymentStatus")]
    pub payment_status: PaymentStatus,
    #[serde(default, alias = "paymentDate", deserialize_with = "lenient_date")]
    pub payment_date: Option<NaiveDateTime>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_date")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, alias = "paymentMethod")]
    pub payment_method: Option<String>,
    #[serde(default, alias = "paymentType")]
    pub payment_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckIn {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "memberId")]
    pub member_id: Option<RecordRef>,
    #[serde(default, alias = "checkInTime", deserialize_with = "lenient_date")]
    pub check_in_time: Option<NaiveDateTime>,
    #[serde(default, alias = "checkOutTime", deserialize_with = "lenient_date")]
    pub check_out_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: CheckInStatus,
}

impl CheckIn {
    /// Derived visit length in whole minutes. Defined only when both
    /// timestamps are present and check-out is not before check-in;
    /// otherwise 0, which keeps the record out of duration aggregates while
    /// it still counts for attendance.
    pub fn duration_minutes(&self) -> i64 {
        match (self.check_in_time, self.check_out_time) {
            (Some(start), Some(end)) if end >= start => {
                ((end - start).num_milliseconds() as f64 / 60_000.0).round() as i64
            }
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Schedule {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "memberId")]
    pub member_id: Option<RecordRef>,
    #[serde(default, alias = "trainerId")]
    pub trainer_id: Option<RecordRef>,
    #[serde(default, alias = "dateTime", deserialize_with = "lenient_date")]
    pub date_time: Option<NaiveDateTime>,
    #[serde(default, alias = "durationMinutes")]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub status: ScheduleStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type", alias = "packageType", alias = "package_type")]
    pub package_type: PackageType,
    #[serde(default)]
    pub price: f64,
    #[serde(default, alias = "durationMonths")]
    pub duration_months: Option<u32>,
    #[serde(default, alias = "ptSessions")]
    pub pt_sessions: Option<u32>,
}

macro_rules! impl_identified {
    ($($entity:ty),+) => {
        $(impl Identified for $entity {
            fn record_id(&self) -> &str {
                &self.id
            }
        })+
    };
}

impl_identified!(Member, Subscription, Payment, CheckIn, Schedule, Package);

impl Timestamped for Member {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.created_at
    }
}

impl Timestamped for Subscription {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.start_date
    }
}

impl Timestamped for Payment {
    // paymentDate is authoritative; createdAt is the historical fallback
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.payment_date.or(self.created_at)
    }
}

impl Timestamped for CheckIn {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.check_in_time
    }
}

impl Timestamped for Schedule {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.date_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn camel_and_snake_case_fold_to_the_same_record() {
        let camel: Payment = serde_json::from_str(
            r#"{"_id": "p1", "paymentStatus": "Completed", "paymentDate": "2024-03-01T10:00:00Z", "amount": 100.0}"#,
        )
        .unwrap();
        let snake: Payment = serde_json::from_str(
            r#"{"id": "p1", "payment_status": "Completed", "payment_date": "2024-03-01T10:00:00Z", "amount": 100.0}"#,
        )
        .unwrap();
        assert_eq!(camel.payment_status, snake.payment_status);
        assert_eq!(camel.timestamp(), snake.timestamp());
        assert_eq!(camel.amount, snake.amount);
    }

    #[test]
    fn unknown_status_does_not_abort() {
        let p: Payment =
            serde_json::from_str(r#"{"id": "p1", "paymentStatus": "Chargeback"}"#).unwrap();
        assert_eq!(p.payment_status, PaymentStatus::Unknown);
    }

    #[test]
    fn malformed_date_becomes_none() {
        let p: Payment =
            serde_json::from_str(r#"{"id": "p1", "paymentDate": "sometime in March"}"#).unwrap();
        assert!(p.payment_date.is_none());
        assert!(p.timestamp().is_none());
    }

    #[test]
    fn payment_date_falls_back_to_created_at() {
        let p: Payment =
            serde_json::from_str(r#"{"id": "p1", "createdAt": "2024-03-05"}"#).unwrap();
        assert_eq!(
            p.timestamp().map(|ts| ts.date()),
            NaiveDate::from_ymd_opt(2024, 3, 5)
        );
    }

    #[test]
    fn duration_requires_ordered_pair() {
        let both = CheckIn {
            id: "c1".into(),
            member_id: None,
            check_in_time: Some(at(2024, 3, 1, 10, 0)),
            check_out_time: Some(at(2024, 3, 1, 11, 30)),
            status: CheckInStatus::Completed,
        };
        assert_eq!(both.duration_minutes(), 90);

        let reversed = CheckIn {
            check_in_time: Some(at(2024, 3, 1, 11, 30)),
            check_out_time: Some(at(2024, 3, 1, 10, 0)),
            ..both.clone()
        };
        assert_eq!(reversed.duration_minutes(), 0);

        let open = CheckIn {
            check_out_time: None,
            ..both
        };
        assert_eq!(open.duration_minutes(), 0);
    }

    #[test]
    fn active_subscription_rules() {
        let now = at(2024, 3, 15, 12, 0);
        let sub = |id: &str, status, suspended, end| Subscription {
            id: id.into(),
            member_id: Some(RecordRef::Text("m1".into())),
            package_id: None,
            start_date: None,
            end_date: Some(end),
            status,
            is_suspended: suspended,
            pt_sessions_remaining: None,
            pt_sessions_used: None,
        };

        let subs = vec![
            sub("s1", SubscriptionStatus::Expired, false, at(2024, 6, 1, 0, 0)),
            sub("s2", SubscriptionStatus::Active, true, at(2024, 6, 1, 0, 0)),
            sub("s3", SubscriptionStatus::Active, false, at(2024, 1, 1, 0, 0)),
            sub("s4", SubscriptionStatus::Active, false, at(2024, 6, 1, 0, 0)),
            sub("s5", SubscriptionStatus::Active, false, at(2024, 7, 1, 0, 0)),
        ];

        // Expired, suspended, and ended subscriptions are skipped; of the
        // two qualifying ones, the first in input order wins.
        let active = active_subscription(&subs, "m1", now).unwrap();
        assert_eq!(active.id, "s4");
        assert!(active_subscription(&subs, "m2", now).is_none());
    }

    #[test]
    fn package_type_aliases() {
        let p: Package = serde_json::from_str(r#"{"id": "k1", "type": "PT"}"#).unwrap();
        assert_eq!(p.package_type, PackageType::Pt);
        let p: Package =
            serde_json::from_str(r#"{"id": "k2", "packageType": "membership"}"#).unwrap();
        assert_eq!(p.package_type, PackageType::Membership);
    }
}
