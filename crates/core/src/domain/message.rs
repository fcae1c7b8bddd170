// Message Record Model & Visibility State Machine

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};
use super::queue::QueueId;

/// Message identifier (UUID v4)
pub type MessageId = String;

/// Minimum lead time between "now" and a message deadline, in seconds.
/// Guards against messages expiring before any consumer can lease them.
pub const MIN_DEADLINE_LEAD_SECS: i64 = 300;

/// Full stored shape of a message, one JSON file per message inside its
/// queue's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: MessageId,
    pub queue_id: QueueId,
    pub name: String,
    /// Opaque serialized content, passed through untouched
    pub payload: String,
    /// Absolute expiry instant, Unix seconds
    pub deadline: i64,
    /// Maximum delivery attempts
    pub retry: i32,
    /// Lease duration in seconds, applied on each delivery
    pub timeout: i64,
    /// Deliveries so far, monotonically increasing
    #[serde(default)]
    pub retried: i32,
    /// Terminal markers, Unix seconds, 0 = unset
    #[serde(default)]
    pub success_at: i64,
    #[serde(default)]
    pub failed_at: i64,
    #[serde(default)]
    pub desc: String,
    /// Instant before which the message is invisible to pollers.
    /// None = never delivered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reenter_time: Option<DateTime<Utc>>,
    /// Last write instant; delivery-order key (oldest-updated served first)
    pub update_time: DateTime<Utc>,
}

/// Delivery view handed to consumers from a poll.
/// Excludes the lease bookkeeping fields (`reenterTime`/`updateTime`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub queue_id: QueueId,
    pub name: String,
    pub payload: String,
    pub deadline: i64,
    pub retry: i32,
    pub timeout: i64,
    pub retried: i32,
    pub success_at: i64,
    pub failed_at: i64,
    #[serde(default)]
    pub desc: String,
}

impl From<&MessageRecord> for Message {
    fn from(record: &MessageRecord) -> Self {
        Self {
            id: record.id.clone(),
            queue_id: record.queue_id.clone(),
            name: record.name.clone(),
            payload: record.payload.clone(),
            deadline: record.deadline,
            retry: record.retry,
            timeout: record.timeout,
            retried: record.retried,
            success_at: record.success_at,
            failed_at: record.failed_at,
            desc: record.desc.clone(),
        }
    }
}

/// Classification of a record during a poll scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Terminal: acked/failed marker, past deadline, or budget exhausted
    /// after the lease lapsed. Purged inline by the scan.
    Purge,
    /// Leased and still invisible; left on disk, excluded from results
    InFlight,
    /// Deliverable now
    Eligible,
}

impl MessageRecord {
    /// Fresh record at enqueue time: no lease, no attempts, no markers.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        queue_id: impl Into<String>,
        name: impl Into<String>,
        payload: impl Into<String>,
        desc: impl Into<String>,
        deadline: i64,
        retry: i32,
        timeout: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            queue_id: queue_id.into(),
            name: name.into(),
            payload: payload.into(),
            deadline,
            retry,
            timeout,
            retried: 0,
            success_at: 0,
            failed_at: 0,
            desc: desc.into(),
            reenter_time: None,
            update_time: now,
        }
    }

    /// Lease has lapsed: granted and past its horizon, or never granted at
    /// all (a missing lease counts as lapsed for the exhaustion check).
    fn lease_lapsed(&self, now: DateTime<Utc>) -> bool {
        self.reenter_time.map_or(true, |t| t < now)
    }

    /// Lease is currently held and the message is invisible.
    fn lease_active(&self, now: DateTime<Utc>) -> bool {
        self.reenter_time.is_some_and(|t| t > now)
    }

    pub fn disposition(&self, now: DateTime<Utc>) -> Disposition {
        if self.success_at > 0
            || self.failed_at > 0
            || self.deadline < now.timestamp()
            || (self.lease_lapsed(now) && self.retried >= self.retry)
        {
            return Disposition::Purge;
        }
        if self.lease_active(now) {
            return Disposition::InFlight;
        }
        Disposition::Eligible
    }

    /// Grant a lease: invisible until `now + timeout`, one attempt consumed.
    /// Refreshing `update_time` keeps retried messages at the back of the
    /// delivery order.
    pub fn grant_lease(&mut self, now: DateTime<Utc>) {
        self.reenter_time = Some(now + Duration::seconds(self.timeout));
        self.retried += 1;
        self.update_time = now;
    }

    /// Validate that an acknowledgment may delete this record.
    ///
    /// A message that was never delivered cannot be acknowledged, and a late
    /// ack is rejected: the message may already be owned by another consumer.
    pub fn ensure_ackable(&self, now: DateTime<Utc>) -> Result<()> {
        match self.reenter_time {
            None => Err(DomainError::NeverLeased(self.id.clone())),
            Some(t) if t < now => Err(DomainError::LeaseExpired(self.id.clone())),
            Some(_) => Ok(()),
        }
    }
}

/// Enqueue-time guard on the deadline lead time.
pub fn validate_deadline(deadline: i64, now: DateTime<Utc>) -> Result<()> {
    let got = deadline - now.timestamp();
    if got < MIN_DEADLINE_LEAD_SECS {
        return Err(DomainError::DeadlineTooSoon {
            min: MIN_DEADLINE_LEAD_SECS,
            got,
        });
    }
    Ok(())
}
