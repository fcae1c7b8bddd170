// Lease Planning - pure filtering and ordering over a scanned record set
//
// The storage backend enumerates records and persists the outcome; everything
// in between (classification, delivery order, lease grants) happens here so
// the state machine is testable without touching a filesystem.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Disposition, MessageId, MessageRecord};

/// Outcome of one poll scan.
pub struct PollPlan {
    /// Records to hand out, lease already granted. Must be persisted before
    /// the messages are returned to the caller.
    pub lease: Vec<MessageRecord>,
    /// Terminal records to delete. Deletion failures may be ignored; the
    /// next scan will pick them up again.
    pub purge: Vec<MessageId>,
}

/// Classify every record at `now`, keep the eligible ones in
/// oldest-updated-first order, truncate to `limit`, and grant leases.
pub fn plan_poll(records: Vec<MessageRecord>, now: DateTime<Utc>, limit: usize) -> PollPlan {
    let mut eligible = Vec::new();
    let mut purge = Vec::new();

    for record in records {
        match record.disposition(now) {
            Disposition::Purge => purge.push(record.id),
            Disposition::InFlight => {}
            Disposition::Eligible => eligible.push(record),
        }
    }

    eligible.sort_by(|a, b| a.update_time.cmp(&b.update_time));
    eligible.truncate(limit);

    for record in &mut eligible {
        record.grant_lease(now);
    }

    debug!(
        leased = eligible.len(),
        purged = purge.len(),
        "poll scan planned"
    );

    PollPlan {
        lease: eligible,
        purge,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn record(id: &str, updated_at: DateTime<Utc>) -> MessageRecord {
        MessageRecord::new(
            id,
            "q-1",
            "job",
            "{}",
            "",
            updated_at.timestamp() + 86_400,
            3,
            60,
            updated_at,
        )
    }

    #[test]
    fn serves_oldest_updated_first() {
        let now = at(1_000_100);
        let records = vec![
            record("m-new", at(1_000_050)),
            record("m-old", at(1_000_000)),
            record("m-mid", at(1_000_020)),
        ];

        let plan = plan_poll(records, now, 10);
        let ids: Vec<_> = plan.lease.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["m-old", "m-mid", "m-new"]);
        assert!(plan.purge.is_empty());
    }

    #[test]
    fn truncates_to_limit_after_sorting() {
        let now = at(1_000_100);
        let records = vec![
            record("m-c", at(1_000_030)),
            record("m-a", at(1_000_010)),
            record("m-b", at(1_000_020)),
        ];

        let plan = plan_poll(records, now, 2);
        let ids: Vec<_> = plan.lease.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["m-a", "m-b"]);
    }

    #[test]
    fn grants_lease_on_every_selected_record() {
        let now = at(1_000_100);
        let plan = plan_poll(vec![record("m-1", at(1_000_000))], now, 1);

        let leased = &plan.lease[0];
        assert_eq!(leased.retried, 1);
        assert_eq!(leased.update_time, now);
        assert_eq!(
            leased.reenter_time,
            Some(now + chrono::Duration::seconds(60))
        );
    }

    #[test]
    fn separates_purgeable_from_in_flight() {
        let now = at(1_000_100);

        let mut expired = record("m-expired", at(1_000_000));
        expired.deadline = now.timestamp() - 1;

        let mut in_flight = record("m-held", at(1_000_000));
        in_flight.grant_lease(now); // lease horizon now+60

        let plan = plan_poll(
            vec![expired, in_flight, record("m-free", at(1_000_000))],
            now,
            10,
        );

        assert_eq!(plan.purge, vec!["m-expired".to_string()]);
        let ids: Vec<_> = plan.lease.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["m-free"]);
    }

    #[test]
    fn empty_scan_yields_empty_plan() {
        let plan = plan_poll(Vec::new(), at(1_000_000), 5);
        assert!(plan.lease.is_empty());
        assert!(plan.purge.is_empty());
    }
}
