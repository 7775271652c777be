//! Pure aggregation of raw server records into a resource snapshot.

use crate::resources::types::{int_field, ResourceSnapshot, ServerRecord};

/// Fold `records` into a single snapshot, returning the totals and the number
/// of demo servers skipped. Demo servers are excluded unless `include_demos`
/// is set. A record missing a limit group contributes 0 for that group and is
/// logged; aggregation itself never fails.
pub fn aggregate(records: &[ServerRecord], include_demos: bool) -> (ResourceSnapshot, u64) {
    let mut snapshot = ResourceSnapshot::default();
    let mut skipped: u64 = 0;

    for record in records {
        if record.is_demo() && !include_demos {
            skipped += 1;
            tracing::debug!("Skipping demo server: {}", record.name);
            continue;
        }

        match &record.limits {
            Some(limits) => {
                snapshot.memory += int_field(limits, "memory");
                snapshot.swap += int_field(limits, "swap");
                snapshot.disk += int_field(limits, "disk");
                snapshot.io += int_field(limits, "io");
                snapshot.cpu += int_field(limits, "cpu");
            }
            None => tracing::warn!("Server {:?} has no limits block", record.name),
        }

        match &record.feature_limits {
            Some(features) => {
                snapshot.databases += int_field(features, "databases");
                snapshot.allocations += int_field(features, "allocations");
                snapshot.backups += int_field(features, "backups");
            }
            None => tracing::warn!("Server {:?} has no feature_limits block", record.name),
        }
    }

    // Demo servers are not counted unless they were included in the totals
    snapshot.servers = records.len() as u64 - skipped;

    (snapshot, skipped)
}
