mod helpers;
use helpers::record;

use rescache::resources::aggregator::aggregate;
use serde_json::json;

// =========================================================================================
// 1. TOTALS
// =========================================================================================

#[test]
fn test_totals_across_records() {
    let records = vec![
        record("web-1", "", json!({"memory": 10, "cpu": 5}), json!({})),
        record("web-2", "", json!({"memory": 20, "cpu": 1}), json!({})),
    ];

    let (snapshot, skipped) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 30);
    assert_eq!(snapshot.cpu, 6);
    assert_eq!(snapshot.servers, 2);
    assert_eq!(skipped, 0);
}

#[test]
fn test_feature_limits_are_summed() {
    let records = vec![
        record(
            "db-1",
            "",
            json!({"memory": 1024, "swap": 0, "disk": 10000, "io": 500, "cpu": 100}),
            json!({"databases": 2, "allocations": 1, "backups": 3}),
        ),
        record(
            "db-2",
            "",
            json!({"memory": 2048, "swap": 512, "disk": 20000, "io": 500, "cpu": 200}),
            json!({"databases": 1, "allocations": 2, "backups": 0}),
        ),
    ];

    let (snapshot, _) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 3072);
    assert_eq!(snapshot.swap, 512);
    assert_eq!(snapshot.disk, 30000);
    assert_eq!(snapshot.io, 1000);
    assert_eq!(snapshot.cpu, 300);
    assert_eq!(snapshot.databases, 3);
    assert_eq!(snapshot.allocations, 3);
    assert_eq!(snapshot.backups, 3);
}

#[test]
fn test_empty_input_yields_zero_snapshot() {
    let (snapshot, skipped) = aggregate(&[], false);

    assert_eq!(snapshot.servers, 0);
    assert_eq!(snapshot.memory, 0);
    assert_eq!(skipped, 0);
}

// =========================================================================================
// 2. DEMO FILTERING
// =========================================================================================

#[test]
fn test_demo_servers_excluded_by_default() {
    let records = vec![
        record("Demo Box", "", json!({"memory": 100}), json!({})),
        record("prod-1", "", json!({"memory": 50}), json!({})),
    ];

    let (snapshot, skipped) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 50);
    assert_eq!(snapshot.servers, 1);
    assert_eq!(skipped, 1);
}

#[test]
fn test_demo_servers_included_on_request() {
    let records = vec![
        record("Demo Box", "", json!({"memory": 100}), json!({})),
        record("prod-1", "", json!({"memory": 50}), json!({})),
    ];

    let (snapshot, skipped) = aggregate(&records, true);

    assert_eq!(snapshot.memory, 150);
    assert_eq!(snapshot.servers, 2);
    assert_eq!(skipped, 0);
}

#[test]
fn test_demo_match_is_case_insensitive_on_description() {
    let records = vec![record(
        "trial-7",
        "Customer DEMO environment",
        json!({"memory": 100}),
        json!({}),
    )];

    let (snapshot, skipped) = aggregate(&records, false);

    assert_eq!(snapshot.servers, 0);
    assert_eq!(skipped, 1);
}

// =========================================================================================
// 3. MALFORMED DATA TOLERANCE
// =========================================================================================

#[test]
fn test_missing_feature_limits_counts_zero() {
    let records = vec![serde_json::from_value(json!({
        "name": "bare-1",
        "limits": {"memory": 256}
    }))
    .unwrap()];

    let (snapshot, _) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 256);
    assert_eq!(snapshot.databases, 0);
    assert_eq!(snapshot.allocations, 0);
    assert_eq!(snapshot.backups, 0);
    assert_eq!(snapshot.servers, 1);
}

#[test]
fn test_missing_limits_counts_zero() {
    let records = vec![serde_json::from_value(json!({
        "name": "bare-2",
        "feature_limits": {"databases": 4}
    }))
    .unwrap()];

    let (snapshot, _) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 0);
    assert_eq!(snapshot.databases, 4);
    assert_eq!(snapshot.servers, 1);
}

#[test]
fn test_numeric_strings_are_coerced() {
    let records = vec![record(
        "str-1",
        "",
        json!({"memory": "1024", "cpu": "100"}),
        json!({}),
    )];

    let (snapshot, _) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 1024);
    assert_eq!(snapshot.cpu, 100);
}

#[test]
fn test_garbage_values_count_zero() {
    let records = vec![record(
        "odd-1",
        "",
        json!({"memory": "Over 9 levels deep", "cpu": null, "disk": 500}),
        json!({}),
    )];

    let (snapshot, _) = aggregate(&records, false);

    assert_eq!(snapshot.memory, 0);
    assert_eq!(snapshot.cpu, 0);
    assert_eq!(snapshot.disk, 500);
    assert_eq!(snapshot.servers, 1);
}

// =========================================================================================
// 4. PURITY
// =========================================================================================

#[test]
fn test_aggregate_is_idempotent() {
    let records = vec![
        record("Demo Box", "", json!({"memory": 100}), json!({"databases": 1})),
        record("prod-1", "", json!({"memory": "50"}), json!({})),
    ];

    let first = aggregate(&records, false);
    let second = aggregate(&records, false);

    assert_eq!(first, second);
}
