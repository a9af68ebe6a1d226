use super::*;

fn parsed(name: &str, record_type: RecordType, content: &str) -> ParsedRecord {
    ParsedRecord::new(name, 3600, record_type, content, 0)
}

fn stored(name: &str, record_type: RecordType, content: &str) -> ZoneRecord {
    ZoneRecord {
        name: name.to_string(),
        record_type,
        content: content.to_string(),
        ttl: Some(3600),
        prio: None,
    }
}

fn incoming() -> Vec<ParsedRecord> {
    vec![
        parsed(
            "example.com",
            RecordType::Soa,
            "ns1.example.com admin.example.com 1 3600 900 1209600 86400",
        ),
        parsed("example.com", RecordType::Ns, "ns1.example.com"),
        parsed("www.example.com", RecordType::A, "192.0.2.1"),
        parsed("www.example.com", RecordType::A, "192.0.2.2"),
        parsed("mail.example.com", RecordType::A, "192.0.2.10"),
    ]
}

#[test]
fn test_conflict_strategy_default_and_names() {
    assert_eq!(ConflictStrategy::default(), ConflictStrategy::Skip);
    assert_eq!(ConflictStrategy::AddAll.as_str(), "addAll");
    assert_eq!(ConflictStrategy::parse("skip"), Some(ConflictStrategy::Skip));
    assert_eq!(ConflictStrategy::parse("REPLACE"), Some(ConflictStrategy::Replace));
    assert_eq!(ConflictStrategy::parse("add_all"), Some(ConflictStrategy::AddAll));
    assert_eq!(ConflictStrategy::parse("add-all"), Some(ConflictStrategy::AddAll));
    assert_eq!(ConflictStrategy::parse("merge"), None);
}

#[test]
fn test_conflict_strategy_serde() {
    let strategy: ConflictStrategy = serde_json::from_str("\"addAll\"").unwrap();
    assert_eq!(strategy, ConflictStrategy::AddAll);
    assert_eq!(
        serde_json::to_string(&ConflictStrategy::Replace).unwrap(),
        "\"replace\""
    );
}

#[test]
fn test_soa_always_filtered() {
    for strategy in [
        ConflictStrategy::Skip,
        ConflictStrategy::Replace,
        ConflictStrategy::AddAll,
    ] {
        let plan = plan_import(&incoming(), &[], strategy);
        assert_eq!(plan.soa_filtered, 1);
        assert_eq!(plan.added_count(), 4);
        assert!(plan
            .to_add
            .iter()
            .all(|r| r.record_type != RecordType::Soa));
    }
}

#[test]
fn test_skip_exact_duplicates() {
    let existing = vec![
        stored("WWW.Example.com", RecordType::A, "192.0.2.1"),
        stored("mail.example.com", RecordType::A, "192.0.2.99"),
    ];

    let plan = plan_import(&incoming(), &existing, ConflictStrategy::Skip);
    assert_eq!(plan.skipped_count(), 1);
    assert_eq!(plan.skipped[0].content, "192.0.2.1");
    assert_eq!(plan.added_count(), 3);
    assert!(plan.replaced_rrsets.is_empty());
}

#[test]
fn test_skip_compares_content_exactly() {
    let existing = vec![stored("www.example.com", RecordType::A, "192.0.2.1 ")];
    let plan = plan_import(&incoming(), &existing, ConflictStrategy::Skip);
    assert_eq!(plan.skipped_count(), 0);
}

#[test]
fn test_replace_lists_each_rrset_once() {
    let existing = vec![
        stored("www.example.com", RecordType::A, "198.51.100.1"),
        stored("www.example.com", RecordType::A, "198.51.100.2"),
        stored("example.com", RecordType::Mx, "mail.example.com"),
    ];

    let plan = plan_import(&incoming(), &existing, ConflictStrategy::Replace);
    assert_eq!(
        plan.replaced_rrsets,
        vec![RrsetKey::new("www.example.com", RecordType::A)]
    );
    assert_eq!(plan.added_count(), 4);
    assert_eq!(plan.skipped_count(), 0);
}

#[test]
fn test_add_all_keeps_duplicates() {
    let existing = vec![stored("www.example.com", RecordType::A, "192.0.2.1")];
    let plan = plan_import(&incoming(), &existing, ConflictStrategy::AddAll);
    assert_eq!(plan.added_count(), 4);
    assert_eq!(plan.skipped_count(), 0);
    assert!(plan.replaced_rrsets.is_empty());
}

#[test]
fn test_rrset_key_normalizes_name() {
    assert_eq!(
        RrsetKey::new("WWW.Example.COM.", RecordType::A),
        RrsetKey::new("www.example.com", RecordType::A)
    );
}

#[test]
fn test_plan_serializes_camel_case() {
    let plan = plan_import(&incoming(), &[], ConflictStrategy::Skip);
    let json = serde_json::to_value(&plan).unwrap();
    assert!(json.get("toAdd").is_some());
    assert!(json.get("replacedRrsets").is_some());
    assert_eq!(json["soaFiltered"], 1);
}
