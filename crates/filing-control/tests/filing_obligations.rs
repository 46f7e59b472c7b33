use chrono::{DateTime, NaiveDate, Utc};
use filing_control::filings::{
    compute_obligations, create_assessment_snapshot, EntityType, FilingInput,
    DEADLINE_ENGINE_VERSION,
};

fn computed_at() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-05T09:30:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

fn foreign_llc() -> FilingInput {
    FilingInput {
        entity_type: EntityType::Llc,
        foreign_owned: true,
        us_business_activity: true,
        has_us_income: true,
        tax_year: 2025,
        state: " wy ".to_string(),
    }
}

#[test]
fn foreign_llc_snapshot_carries_obligations_and_deadlines() {
    let snapshot = create_assessment_snapshot(&foreign_llc(), computed_at());

    let titles: Vec<&str> = snapshot
        .obligations
        .iter()
        .map(|obligation| obligation.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Information return for 25% foreign-owned U.S. LLC",
            "Federal estimated tax payments (if applicable)",
            "Employer Identification Number",
            "Beneficial Ownership Information report",
            "State annual report / franchise tax (WY)",
            "Maintain registered agent",
        ]
    );

    let due = NaiveDate::from_ymd_opt(2026, 4, 15).expect("valid date");
    let forms: Vec<(&str, NaiveDate)> = snapshot
        .deadlines
        .deadlines
        .iter()
        .map(|deadline| (deadline.form.as_str(), deadline.due_date))
        .collect();
    assert_eq!(forms, vec![("Form 5472", due), ("Pro Forma 1120", due)]);
    assert_eq!(snapshot.deadlines.engine_version, DEADLINE_ENGINE_VERSION);
    assert_eq!(snapshot.deadlines.computed_at, computed_at());
}

#[test]
fn domestic_entity_without_activity_gets_reduced_obligations_note() {
    let input = FilingInput {
        entity_type: EntityType::Partnership,
        foreign_owned: false,
        us_business_activity: false,
        has_us_income: false,
        tax_year: 2025,
        state: String::new(),
    };

    let obligations = compute_obligations(&input);
    let last = obligations.last().expect("obligations present");
    assert_eq!(last.title, "Potentially reduced federal filing obligations");
    assert_eq!(obligations[0].form.as_deref(), Some("Form 1065"));

    let snapshot = create_assessment_snapshot(&input, computed_at());
    assert!(snapshot.deadlines.deadlines.is_empty());
}

#[test]
fn snapshot_round_trips_through_json_wire_shape() {
    let json = r#"{
        "entityType": "llc",
        "foreignOwned": true,
        "usBusinessActivity": false,
        "hasUSIncome": false,
        "taxYear": 2024
    }"#;

    let input: FilingInput = serde_json::from_str(json).expect("input parses");
    let snapshot = create_assessment_snapshot(&input, computed_at());
    let value = serde_json::to_value(&snapshot).expect("serialize snapshot");

    assert_eq!(value["entityProfile"]["entityType"], "llc");
    assert_eq!(value["deadlines"]["taxYear"], 2024);
    assert_eq!(value["deadlines"]["deadlines"][0]["dueDate"], "2025-04-15");
    assert!(value["obligations"][0]["form"]
        .as_str()
        .expect("form present")
        .contains("5472"));
}
