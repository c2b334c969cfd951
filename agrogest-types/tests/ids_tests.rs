use agrogest_types::RecordId;
use std::str::FromStr;

#[test]
fn record_id_roundtrips_through_i64() {
    let id = RecordId::new(42);
    assert_eq!(id.as_i64(), 42);
    assert_eq!(RecordId::from(42), id);
}

#[test]
fn record_id_display_and_parse() {
    let id = RecordId::new(-7);
    assert_eq!(id.to_string(), "-7");
    assert_eq!(RecordId::from_str("-7").unwrap(), id);
    assert!(RecordId::from_str("not a number").is_err());
}

#[test]
fn record_id_serde_transparent() {
    let json = serde_json::to_string(&RecordId::new(1234)).unwrap();
    assert_eq!(json, "1234");

    let parsed: RecordId = serde_json::from_str("1234").unwrap();
    assert_eq!(parsed, RecordId::new(1234));
}

#[test]
fn record_id_orders_numerically() {
    let mut ids = vec![RecordId::new(10), RecordId::new(2), RecordId::new(-5)];
    ids.sort();
    assert_eq!(ids, vec![RecordId::new(-5), RecordId::new(2), RecordId::new(10)]);
}
