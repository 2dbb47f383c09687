use ini_lite::{parse, Error, ValueKind, GLOBAL_SECTION};
use rstest::rstest;

#[rstest]
#[case("1234", 1234, 1234.0)]
#[case("12.34", 12, 12.34)]
#[case("-5", -5, -5.0)]
#[case("143 ; port", 143, 143.0)]
#[case("3 apples", 3, 3.0)]
#[case("1e3", 1, 1000.0)]
#[case("John Doe", 0, 0.0)]
#[case("", 0, 0.0)]
fn lenient_numbers(#[case] raw: &str, #[case] int: i64, #[case] float: f64) {
    let doc = parse(&format!("n = {raw}\n"));
    assert_eq!(doc.value_as_int(GLOBAL_SECTION, "n"), Some(int));
    assert_eq!(doc.value_as_float(GLOBAL_SECTION, "n"), Some(float));
}

#[rstest]
#[case("true", true)]
#[case("True", false)]
#[case("1", false)]
#[case("false", false)]
#[case("", false)]
#[case("42", false)]
#[case("yes", false)]
fn booleans_match_true_exactly(#[case] raw: &str, #[case] expected: bool) {
    let doc = parse(&format!("flag = {raw}\n"));
    assert_eq!(doc.value_as_bool(GLOBAL_SECTION, "flag"), Some(expected));
}

#[rstest]
fn typed_accessors_require_a_value() {
    let doc = parse("present = 1\n");
    assert_eq!(doc.value_as_int(GLOBAL_SECTION, "absent"), None);
    assert_eq!(doc.value_as_float(GLOBAL_SECTION, "absent"), None);
    assert_eq!(doc.value_as_bool(GLOBAL_SECTION, "absent"), None);
    assert!(doc.get(GLOBAL_SECTION, "absent").is_none());
}

#[rstest]
fn strict_accessors_reject_partial_numbers() {
    let doc = parse("port = 143\nratio = 12.34\nname = John\nflag = false\n");

    let port = doc.get(GLOBAL_SECTION, "port").expect("port");
    assert_eq!(port.parse_int().ok(), Some(143));

    let ratio = doc.get(GLOBAL_SECTION, "ratio").expect("ratio");
    assert!(matches!(
        ratio.parse_int(),
        Err(Error::Conversion { kind: ValueKind::Int, .. })
    ));
    assert_eq!(ratio.parse_float().ok(), Some(12.34));

    let name = doc.get(GLOBAL_SECTION, "name").expect("name");
    assert!(name.parse_float().is_err());
    assert_eq!(name.as_float(), 0.0);

    let flag = doc.get(GLOBAL_SECTION, "flag").expect("flag");
    assert_eq!(flag.parse_bool().ok(), Some(false));
    assert!(!flag.as_bool());
}
