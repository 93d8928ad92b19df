//! End-to-end comparison tests
//!
//! These run whole schema/SQL pairs through the public entry points and check
//! the reported differences.

use encoding_rs::WINDOWS_1251;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xsdtags::schema::extract_schema_paths;
use xsdtags::sql::extract_sql_paths;
use xsdtags::{validate, validate_bytes, Cardinality, Error, SchemaError, Validator};

const CAMT054_XSD: &str = include_str!("fixtures/camt054.xsd");
const CAMT054_SQL: &str = include_str!("fixtures/camt054.sql");

const ROOT: &str = "/Document/BkToCstmrDbtCdtNtfctn";

/// Document -> BkToCstmrDbtCdtNtfctn -> GrpHdr/MsgId, plus a choice for the
/// optionality scenarios.
fn notification_xsd(namespace_attr: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns="urn:test" {}>
    <xs:element name="Document" type="DocumentType"/>
    <xs:complexType name="DocumentType">
        <xs:sequence>
            <xs:element name="BkToCstmrDbtCdtNtfctn" type="MessageType"/>
        </xs:sequence>
    </xs:complexType>
    <xs:complexType name="MessageType">
        <xs:sequence>
            <xs:element name="GrpHdr" type="GroupHeader"/>
        </xs:sequence>
    </xs:complexType>
    <xs:complexType name="GroupHeader">
        <xs:sequence>
            <xs:element name="MsgId" type="xs:string"/>
        </xs:sequence>
        <xs:choice>
            <xs:element name="Prtry" type="xs:string"/>
        </xs:choice>
    </xs:complexType>
</xs:schema>"#,
        namespace_attr
    )
}

fn xsd() -> String {
    notification_xsd(r#"targetNamespace="urn:test""#)
}

const MSG_ID_REQUIRED: &str =
    "insert into map values ('/Document/BkToCstmrDbtCdtNtfctn/GrpHdr/MsgId', 'MSG_ID', 1);";
const PRTRY_OPTIONAL: &str =
    "insert into map values ('/Document/BkToCstmrDbtCdtNtfctn/GrpHdr/Prtry', 'PRTRY', 2);";

#[test]
fn test_matching_mapping_is_valid() {
    let sql = format!("{}\n{}", MSG_ID_REQUIRED, PRTRY_OPTIONAL);
    let result = validate(&xsd(), &sql).unwrap();

    assert!(result.is_valid());
    assert!(result.differences().is_empty());
}

#[test]
fn test_cardinality_mismatch_is_reported() {
    let sql = format!(
        "insert into map values ('{}/GrpHdr/MsgId', 'MSG_ID', 2);\n{}",
        ROOT, PRTRY_OPTIONAL
    );
    let result = validate(&xsd(), &sql).unwrap();

    assert!(!result.is_valid());
    assert_eq!(
        result.messages(),
        vec![format!("Расхождение для '{}/GrpHdr/MsgId': XSD=1, SQL=2", ROOT)]
    );
}

#[test]
fn test_missing_path_is_reported() {
    let result = validate(&xsd(), PRTRY_OPTIONAL).unwrap();

    assert_eq!(
        result.messages(),
        vec![format!("Отсутствует в sql-файле xsdPath '{}/GrpHdr/MsgId", ROOT)]
    );
}

#[test]
fn test_choice_leaf_marked_required_in_sql() {
    let sql = format!(
        "{}\ninsert into map values ('{}/GrpHdr/Prtry', 'PRTRY', 1);",
        MSG_ID_REQUIRED, ROOT
    );
    let result = validate(&xsd(), &sql).unwrap();

    assert_eq!(
        result.messages(),
        vec![format!("Расхождение для '{}/GrpHdr/Prtry': XSD=2, SQL=1", ROOT)]
    );
}

#[test]
fn test_missing_target_namespace_fails() {
    let err = validate(&notification_xsd(""), MSG_ID_REQUIRED).unwrap_err();
    assert!(matches!(
        err,
        Error::Schema(SchemaError::MissingTargetNamespace)
    ));
}

#[test]
fn test_windows_1251_schema_is_decoded() {
    let source = xsd().replace(
        "<xs:element name=\"Document\"",
        "<!-- Уведомление о зачислении --><xs:element name=\"Document\"",
    );
    let (xsd_bytes, _, had_errors) = WINDOWS_1251.encode(&source);
    assert!(!had_errors);
    assert!(std::str::from_utf8(&xsd_bytes).is_err());

    let sql = format!("{}\n{}", MSG_ID_REQUIRED, PRTRY_OPTIONAL);
    let result = validate_bytes(&xsd_bytes, sql.as_bytes()).unwrap();
    assert!(result.is_valid());
}

#[test]
fn test_anonymous_choice_branch_under_extended_document_type() {
    let xsd = r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:x">
    <xs:element name="Document" type="D"/>
    <xs:complexType name="D">
        <xs:complexContent>
            <xs:extension base="Base">
                <xs:sequence><xs:element name="Root" type="R"/></xs:sequence>
            </xs:extension>
        </xs:complexContent>
    </xs:complexType>
    <xs:complexType name="R">
        <xs:choice>
            <xs:element name="Anon" minOccurs="1">
                <xs:complexType>
                    <xs:sequence><xs:element name="Leaf" type="xs:string"/></xs:sequence>
                </xs:complexType>
            </xs:element>
        </xs:choice>
    </xs:complexType>
</xs:schema>"#;
    let sql = "insert into map values ('/Document/Root/Anon/Leaf', 'LEAF', 1);";

    let result = validate(xsd, sql).unwrap();
    assert_eq!(
        result.messages(),
        vec![
            "Расхождение для '/Document/Root/Anon/Leaf': XSD=2, SQL=1".to_string(),
            "Отсутствует в sql-файле xsdPath '/Document/Root/Anon".to_string(),
        ]
    );
}

#[test]
fn test_malformed_schema_is_a_parse_error() {
    let err = validate("<xs:schema><xs:element></xs:schema>", "").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_camt054_fixture_paths() {
    let paths = extract_schema_paths(CAMT054_XSD).unwrap();
    let flags: Vec<(String, i64)> = paths
        .iter()
        .map(|(p, c)| (p.trim_start_matches(ROOT).to_string(), c.value()))
        .collect();

    let expected = vec![
        ("/GrpHdr/MsgId", 1),
        ("/GrpHdr/CreDtTm", 1),
        ("/GrpHdr/AddtlInf", 2),
        ("/Ntfctn/Id", 1),
        ("/Ntfctn/Acct/Id/IBAN", 2),
        ("/Ntfctn/Acct/Id/Othr/Id", 2),
        ("/Ntfctn/Acct/Id/Othr/Issr", 2),
        ("/Ntfctn/Acct/Ccy", 2),
        ("/Ntfctn/ElctrncSeqNb", 2),
        ("/SplmtryData/PlcAndNm", 2),
        ("/SplmtryData/Envlp", 2),
        ("/SplmtryData/Envlp/Any", 2),
    ];
    let expected: Vec<(String, i64)> = expected
        .into_iter()
        .map(|(p, v)| (p.to_string(), v))
        .collect();
    assert_eq!(flags, expected);

    // Named complex types never become entries themselves.
    for intermediate in ["/GrpHdr", "/Ntfctn", "/Ntfctn/Acct", "/Ntfctn/Acct/Id", "/SplmtryData"] {
        assert!(!paths.contains(&format!("{}{}", ROOT, intermediate)));
    }
}

#[test]
fn test_camt054_fixture_differences() {
    let result = validate(CAMT054_XSD, CAMT054_SQL).unwrap();

    assert_eq!(
        result.messages(),
        vec![
            format!("Расхождение для '{}/Ntfctn/Acct/Id/IBAN': XSD=2, SQL=1", ROOT),
            format!("Отсутствует в sql-файле xsdPath '{}/Ntfctn/Acct/Id/Othr/Issr", ROOT),
            format!("Отсутствует в sql-файле xsdPath '{}/SplmtryData/PlcAndNm", ROOT),
            format!("Отсутствует в sql-файле xsdPath '{}/SplmtryData/Envlp", ROOT),
            format!("Отсутствует в sql-файле xsdPath '{}/SplmtryData/Envlp/Any", ROOT),
        ]
    );
}

#[test]
fn test_camt054_json_shape() {
    let result = validate(CAMT054_XSD, CAMT054_SQL).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["valid"], false);
    assert_eq!(json["differences"].as_array().unwrap().len(), 5);
}

#[test]
fn test_validate_files() {
    let dir = tempfile::tempdir().unwrap();
    let xsd_path = dir.path().join("camt054.xsd");
    let sql_path = dir.path().join("camt054.sql");
    std::fs::write(&xsd_path, CAMT054_XSD).unwrap();
    std::fs::write(&sql_path, CAMT054_SQL).unwrap();

    let result = Validator::new().validate_files(&xsd_path, &sql_path).unwrap();
    assert_eq!(result, validate(CAMT054_XSD, CAMT054_SQL).unwrap());
}

#[test]
fn test_required_iff_no_optional_or_choice_ancestor() {
    let paths = extract_schema_paths(CAMT054_XSD).unwrap();
    for (path, cardinality) in paths.iter() {
        let through_optional = ["AddtlInf", "/Id/", "Ccy", "ElctrncSeqNb", "SplmtryData"]
            .iter()
            .any(|marker| path.contains(marker));
        assert_eq!(
            cardinality.is_required(),
            !through_optional,
            "unexpected flag for {}",
            path
        );
    }
}

fn sql_line(path: &str, value: u8) -> String {
    format!("insert into map values ('{}', 'COL', {});\n", path, value)
}

proptest! {
    #[test]
    fn prop_repeated_calls_are_identical(values in proptest::collection::vec(1u8..=3, 12)) {
        let paths = extract_schema_paths(CAMT054_XSD).unwrap();
        let sql: String = paths
            .paths()
            .zip(values.iter())
            .map(|(p, &v)| sql_line(p, v))
            .collect();

        let first = validate(CAMT054_XSD, &sql).unwrap();
        let second = validate(CAMT054_XSD, &sql).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_sql_only_paths_are_never_reported(extra in "[A-Za-z]{1,12}", value in 0u8..9) {
        let extra_path = format!("{}/Extra{}", ROOT, extra);
        let sql = format!("{}{}", CAMT054_SQL, sql_line(&extra_path, value));

        let result = validate(CAMT054_XSD, &sql).unwrap();
        prop_assert!(result.differences().iter().all(|d| d.path() != extra_path));
        prop_assert_eq!(result, validate(CAMT054_XSD, CAMT054_SQL).unwrap());
    }

    #[test]
    fn prop_one_record_per_differing_path(values in proptest::collection::vec(proptest::option::of(1u8..=2), 12)) {
        let schema_paths = extract_schema_paths(CAMT054_XSD).unwrap();
        let sql: String = schema_paths
            .paths()
            .zip(values.iter())
            .filter_map(|(p, v)| v.map(|v| sql_line(p, v)))
            .collect();
        let sql_paths = extract_sql_paths(&sql);

        let result = validate(CAMT054_XSD, &sql).unwrap();
        for (path, cardinality) in schema_paths.iter() {
            let records = result.differences().iter().filter(|d| d.path() == path).count();
            let expected = match sql_paths.get(path) {
                None => 1,
                Some(&v) if v != cardinality.value() => 1,
                Some(_) => 0,
            };
            prop_assert_eq!(records, expected, "path {}", path);
        }
        prop_assert_eq!(result.is_valid(), result.differences().is_empty());
    }
}

#[test]
fn test_cardinality_flag_values() {
    assert_eq!(Cardinality::Required.value(), 1);
    assert_eq!(Cardinality::Optional.value(), 2);
}
