use moneyball_lambda_rust::flex::{FlexFloat, FlexInt};
use proptest::prelude::*;

#[derive(Debug, serde::Deserialize)]
struct Holder {
    value: FlexInt,
}

proptest! {
    #[test]
    fn integer_and_its_string_form_decode_alike(n in any::<i64>()) {
        let bare: FlexInt = serde_json::from_str(&n.to_string()).unwrap();
        let quoted: FlexInt = serde_json::from_str(&format!("\"{}\"", n)).unwrap();
        prop_assert_eq!(bare, quoted);
        prop_assert_eq!(bare.get(), n);
    }

    #[test]
    fn float_and_its_string_form_decode_alike(x in (-4_000_000i32..4_000_000).prop_map(|n| f64::from(n) / 4.0)) {
        let bare: FlexFloat = serde_json::from_str(&x.to_string()).unwrap();
        let quoted: FlexFloat = serde_json::from_str(&format!("\"{}\"", x)).unwrap();
        prop_assert_eq!(bare.get(), quoted.get());
    }
}

#[test]
fn empty_string_and_null_use_sentinels() {
    let empty: FlexInt = serde_json::from_str("\"\"").unwrap();
    assert_eq!(empty, FlexInt::EMPTY, "empty string should be the sentinel, was: {:?}", empty);

    let null: FlexInt = serde_json::from_str("null").unwrap();
    assert_eq!(null.get(), 0, "null should decode to zero, was: {}", null.get());

    let empty_float: FlexFloat = serde_json::from_str("\"\"").unwrap();
    assert_eq!(empty_float.get(), 0.0);
}

#[test]
fn non_numeric_string_fails_the_whole_decode() {
    let res = serde_json::from_str::<Holder>(r#"{"value": "twelve"}"#);
    assert!(res.is_err(), "non-numeric text should not decode, was: {:?}", res);

    #[derive(Debug, serde::Deserialize)]
    struct FloatHolder {
        value: FlexFloat,
    }
    for raw in ["nan", "inf", "infinity"] {
        let res = serde_json::from_str::<FloatHolder>(&format!(r#"{{"value": "{raw}"}}"#));
        assert!(res.is_err(), "{} should not decode as a float, was: {:?}", raw, res);
    }
}

#[test]
fn absent_field_defaults() {
    #[derive(Debug, serde::Deserialize)]
    struct Sparse {
        #[serde(default)]
        value: FlexInt,
    }
    let sparse: Sparse = serde_json::from_str("{}").unwrap();
    assert_eq!(sparse.value.get(), 0);
}
