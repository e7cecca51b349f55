// tests/property_coercion.rs

use proptest::prelude::*;
use pile_config::config::loader::{apply_listing, field_name, value_to_bool, TRUTHY};
use pile_config::config::PileConfig;

fn case_mixed(word: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), word.len()).prop_map(move |upper| {
        word.chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn truthy_token() -> impl Strategy<Value = String> {
    prop_oneof![
        case_mixed(TRUTHY[0]),
        case_mixed(TRUTHY[1]),
        case_mixed(TRUTHY[2]),
        case_mixed(TRUTHY[3]),
    ]
}

proptest! {
    #[test]
    fn truthy_tokens_in_any_case_are_true(token in truthy_token()) {
        prop_assert!(value_to_bool(Some(token.as_str())));

        let mut cfg = PileConfig::default();
        let warnings = apply_listing(&mut cfg, &format!("pile.format.signoff {token}"));
        prop_assert!(warnings.is_empty());
        prop_assert!(cfg.format_signoff);
    }

    #[test]
    fn anything_else_is_false(value in "[a-zA-Z0-9]{1,8}") {
        prop_assume!(!TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t)));
        prop_assert!(!value_to_bool(Some(value.as_str())));

        let mut cfg = PileConfig::default();
        apply_listing(&mut cfg, &format!("pile.genbranch.use-cache {value}"));
        prop_assert!(!cfg.genbranch_use_cache);
    }

    #[test]
    fn transliteration_only_rewrites_separators(name in "[a-z][a-z0-9]{0,6}([-.][a-z0-9]{1,6}){0,3}") {
        let field = field_name(&format!("pile.{name}")).unwrap();
        prop_assert_eq!(field.len(), name.len());
        prop_assert!(!field.contains('-') && !field.contains('.'));
        prop_assert_eq!(field.replace('_', ""), name.replace(['-', '.'], ""));
    }
}
