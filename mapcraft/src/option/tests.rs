//! Unit tests for the option descriptor.

use serde_json::json;

use super::{OptionConfig, OptionSpec};
use crate::error::CraftError;
use crate::registry::Resolvers;
use crate::value::{Slot, SlotMap};

#[test]
fn empty_names_are_rejected() {
    let err = OptionSpec::new("", OptionConfig::new()).expect_err("must fail");
    assert!(matches!(err, CraftError::EmptyOptionName));
}

#[test]
fn hash_key_falls_back_to_the_name() {
    let plain = OptionSpec::new("child", OptionConfig::new()).expect("option builds");
    assert_eq!(plain.hash_key(), "child");

    let keyed = OptionSpec::new("child", OptionConfig::new().key("children"))
        .expect("option builds");
    assert_eq!(keyed.hash_key(), "children");
}

#[test]
fn meta_lookup_ignores_case() {
    let option = OptionSpec::new("title", OptionConfig::new().meta("Exclaim", true))
        .expect("option builds");

    assert_eq!(option.meta("exclaim"), Some(&json!(true)));
    assert_eq!(option.meta("EXCLAIM"), Some(&json!(true)));
    assert_eq!(option.meta("absent"), None);
}

#[test]
fn config_defaults_are_the_plainest_behaviour() {
    let option = OptionSpec::new("anything", OptionConfig::new()).expect("option builds");

    assert_eq!(option.default(), &json!(null));
    assert!(!option.eager());
    assert!(option.mutator().is_none());
    assert!(option.craft().is_none());
}

#[test]
fn apply_uses_the_default_mutator_when_unconfigured() {
    let option = OptionSpec::new("name", OptionConfig::new()).expect("option builds");
    let resolvers = Resolvers::built_in();
    let mut data = SlotMap::new();

    option
        .apply(&resolvers, &mut data, "name", Slot::Value(json!("a")))
        .expect("applies");
    option
        .apply(&resolvers, &mut data, "name", Slot::Value(json!("b")))
        .expect("applies");

    assert_eq!(data.get("name").expect("slot present").compile(), json!("b"));
}

#[test]
fn apply_surfaces_unknown_mutator_names() {
    let option = OptionSpec::new("name", OptionConfig::new().mutator("bogus"))
        .expect("option builds");
    let resolvers = Resolvers::built_in();
    let mut data = SlotMap::new();

    let err = option
        .apply(&resolvers, &mut data, "name", Slot::Value(json!(1)))
        .expect_err("must fail");
    assert!(matches!(err, CraftError::UnknownStrategy { kind: "mutator", .. }));
}
