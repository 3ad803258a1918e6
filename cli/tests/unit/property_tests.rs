//! Property-based tests for the store and startup-file editing.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use envmanager_cli::application::services::{applier, profiles};
use envmanager_cli::domain::shell::{count_exports, remove_export, upsert_export};
use proptest::prelude::*;

use crate::helpers::{FakeEnv, temp_store};

fn var_name() -> impl Strategy<Value = String> {
    "[A-Z_][A-Z0-9_]{0,12}"
}

fn variables() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(var_name(), "[^\0]{0,24}", 0..6)
}

fn rc_content() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("# comment".to_string()),
            Just("alias ll='ls -l'".to_string()),
            var_name().prop_map(|k| format!("export {k}=old")),
            Just(String::new()),
        ],
        0..8,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Stored profiles read back exactly as created.
    #[test]
    fn prop_store_round_trip(vars in variables(), desc in proptest::option::of("[a-z ]{1,20}")) {
        let (_dir, store) = temp_store();
        let created = profiles::create_profile(&store, "p", vars.clone(), desc.clone()).unwrap();
        let loaded = profiles::get_profile(&store, "p").unwrap();
        prop_assert_eq!(&loaded.variables, &vars);
        prop_assert_eq!(loaded.variables_count(), vars.len());
        prop_assert_eq!(loaded.description, created.description);
        prop_assert_eq!(loaded.created_at, created.created_at);
    }

    /// After apply, every profile variable is live with its stored value.
    #[test]
    fn prop_apply_projects_all_variables(vars in variables()) {
        let (_dir, store) = temp_store();
        profiles::create_profile(&store, "p", vars.clone(), None).unwrap();
        let env = FakeEnv::with(&[("UNRELATED", "x")]);
        let applied = applier::apply(&store, &env, "p").unwrap();
        prop_assert_eq!(applied.applied, vars.len());
        let snapshot = env.snapshot();
        for (k, v) in &vars {
            prop_assert_eq!(snapshot.get(k), Some(v));
        }
        prop_assert_eq!(snapshot.get("UNRELATED").map(String::as_str), Some("x"));
    }

    /// Upsert always leaves exactly one directive and is idempotent.
    #[test]
    fn prop_upsert_single_directive(content in rc_content(), key in var_name(), value in "[^\0\n]{0,16}") {
        let once = upsert_export(&content, &key, &value);
        prop_assert_eq!(count_exports(&once, &key), 1);
        let twice = upsert_export(&once, &key, &value);
        prop_assert_eq!(&twice, &once);
        let (removed, changed) = remove_export(&twice, &key);
        prop_assert!(changed);
        prop_assert_eq!(count_exports(&removed, &key), 0);
    }
}
