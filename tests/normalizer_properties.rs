//! Property tests for parameter and result naming.

use std::collections::HashSet;

use misura::testkit::normalize_test_contract;
use proptest::prelude::*;

const NAMES: [&str; 11] = [
    "a", "b", "c", "x", "ctx", "err", "value", "key", "d", "n", "s",
];
const TYPES: [&str; 7] = [
    "string",
    "int",
    "*int",
    "[]byte",
    "error",
    "context.Context",
    "map[string]int",
];

fn render_fields(fields: &[(usize, bool)], named: bool, names: &mut impl Iterator<Item = &'static str>) -> String {
    fields
        .iter()
        .map(|&(ty, blank)| {
            let ty = TYPES[ty];
            match (named, blank) {
                (false, _) => ty.to_string(),
                (true, true) => format!("_ {}", ty),
                (true, false) => format!("{} {}", names.next().unwrap_or("z"), ty),
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// A Go method declaration with a random mix of named, blank, and bare entries.
fn arb_method() -> impl Strategy<Value = (String, usize, usize)> {
    (
        prop::collection::vec((0..TYPES.len(), any::<bool>()), 0..5),
        prop::collection::vec((0..TYPES.len(), any::<bool>()), 0..4),
        any::<bool>(),
        any::<bool>(),
        Just(NAMES.to_vec()).prop_shuffle(),
    )
        .prop_map(|(params, results, params_named, results_named, names)| {
            let mut names = names.into_iter();
            let param_text = render_fields(&params, params_named, &mut names);
            let result_text = render_fields(&results, results_named, &mut names);
            let method = if results.is_empty() {
                format!("M({})", param_text)
            } else {
                format!("M({}) ({})", param_text, result_text)
            };
            (method, params.len(), results.len())
        })
}

fn wrap(method: &str) -> String {
    format!("package p\n\nimport \"context\"\n\ntype T interface {{\n\t{}\n}}\n", method)
}

fn signature_of(method: &str) -> (String, String, String) {
    let contract = normalize_test_contract(&wrap(method), "T");
    let m = &contract.methods[0];
    (m.signature.clone(), m.param_names(), m.result_names())
}

#[test]
fn test_declared_err_never_duplicates_error_result() {
    assert_eq!(
        signature_of("Do(err string) error"),
        ("Do(a string) (err error)".to_string(), "a".to_string(), "err".to_string())
    );
    assert_eq!(
        signature_of("Do() (err int, e error)"),
        ("Do() (a int, err error)".to_string(), "".to_string(), "a, err".to_string())
    );
}

#[test]
fn test_unnamed_context_draws_from_generator() {
    let (signature, params, _) = signature_of("Do(context.Context, string)");
    assert_eq!(signature, "Do(ctx context.Context, b string)");
    assert_eq!(params, "ctx, b");
}

proptest! {
    #[test]
    fn prop_every_name_is_present_and_distinct((method, n_params, n_results) in arb_method()) {
        let contract = normalize_test_contract(&wrap(&method), "T");
        let m = &contract.methods[0];

        prop_assert_eq!(m.params.len(), n_params);
        prop_assert_eq!(m.results.len(), n_results);

        let names: Vec<&str> = m
            .params
            .iter()
            .chain(m.results.iter())
            .map(|p| p.name.as_str())
            .collect();
        prop_assert!(names.iter().all(|n| !n.is_empty() && *n != "_"), "blank name in {:?}", names);
        let unique: HashSet<_> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len(), "duplicate name in {:?}", names);
    }

    #[test]
    fn prop_normalization_is_idempotent((method, _, _) in arb_method()) {
        let first = normalize_test_contract(&wrap(&method), "T");
        let signature = &first.methods[0].signature;
        let second = normalize_test_contract(&wrap(signature), "T");

        prop_assert_eq!(&second.methods[0].signature, signature);
    }

    #[test]
    fn prop_error_result_is_named_err((method, _, _) in arb_method()) {
        let contract = normalize_test_contract(&wrap(&method), "T");
        let m = &contract.methods[0];

        if let Some(first_error) = m.results.iter().find(|r| r.type_text == "error") {
            prop_assert_eq!(first_error.name.as_str(), "err");
            prop_assert!(m.has_error);
        } else {
            prop_assert!(!m.has_error);
        }
    }
}
