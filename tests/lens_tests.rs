//! Unit tests for path-indexed lenses.
//!
//! - [`Lens`]: get, set, unset, put and modify at dotted paths
//! - [`Focus`]: paths resolved once and reused
//! - `CloneThenSet` and [`CopyOnWrite`]: interchangeable update strategies

use keylens::lens::{CopyOnWrite, Lens, LensError, Strategy, UpdateError, lens_with};
use keylens::path::{KeyPath, PathError};
use keylens::shape::Shape;
use keylens::value::Value;
use keylens::{shape, value};
use rstest::rstest;

// =============================================================================
// Test Shapes
// =============================================================================

fn profile_shape() -> Shape {
    shape!({
        name: string,
        age?: number,
        address: {
            street: string,
            city: string,
            zip?: number,
            email: {
                value: string,
                flags: { valid: boolean, confirmed: boolean },
            },
        },
        some?: { deep: { array: [number] } },
    })
}

fn original() -> Value {
    value!({
        name: "yornaath",
        age: 36,
        address: {
            street: "yoob",
            city: "y-ville",
            zip: 1337,
            email: {
                value: "a@b",
                flags: { valid: false, confirmed: false },
            },
        },
    })
}

fn large(length: usize) -> Value {
    let array = Value::array((0..length).map(|index| index as f64));
    let mut map = original().as_object().unwrap().clone();
    map.insert("some".to_owned(), Value::object([("deep", Value::object([("array", array)]))]));
    Value::from(map)
}

fn path(path: &str) -> KeyPath {
    KeyPath::parse(path).unwrap()
}

fn strategy_lens(strategy: Strategy) -> Lens<Strategy> {
    Lens::new(profile_shape(), strategy).unwrap()
}

// =============================================================================
// End-to-end Scenarios
// =============================================================================

#[rstest]
#[case::clone_then_set(Strategy::CloneThenSet)]
#[case::copy_on_write(Strategy::CopyOnWrite)]
fn test_set_nested_leaf(#[case] strategy: Strategy) {
    let lens = strategy_lens(strategy);
    let root = original();

    let updated = lens.set(&root, "address.zip", 12).unwrap();

    assert_eq!(lens.get(&updated, "address.zip").unwrap(), Some(&Value::from(12)));
    for unchanged in ["name", "age", "address.street", "address.city", "address.email"] {
        assert_eq!(
            lens.get(&updated, unchanged).unwrap(),
            lens.get(&root, unchanged).unwrap(),
            "{unchanged} changed"
        );
    }
    assert_eq!(lens.get(&root, "address.zip").unwrap(), Some(&Value::from(1337)));
    assert_eq!(root, original());
}

#[rstest]
#[case::clone_then_set(Strategy::CloneThenSet)]
#[case::copy_on_write(Strategy::CopyOnWrite)]
fn test_unset_optional_field(#[case] strategy: Strategy) {
    let lens = strategy_lens(strategy);
    let root = original();

    let updated = lens.unset(&root, "age").unwrap();

    assert_eq!(lens.get(&updated, "age").unwrap(), None);
    assert_eq!(lens.get(&root, "age").unwrap(), Some(&Value::from(36)));
    assert!(lens.check(&updated).is_ok());
}

#[test]
fn test_update_sequence() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let root = original();

    let updated = lens.set(&root, "address.zip", 12).unwrap();
    let updated = lens
        .set(
            &updated,
            "address.email",
            value!({ value: "killa@scavs.com", flags: { valid: true, confirmed: true } }),
        )
        .unwrap();
    let updated = lens.set(&updated, "address.email.flags.valid", false).unwrap();
    let updated = lens.set(&updated, "address.zip", 1337).unwrap();
    let updated = lens.unset(&updated, "age").unwrap();

    let expected = value!({
        name: "yornaath",
        address: {
            street: "yoob",
            city: "y-ville",
            zip: 1337,
            email: {
                value: "killa@scavs.com",
                flags: { valid: false, confirmed: true },
            },
        },
    });
    assert_eq!(updated, expected);
    assert_eq!(root, original());
}

#[test]
fn test_set_optional_record_then_descend() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let root = original();

    assert_eq!(lens.get(&root, "some.deep.array").unwrap(), None);
    let updated = lens.set(&root, "some", value!({ deep: { array: [1, 2] } })).unwrap();
    let updated = lens.set(&updated, "some.deep.array", value!([3])).unwrap();
    assert_eq!(lens.get(&updated, "some.deep.array").unwrap(), Some(&value!([3])));
}

// =============================================================================
// Structural Sharing
// =============================================================================

#[test]
fn test_copy_on_write_shares_untouched_subtrees() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let root = large(1000);

    let updated = lens.set(&root, "address.zip", 12).unwrap();

    assert!(!updated.ptr_eq(&root));
    let array = path("some.deep.array");
    assert!(updated.pointer(&array).unwrap().ptr_eq(root.pointer(&array).unwrap()));
    let email = path("address.email");
    assert!(updated.pointer(&email).unwrap().ptr_eq(root.pointer(&email).unwrap()));
    assert!(!updated.field("address").unwrap().ptr_eq(root.field("address").unwrap()));
    assert!(!updated.ptr_eq(&root));
}

#[test]
fn test_clone_then_set_shares_nothing() {
    let lens = Lens::clone_then_set(profile_shape()).unwrap();
    let root = large(10);

    let updated = lens.set(&root, "address.zip", 12).unwrap();

    assert!(!updated.ptr_eq(&root));
    let array = path("some.deep.array");
    assert!(!updated.pointer(&array).unwrap().ptr_eq(root.pointer(&array).unwrap()));
    let email = path("address.email");
    assert!(!updated.pointer(&email).unwrap().ptr_eq(root.pointer(&email).unwrap()));
}

#[test]
fn test_strategies_agree() {
    let root = large(10);
    let naive = Lens::clone_then_set(profile_shape()).unwrap();
    let cow = Lens::copy_on_write(profile_shape()).unwrap();

    for (target, value) in [
        ("name", value!("Killa")),
        ("address.email.flags.confirmed", value!(true)),
        ("some.deep", value!({ array: [] })),
    ] {
        assert_eq!(
            naive.set(&root, target, value.clone()).unwrap(),
            cow.set(&root, target, value).unwrap()
        );
    }
}

// =============================================================================
// Rejected Calls
// =============================================================================

#[rstest]
#[case::unknown_field("address.country")]
#[case::below_leaf("name.first")]
#[case::into_array("some.deep.array.0")]
#[case::empty("")]
#[case::trailing_delimiter("address.")]
fn test_invalid_path(#[case] target: &str) {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let root = original();

    assert!(matches!(lens.get(&root, target), Err(LensError::Path(_))));
    assert!(matches!(lens.set(&root, target, 1), Err(LensError::Path(_))));
    assert!(matches!(lens.focus(target), Err(LensError::Path(_))));
}

#[test]
fn test_unknown_field_error() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    assert_eq!(
        lens.set(&original(), "address.country", "RU").unwrap_err(),
        LensError::Path(PathError::UnknownField {
            path: "address.country".to_owned(),
            segment: "country".to_owned(),
        })
    );
}

#[rstest]
#[case::string_for_number("age", value!("old"))]
#[case::number_for_string("address.street", value!(1))]
#[case::null_for_number("address.zip", value!(null))]
#[case::missing_nested_field("address.email", value!({ value: "a@b" }))]
#[case::unknown_nested_field(
    "address.email.flags",
    value!({ valid: true, confirmed: true, spam: false })
)]
#[case::wrong_element("some.deep.array", value!([1, "two"]))]
fn test_value_type_mismatch(#[case] target: &str, #[case] value: Value) {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let error = lens.set(&original(), target, value).unwrap_err();
    assert!(matches!(error, LensError::TypeMismatch { ref path, .. } if path == target));
}

#[test]
fn test_type_mismatch_message() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let error = lens.set(&original(), "age", "old").unwrap_err();
    assert_eq!(
        error.to_string(),
        "value for `age` is not a `number | undefined`: expected `number`, found string"
    );
}

#[rstest]
#[case("name")]
#[case("address")]
#[case("address.email.flags.valid")]
fn test_unset_required_field(#[case] target: &str) {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    assert_eq!(
        lens.unset(&original(), target),
        Err(LensError::NotOptional {
            path: target.to_owned()
        })
    );
}

#[test]
fn test_set_below_absent_optional_record() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    assert_eq!(
        lens.set(&original(), "some.deep.array", value!([1])),
        Err(LensError::Update(UpdateError::MissingAncestor {
            path: "some".to_owned()
        }))
    );
}

#[test]
fn test_document_of_wrong_shape() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let document = value!({ name: "x", address: "nowhere" });

    assert_eq!(lens.get(&document, "address.zip").unwrap(), None);
    assert!(matches!(
        lens.set(&document, "address.zip", 1),
        Err(LensError::Update(UpdateError::NotAnObject { .. }))
    ));
    assert!(matches!(lens.check(&document), Err(LensError::Document(_))));
}

// =============================================================================
// Focus and Modify
// =============================================================================

#[test]
fn test_focus_resolves_once() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let zip = lens.focus("address.zip").unwrap();

    assert_eq!(zip.path(), &path("address.zip"));
    assert!(zip.path_type().is_optional());

    let root = original();
    let cleared = zip.unset(&root).unwrap();
    assert_eq!(zip.get(&cleared), None);
    let restored = zip.set(&cleared, 1337).unwrap();
    assert_eq!(restored, root);
}

#[test]
fn test_modify() {
    let lens = Lens::copy_on_write(profile_shape()).unwrap();
    let root = original();

    let older = lens
        .modify(&root, "age", |age| {
            age.and_then(Value::as_f64).map(|age| Value::from(age + 1.0))
        })
        .unwrap();
    assert_eq!(lens.get(&older, "age").unwrap(), Some(&Value::from(37)));

    let shouted = lens
        .modify(&root, "name", |name| {
            name.and_then(Value::as_str).map(|name| Value::from(name.to_uppercase()))
        })
        .unwrap();
    assert_eq!(lens.get(&shouted, "name").unwrap(), Some(&Value::from("YORNAATH")));
}

#[test]
fn test_put() {
    let lens = Lens::clone_then_set(profile_shape()).unwrap();
    let root = original();

    let cleared = lens.put(&root, "address.zip", None).unwrap();
    let restored = lens.put(&cleared, "address.zip", Some(Value::from(1337))).unwrap();
    assert_eq!(restored, root);
}

// =============================================================================
// Strategy Selection
// =============================================================================

#[rstest]
#[case("clone", Strategy::CloneThenSet)]
#[case("cow", Strategy::CopyOnWrite)]
fn test_strategy_from_configuration(#[case] name: &str, #[case] expected: Strategy) {
    struct Profile;

    impl keylens::shape::Shaped for Profile {
        fn shape() -> Shape {
            profile_shape()
        }
    }

    let strategy: Strategy = name.parse().unwrap();
    let lens = lens_with::<Profile, _>(strategy).unwrap();
    assert_eq!(*lens.updater(), expected);
    assert_eq!(
        lens.set(&original(), "name", "Killa").unwrap(),
        Lens::new(profile_shape(), CopyOnWrite)
            .unwrap()
            .set(&original(), "name", "Killa")
            .unwrap()
    );
}
