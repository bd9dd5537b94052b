//! Property-based tests for Lens laws.
//!
//! This module verifies that both update strategies satisfy the lens laws
//! at every path of a nested profile shape:
//!
//! - **GetPut Law**: `lens.set(root, p, lens.get(root, p)) == root`
//! - **PutGet Law**: `lens.get(lens.set(root, p, v), p) == v`
//! - **PutPut Law**: `lens.set(lens.set(root, p, v1), p, v2) == lens.set(root, p, v2)`
//! - **Set Idempotence**: `lens.set(lens.set(root, p, v), p, v) == lens.set(root, p, v)`
//!
//! Plus the properties specific to immutable documents: the input is never
//! modified, both strategies produce equal results, and copy-on-write
//! shares every subtree off the updated path.

use keylens::lens::{Lens, Strategy as UpdateStrategy};
use keylens::shape::Shape;
use keylens::value::Value;
use keylens::{shape, value};
use proptest::prelude::*;

// =============================================================================
// Generators
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
    })
}

fn lenses() -> [Lens<UpdateStrategy>; 2] {
    [
        Lens::new(profile_shape(), UpdateStrategy::CloneThenSet).unwrap(),
        Lens::new(profile_shape(), UpdateStrategy::CopyOnWrite).unwrap(),
    ]
}

fn profiles() -> impl Strategy<Value = Value> {
    (
        "[a-z]{1,8}",
        proptest::option::of(0u32..120),
        proptest::option::of(0u32..100_000),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(name, age, zip, valid, confirmed)| {
            let mut address = vec![
                ("street", value!("Klimov Street")),
                ("city", value!("Tarkov")),
                (
                    "email",
                    value!({
                        value: "killa@scavs.com",
                        flags: { valid: (valid), confirmed: (confirmed) },
                    }),
                ),
            ];
            if let Some(zip) = zip {
                address.push(("zip", Value::from(zip)));
            }

            let mut profile = vec![("name", Value::from(name)), ("address", Value::object(address))];
            if let Some(age) = age {
                profile.push(("age", Value::from(age)));
            }
            Value::object(profile)
        })
}

/// A path together with two values of its type.
fn assignments() -> impl Strategy<Value = (&'static str, Value, Value)> {
    prop_oneof![
        ("[a-z]{0,8}", "[a-z]{0,8}")
            .prop_map(|(first, second)| ("name", Value::from(first), Value::from(second))),
        (0u32..120, 0u32..120)
            .prop_map(|(first, second)| ("age", Value::from(first), Value::from(second))),
        (0u32..100_000, 0u32..100_000)
            .prop_map(|(first, second)| ("address.zip", Value::from(first), Value::from(second))),
        (any::<bool>(), any::<bool>()).prop_map(|(first, second)| (
            "address.email.flags.valid",
            Value::from(first),
            Value::from(second)
        )),
        (any::<bool>(), any::<bool>()).prop_map(|(first, second)| (
            "address.email.flags",
            value!({ valid: (first), confirmed: (second) }),
            value!({ valid: (second), confirmed: (first) })
        )),
    ]
}

// =============================================================================
// Lens Laws
// =============================================================================

proptest! {
    /// PutGet Law: setting then getting yields the set value
    #[test]
    fn prop_put_get_law(root in profiles(), (path, value, _) in assignments()) {
        for lens in lenses() {
            let updated = lens.set(&root, path, value.clone()).unwrap();
            prop_assert_eq!(lens.get(&updated, path).unwrap(), Some(&value));
        }
    }

    /// GetPut Law: getting and setting back yields the original
    #[test]
    fn prop_get_put_law(root in profiles(), (path, _, _) in assignments()) {
        for lens in lenses() {
            if let Some(current) = lens.get(&root, path).unwrap() {
                let restored = lens.set(&root, path, current.clone()).unwrap();
                prop_assert_eq!(&restored, &root);
            }
        }
    }

    /// PutPut Law: two consecutive sets are equivalent to the last set
    #[test]
    fn prop_put_put_law(root in profiles(), (path, first, second) in assignments()) {
        for lens in lenses() {
            let left = lens.set(&lens.set(&root, path, first.clone()).unwrap(), path, second.clone()).unwrap();
            let right = lens.set(&root, path, second.clone()).unwrap();
            prop_assert_eq!(left, right);
        }
    }

    /// Setting the same value twice is the same as setting it once
    #[test]
    fn prop_set_idempotent(root in profiles(), (path, value, _) in assignments()) {
        for lens in lenses() {
            let once = lens.set(&root, path, value.clone()).unwrap();
            let twice = lens.set(&once, path, value.clone()).unwrap();
            prop_assert_eq!(&twice, &once);
            prop_assert!(!twice.ptr_eq(&once));
        }
    }

    /// Unset is idempotent and removes only the optional field
    #[test]
    fn prop_unset_idempotent(root in profiles()) {
        for lens in lenses() {
            for path in ["age", "address.zip"] {
                let once = lens.unset(&root, path).unwrap();
                let twice = lens.unset(&once, path).unwrap();
                prop_assert_eq!(lens.get(&once, path).unwrap(), None);
                prop_assert_eq!(&once, &twice);
                prop_assert_eq!(lens.get(&once, "name").unwrap(), lens.get(&root, "name").unwrap());
            }
        }
    }
}

// =============================================================================
// Immutability and Strategies
// =============================================================================

proptest! {
    /// The input document is never modified
    #[test]
    fn prop_set_does_not_mutate_input(root in profiles(), (path, value, _) in assignments()) {
        let snapshot = root.deep_clone();
        for lens in lenses() {
            let _ = lens.set(&root, path, value.clone()).unwrap();
            prop_assert_eq!(&root, &snapshot);
        }
    }

    /// Updated documents still conform to the shape
    #[test]
    fn prop_set_preserves_shape(root in profiles(), (path, value, _) in assignments()) {
        for lens in lenses() {
            let updated = lens.set(&root, path, value.clone()).unwrap();
            prop_assert!(lens.check(&updated).is_ok());
        }
    }

    /// Both strategies produce equal documents
    #[test]
    fn prop_strategies_agree(root in profiles(), (path, value, _) in assignments()) {
        let [naive, cow] = lenses();
        prop_assert_eq!(
            naive.set(&root, path, value.clone()).unwrap(),
            cow.set(&root, path, value).unwrap()
        );
    }

    /// Copy-on-write shares the email subtree unless the path enters it
    #[test]
    fn prop_copy_on_write_shares_siblings(root in profiles(), (path, value, _) in assignments()) {
        let lens = Lens::copy_on_write(profile_shape()).unwrap();
        let updated = lens.set(&root, path, value).unwrap();

        let before = root.field("address").unwrap().field("email").unwrap();
        let after = updated.field("address").unwrap().field("email").unwrap();
        prop_assert_eq!(after.ptr_eq(before), !path.starts_with("address.email"));
    }
}
