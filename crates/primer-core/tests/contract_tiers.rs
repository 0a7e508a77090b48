//! # Contract Tier Tests (C0-C3)
//!
//! Each tier pins the observable contract of one container family.
//!
//! ## Tiers
//! - C0: Indexed Mapping
//! - C1: Sequences
//! - C2: Text Utility
//! - C3: Numeric Extensions

use primer_core::{
    BoundedSequence, CorrectFloat, ImmutableSequence, IndexedMapping, Key, MatchOptions,
    PrimitiveError, RichBool, Scalar, SequenceOps, Slice, TextUtility, Value, ValueKind, WeakInt,
};

// =============================================================================
// TIER C0: INDEXED MAPPING
// =============================================================================

mod c0_indexed_mapping {
    use super::*;

    fn sample() -> IndexedMapping {
        [("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect()
    }

    /// C0.1: Positional, negative and slice lookups.
    #[test]
    fn positional_and_slice_lookups() {
        let mapping = sample();
        assert_eq!(
            mapping.get(1).expect("position").items(),
            vec![(Key::from("b"), Value::Int(2))]
        );
        assert_eq!(
            mapping.get(-1).expect("negative").keys(),
            vec![Key::from("d")]
        );
        assert_eq!(
            mapping.get(Slice::new(Some(1), Some(3))).expect("slice").keys(),
            vec![Key::from("b"), Key::from("c")]
        );
        assert_eq!(
            mapping.get(Slice::full().with_step(-2)).expect("step").keys(),
            vec![Key::from("d"), Key::from("b")]
        );
    }

    /// C0.2: An existing integer key shadows the same position.
    #[test]
    fn integer_key_shadows_position() {
        let mapping: IndexedMapping = [(Key::Int(1), "one"), (Key::Int(0), "zero")]
            .into_iter()
            .collect();
        assert_eq!(
            mapping.get(1).expect("key").items(),
            vec![(Key::Int(1), Value::from("one"))]
        );
        assert_eq!(mapping.get_index(1).expect("index").0, &Key::Int(0));
    }

    /// C0.3: Missing keys and positions raise distinct errors.
    #[test]
    fn lookup_errors() {
        let mapping = sample();
        assert!(matches!(
            mapping.get("zz"),
            Err(PrimitiveError::KeyNotFound(_))
        ));
        assert_eq!(
            mapping.get(10).map(|m| m.len()),
            Err(PrimitiveError::IndexOutOfRange { index: 10, len: 4 })
        );
        assert!(matches!(
            mapping.get(Slice::full().with_step(0)),
            Err(PrimitiveError::Interval { .. })
        ));
    }

    /// C0.4: Depth of flat, empty and nested mappings.
    #[test]
    fn depth() {
        assert_eq!(sample().check_depth(), 1);
        assert_eq!(IndexedMapping::new().check_depth(), 1);

        let mut nested = sample();
        nested.insert("inner", Value::Map(sample()));
        assert_eq!(nested.check_depth(), 2);
    }

    /// C0.5: Removal by position and by value.
    #[test]
    fn removal() {
        let mut mapping: IndexedMapping = [("a", 1), ("b", 2), ("c", 1)].into_iter().collect();
        assert_eq!(
            mapping.remove_first_by_value(&Value::Int(1)),
            Some((Key::from("a"), Value::Int(1)))
        );
        assert_eq!(mapping.remove_all_by_value(&Value::Int(1)), 1);
        assert_eq!(
            mapping.remove_by_index(-1).expect("last"),
            (Key::from("b"), Value::Int(2))
        );
        assert!(mapping.is_empty());
    }

    /// C0.6: Recursive rule application reaches nested leaves only.
    #[test]
    fn apply_rule_depth_reaches_leaves() {
        let mut outer = sample();
        outer.insert("inner", Value::Map(sample()));
        outer.apply_rule_depth(|v| match v {
            Value::Int(i) => Value::Int(i * 10),
            other => other,
        });
        let inner = outer.value_of(&Key::from("inner")).and_then(Value::as_map).expect("map");
        assert_eq!(inner.value_of(&Key::from("d")), Some(&Value::Int(40)));
        assert_eq!(outer.value_of(&Key::from("a")), Some(&Value::Int(10)));
    }
}

// =============================================================================
// TIER C1: SEQUENCES
// =============================================================================

mod c1_sequences {
    use super::*;

    /// C1.1: A failed bounded append leaves the length unchanged.
    #[test]
    fn bounded_limit_is_enforced_at_append() {
        let mut seq = BoundedSequence::from(vec![1, 2, 3]);
        seq.limit(3);
        assert_eq!(seq.append(4), Err(PrimitiveError::MaxSize { limit: 3 }));
        assert_eq!(seq.len(), 3);
    }

    /// C1.2: Immutable append returns a new, longer value.
    #[test]
    fn immutable_append_is_copy_on_write() {
        let seq = ImmutableSequence::from(vec!["a", "b"]);
        let longer = seq.append("c").expect("append");
        assert_eq!(longer.len(), seq.len() + 1);
        assert_eq!(seq.to_vec(), vec!["a", "b"]);
    }

    /// C1.3: Both variants answer the shared operation set identically.
    #[test]
    fn shared_operations_agree() {
        let values = vec![Value::Int(3), Value::from("t"), Value::Float(1.5), Value::Int(-2)];
        let bounded = BoundedSequence::from(values.clone());
        let immutable = ImmutableSequence::from(values);

        let b_numbers = bounded.get_by_type([ValueKind::Integer, ValueKind::Float]);
        let i_numbers = immutable.get_by_type([ValueKind::Integer, ValueKind::Float]);
        assert_eq!(b_numbers.to_vec(), i_numbers.to_vec());
        assert_eq!(b_numbers.sum(), i_numbers.sum());
        assert_eq!(b_numbers.min().expect("min"), Value::Int(-2));
        assert_eq!(i_numbers.max().expect("max"), Value::Int(3));
    }

    /// C1.4: Stopping a cycle ends it at the next element boundary.
    #[test]
    fn stop_cycle_is_cooperative() {
        let seq = ImmutableSequence::from(vec![1, 2, 3]);
        let mut reader = seq.cycle();
        assert_eq!(reader.next(), Some(&1));
        seq.stop_cycle();
        assert_eq!(reader.next(), None);
        assert_eq!(seq.cycle().next(), Some(&1));
    }
}

// =============================================================================
// TIER C2: TEXT UTILITY
// =============================================================================

mod c2_text {
    use super::*;

    /// C2.1: Reference results for the common-run algorithms.
    #[test]
    fn common_runs() {
        let abcdef = TextUtility::from("abcdef");
        assert_eq!(abcdef.longest_common_substring("zcdef").as_str(), "cdef");
        assert_eq!(
            TextUtility::from("flower").longest_common_prefix("flow").as_str(),
            "flow"
        );
        assert_eq!(
            TextUtility::from("abXYZ").longest_common_suffix("cdXYZ").as_str(),
            "XYZ"
        );
    }

    /// C2.2: Palindromes.
    #[test]
    fn palindromes() {
        assert!(TextUtility::from("level").is_palindrome());
        assert!(!TextUtility::from("hello").is_palindrome());
    }

    /// C2.3: Closest matches, ties kept in input order.
    #[test]
    fn closest_matches_reference_case() {
        let matches = TextUtility::from("cat")
            .closest_matches(&["cot", "dog", "bat"], MatchOptions::new(2, 0.6))
            .expect("matches");
        assert_eq!(matches, vec!["cot", "bat"]);
    }

    /// C2.4: Out-of-interval parameters are rejected.
    #[test]
    fn closest_matches_intervals() {
        let text = TextUtility::from("cat");
        for options in [MatchOptions::new(0, 0.5), MatchOptions::new(1, -0.1)] {
            assert!(matches!(
                text.closest_matches(&["cat"], options),
                Err(PrimitiveError::Interval { .. })
            ));
        }
    }

    /// C2.5: The mask width does not depend on the hidden digit count.
    #[test]
    fn fixed_width_mask() {
        let twelve = TextUtility::from("123412341234").mask_credit_card().expect("mask");
        let nineteen = TextUtility::from("1234123412341234123")
            .mask_credit_card()
            .expect("mask");
        assert_eq!(twelve.char_count(), nineteen.char_count());
    }
}

// =============================================================================
// TIER C3: NUMERIC EXTENSIONS
// =============================================================================

mod c3_numeric {
    use super::*;

    /// C3.1: Decimal addition without binary artifacts.
    #[test]
    fn correct_float_addition() {
        assert_eq!((CorrectFloat::new(0.1) + CorrectFloat::new(0.2)).get(), 0.3);
    }

    /// C3.2: Base round trips over the representative radices.
    #[test]
    fn base_round_trips() {
        for base in [2, 8, 16, 36] {
            for n in [0, 1, 35, 255, 1_000_000, -42] {
                let digits = WeakInt::new(n).to_base(base).expect("to_base");
                assert_eq!(WeakInt::from_base(&digits, base).expect("from_base").get(), n);
            }
        }
    }

    /// C3.3: Primality via the integer square root.
    #[test]
    fn primes() {
        assert!(WeakInt::new(97).is_prime());
        assert!(!WeakInt::new(91).is_prime());
        assert!(!WeakInt::new(1).is_prime());
    }

    /// C3.4: Digit-text operands are coerced; other text is rejected.
    #[test]
    fn text_coercion() {
        assert_eq!((WeakInt::new(2) + "40").expect("add").get(), 42);
        assert!(matches!(
            WeakInt::new(2) + "4.0",
            Err(PrimitiveError::TypeMismatch { .. })
        ));
    }

    /// C3.5: Integer-family real functions truncate toward zero.
    #[test]
    fn integer_family_truncates() {
        assert_eq!(WeakInt::new(8).sqrt(3).expect("cbrt").get(), 2);
        assert_eq!(WeakInt::new(10).sqrt(2).expect("sqrt").get(), 3);
        assert_eq!(WeakInt::new(30).sin().expect("sin").get(), 0);
    }

    /// C3.6: Boolean conversions.
    #[test]
    fn rich_bool() {
        let yes = RichBool::new(true);
        assert_eq!(yes.to_label(), "Yes");
        assert_eq!(yes + RichBool::new(true), 2);
    }
}
