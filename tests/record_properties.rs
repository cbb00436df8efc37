//! Property-based tests for record types and records.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated field lists and values.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use namedrec::codec::RowCodec;
use namedrec::{
    make_record_type, Args, Defaults, FactoryOptions, IdentPolicy, Record, RecordType, Value,
};

/// Strategy for generating names that pass field validation.
fn valid_field_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("must not be reserved", |name| {
        !IdentPolicy::default().is_reserved(name)
    })
}

/// Strategy for generating distinct valid field names, in a random order.
fn field_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(valid_field_name(), 0..12)
        .prop_map(|names| names.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Strategy for names that may be invalid, reserved or repeated.
fn raw_field_list() -> impl Strategy<Value = Vec<String>> {
    let raw = prop_oneof![
        valid_field_name(),
        "[a-z0-9_ -]{0,5}",
        Just("fn".to_string()),
        Just("a".to_string()),
    ];
    prop::collection::vec(raw, 0..12)
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        (-1.0e12f64..1.0e12).prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..12).prop_map(Value::Blob),
    ]
}

/// A record type over `fields` together with one matching set of values.
fn type_and_values() -> impl Strategy<Value = (Vec<String>, Vec<Value>)> {
    field_list().prop_flat_map(|fields| {
        let n = fields.len();
        (Just(fields), prop::collection::vec(value(), n))
    })
}

fn build(fields: &[String]) -> RecordType<Value> {
    make_record_type("Rec", fields.to_vec(), FactoryOptions::new()).unwrap()
}

fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn fields_keep_declaration_order(fields in field_list()) {
        let ty = build(&fields);
        prop_assert_eq!(ty.fields().collect::<Vec<_>>(), fields.iter().map(String::as_str).collect::<Vec<_>>());
        for (slot, name) in fields.iter().enumerate() {
            prop_assert_eq!(ty.slot_of(name), Some(slot));
        }
    }

    #[test]
    fn delimited_form_matches_list_form(fields in field_list(), comma in any::<bool>()) {
        let joined = fields.join(if comma { ", " } else { " " });
        let from_list = build(&fields);
        let from_str: RecordType<Value> = make_record_type("Rec", joined.as_str(), FactoryOptions::new()).unwrap();
        prop_assert_eq!(from_list.fields().collect::<Vec<_>>(), from_str.fields().collect::<Vec<_>>());
    }

    #[test]
    fn name_access_matches_slot_access((fields, values) in type_and_values()) {
        let rec = build(&fields).new_record(values.clone()).unwrap();
        for (slot, name) in fields.iter().enumerate() {
            prop_assert_eq!(rec.field(name).unwrap(), &values[slot]);
            prop_assert_eq!(rec.at(slot).unwrap(), &values[slot]);
        }
        prop_assert!(rec.at(fields.len()).is_err());
    }

    #[test]
    fn asdict_round_trips((fields, values) in type_and_values()) {
        let ty = build(&fields);
        let rec = ty.new_record(values).unwrap();
        let back = ty.from_mapping(rec.asdict(), true).unwrap();
        prop_assert_eq!(&back, &rec);
        prop_assert!(back.record_type().same_type(&ty));
    }

    #[test]
    fn keyword_order_is_irrelevant((fields, values) in type_and_values()) {
        let ty = build(&fields);
        let pairs: Vec<(String, Value)> = fields.iter().cloned().zip(values.iter().cloned()).collect();
        let forward = ty.from_kwargs(pairs.clone()).unwrap();
        let backward = ty.from_kwargs(pairs.into_iter().rev()).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn replace_changes_one_slot_only(
        (fields, values) in type_and_values(),
        pick in any::<prop::sample::Index>(),
        replacement in value(),
    ) {
        prop_assume!(!fields.is_empty());
        let slot = pick.index(fields.len());
        let rec = build(&fields).new_record(values.clone()).unwrap();
        let updated = rec.replace(Args::new().kw(fields[slot].as_str(), replacement.clone())).unwrap();

        prop_assert_eq!(rec.values(), values.as_slice());
        for (i, v) in updated.iter().enumerate() {
            if i == slot {
                prop_assert_eq!(v, &replacement);
            } else {
                prop_assert_eq!(v, &values[i]);
            }
        }
    }

    #[test]
    fn equality_and_hash_ignore_type((fields, values) in type_and_values()) {
        let a = build(&fields).new_record(values.clone()).unwrap();
        let renamed: Vec<String> = (0..fields.len()).map(|i| format!("f{}", i)).collect();
        let b = build(&renamed).new_record(values.clone()).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(hash_of(&a), hash_of(values.as_slice()));
    }

    #[test]
    fn repr_lists_every_field((fields, values) in type_and_values()) {
        let rec = build(&fields).new_record(values).unwrap();
        let repr = rec.repr();
        prop_assert!(repr.starts_with("Rec("), "{}", repr);
        prop_assert!(repr.ends_with(')'), "{}", repr);
        for (name, value) in rec.items() {
            let entry = format!("{}={:?}", name, value);
            prop_assert!(repr.contains(&entry), "{} missing {}", repr, entry);
        }
    }

    #[test]
    fn rename_always_yields_valid_unique_names(raw in raw_field_list()) {
        let ty: RecordType<Value> =
            make_record_type("Rec", raw.clone(), FactoryOptions::new().rename(true)).unwrap();
        prop_assert_eq!(ty.field_count(), raw.len());

        let policy = IdentPolicy::default();
        let mut seen = HashSet::new();
        for (slot, name) in ty.fields().enumerate() {
            prop_assert!(seen.insert(name.to_string()), "duplicate {}", name);
            if name.starts_with('_') {
                prop_assert_eq!(name, format!("_{}", slot));
            } else {
                prop_assert!(policy.check_field(name).is_ok());
                prop_assert_eq!(name, raw[slot].as_str());
            }
        }
    }

    #[test]
    fn positional_defaults_fill_the_tail(
        (fields, values) in type_and_values(),
        split in any::<prop::sample::Index>(),
    ) {
        let n = fields.len();
        let k = split.index(n + 1);
        let defaults: Vec<Value> = values[n - k..].to_vec();
        let ty: RecordType<Value> = make_record_type(
            "Rec",
            fields.clone(),
            FactoryOptions::new().defaults(Defaults::Positional(defaults)),
        )
        .unwrap();

        prop_assert_eq!(ty.required_count(), n - k);
        let rec = ty.new_record(values[..n - k].to_vec()).unwrap();
        prop_assert_eq!(rec.values(), values.as_slice());
    }

    #[test]
    fn row_encoding_round_trips((fields, values) in type_and_values()) {
        let ty = build(&fields);
        let rec: Record<Value> = ty.new_record(values).unwrap();
        let bytes = RowCodec::encode(&rec).unwrap();
        prop_assert_eq!(bytes.len(), RowCodec::encoded_size(&rec));
        let back = RowCodec::decode_exact(&ty, &bytes).unwrap();
        prop_assert_eq!(back, rec);
    }

    #[test]
    fn decoding_garbage_never_panics(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let ty = build(&["a".to_string(), "b".to_string()]);
        let _ = RowCodec::decode_exact(&ty, &data);
    }
}
