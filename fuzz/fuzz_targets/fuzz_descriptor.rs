//! Fuzz testing for record type creation.
//!
//! This fuzz target feeds arbitrary type names, field lists and defaults to
//! `make_record_type` to ensure validation, rename and defaults resolution
//! never panic, and that rename always produces a usable type.

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use namedrec::{make_record_type, Defaults, FactoryOptions, FieldNames};

#[derive(Debug, Arbitrary)]
struct DescriptorInput {
    type_name: String,
    fields: FuzzFields,
    rename: bool,
    defaults: FuzzDefaults,
}

#[derive(Debug, Arbitrary)]
enum FuzzFields {
    Delimited(String),
    List(Vec<String>),
}

#[derive(Debug, Arbitrary)]
enum FuzzDefaults {
    None,
    Positional(Vec<i64>),
    Named(Vec<(String, i64)>),
}

impl From<FuzzFields> for FieldNames {
    fn from(fields: FuzzFields) -> Self {
        match fields {
            FuzzFields::Delimited(s) => FieldNames::Delimited(s),
            FuzzFields::List(names) => FieldNames::List(names),
        }
    }
}

impl From<FuzzDefaults> for Defaults<i64> {
    fn from(defaults: FuzzDefaults) -> Self {
        match defaults {
            FuzzDefaults::None => Defaults::None,
            FuzzDefaults::Positional(values) => Defaults::Positional(values),
            FuzzDefaults::Named(pairs) => Defaults::Named(pairs),
        }
    }
}

fuzz_target!(|input: DescriptorInput| {
    let options = FactoryOptions::new()
        .rename(input.rename)
        .defaults(input.defaults.into());

    let ty = match make_record_type("T", input.fields, options) {
        Ok(ty) => ty,
        Err(_) => return,
    };

    let mut seen = HashSet::new();
    for name in ty.fields() {
        assert!(seen.insert(name), "duplicate field {:?}", name);
    }
    assert!(ty.required_count() + ty.defaults_count() == ty.field_count());

    let required: Vec<i64> = (0..ty.required_count() as i64).collect();
    let rec = ty.new_record(required).expect("required values suffice");
    assert_eq!(ty.from_mapping(rec.asdict(), true).as_ref(), Ok(&rec));

    let _ = make_record_type::<i64>(&input.type_name, "a", FactoryOptions::new());
});
