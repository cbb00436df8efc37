//! Fuzz testing for the row decoder.
//!
//! This fuzz target decodes arbitrary byte sequences into an arbitrary record
//! type to ensure malformed input is reported as an error, never a panic,
//! and that anything that does decode re-encodes to a decodable row.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use namedrec::codec::RowCodec;
use namedrec::{make_record_type, FactoryOptions, RecordType, Value};

#[derive(Debug, Arbitrary)]
struct CodecInput {
    fields: Vec<String>,
    strict: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: CodecInput| {
    if input.fields.len() > 64 {
        return;
    }

    let ty: RecordType<Value> =
        match make_record_type("Row", input.fields, FactoryOptions::new().rename(true)) {
            Ok(ty) => ty,
            Err(_) => return,
        };

    let mut offset = 0;
    if let Ok(rec) = RowCodec::decode(&ty, &input.data, &mut offset, input.strict) {
        assert!(offset <= input.data.len());
        let bytes = RowCodec::encode(&rec).expect("decoded record re-encodes");
        let back = RowCodec::decode_exact(&ty, &bytes).expect("re-encoded row decodes");
        assert_eq!(back, rec);
    }
});
