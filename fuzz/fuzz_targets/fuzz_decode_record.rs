// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use parcelkit::schema::{FieldType, SchemaBuilder, TypeId};
use parcelkit::{Codec, CodecConfig};
use std::sync::OnceLock;

fn codec() -> &'static (Codec, TypeId) {
    static CODEC: OnceLock<(Codec, TypeId)> = OnceLock::new();
    CODEC.get_or_init(|| {
        let codec = Codec::new().with_config(
            CodecConfig::default()
                .with_max_depth(32)
                .with_max_collection_len(1024)
                .with_max_blob_len(4096),
        );
        let schema = codec
            .schemas()
            .compile_schema(
                SchemaBuilder::new("FuzzNode")
                    .field("id", FieldType::Int64)
                    .nullable_field("label", FieldType::String)
                    .field("weight", FieldType::Float64)
                    .field("enabled", FieldType::Bool)
                    .field("blob", FieldType::Bytes)
                    .field("children", FieldType::list(FieldType::nested("FuzzNode")))
                    .nullable_field("next", FieldType::nested("FuzzNode"))
                    .field("attrs", FieldType::map(FieldType::String, FieldType::Int32))
                    .field("tags", FieldType::set(FieldType::Int32))
                    .build(),
            )
            .expect("fuzz schema compiles");
        let type_id = schema.type_id();
        (codec, type_id)
    })
}

fuzz_target!(|data: &[u8]| {
    let (codec, type_id) = codec();

    // Arbitrary bytes must decode or fail cleanly, never panic.
    let Ok(record) = codec.decode_record(*type_id, data) else {
        return;
    };

    // Anything that decodes must survive a re-encode.
    let container = codec.encode_record(&record).expect("decoded record re-encodes");
    let again = codec
        .decode_record(*type_id, container.as_bytes())
        .expect("re-encoded record decodes");
    assert_eq!(again, record);
});
