// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::cast_sign_loss)] // Test data conversions
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::too_many_lines)] // Example/test code
#![allow(clippy::items_after_statements)] // Test helpers
#![allow(clippy::needless_pass_by_value)] // Test functions

//! Malformed containers must fail with `CorruptData`, never be coerced.

mod common;

use common::{random_profile, sample_profile, Node, Point, Profile};
use parcelkit::schema::{FieldType, SchemaBuilder};
use parcelkit::{Codec, CodecConfig, CorruptData, Error, Parcelable};

fn corrupt(err: &Error) -> &CorruptData {
    match err {
        Error::CorruptData(inner) => inner,
        other => panic!("expected CorruptData, got {:?}", other),
    }
}

#[test]
fn test_truncation_by_one_byte_fails() {
    let codec = Codec::new();
    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..50 {
        let container = codec.encode(&random_profile(&mut rng)).expect("encode");
        let bytes = container.as_bytes();
        let err = codec
            .decode::<Profile>(&bytes[..bytes.len() - 1])
            .unwrap_err();
        assert!(err.is_corrupt_data(), "got {:?}", err);
    }
}

#[test]
fn test_every_proper_prefix_fails() {
    let codec = Codec::new();
    let container = codec.encode(&sample_profile()).expect("encode");
    let bytes = container.as_bytes();
    for len in 0..bytes.len() {
        let err = codec.decode::<Profile>(&bytes[..len]).unwrap_err();
        assert!(err.is_corrupt_data(), "prefix {} gave {:?}", len, err);
    }
}

#[test]
fn test_invalid_bool_byte() {
    let codec = Codec::new();
    let mut profile = sample_profile();
    profile.active = true;
    let container = codec.encode(&profile).expect("encode");
    let mut bytes = container.into_bytes();

    // name, nickname (present), age, score precede the flag.
    let name_len = 4 + profile.name.len();
    let nickname_len = 1 + 4 + profile.nickname.as_ref().map_or(0, String::len);
    let age_len = 1 + profile.age.map_or(0, |_| 4);
    let offset = name_len + nickname_len + age_len + 8;
    assert_eq!(bytes[offset], 1);
    bytes[offset] = 2;

    let err = codec.decode::<Profile>(&bytes).unwrap_err();
    assert_eq!(corrupt(&err), &CorruptData::InvalidBool { offset, byte: 2 });
}

#[test]
fn test_invalid_presence_byte() {
    let codec = Codec::new();
    let mut profile = sample_profile();
    profile.nickname = None;
    let mut bytes = codec.encode(&profile).expect("encode").into_bytes();
    let offset = 4 + profile.name.len();
    assert_eq!(bytes[offset], 0);
    bytes[offset] = 7;

    let err = codec.decode::<Profile>(&bytes).unwrap_err();
    assert_eq!(
        corrupt(&err),
        &CorruptData::InvalidPresence { offset, byte: 7 }
    );
}

#[test]
fn test_invalid_utf8() {
    let codec = Codec::new();
    codec
        .schemas()
        .compile_schema(
            SchemaBuilder::new("Label")
                .field("text", FieldType::String)
                .build(),
        )
        .expect("compile");
    let id = parcelkit::TypeId::from_type_name("Label");
    let err = codec
        .decode_record(id, &[2, 0, 0, 0, 0xC3, 0x28])
        .unwrap_err();
    assert_eq!(corrupt(&err), &CorruptData::InvalidUtf8 { offset: 0 });
}

#[test]
fn test_trailing_bytes_rejected() {
    let codec = Codec::new();
    let mut bytes = codec
        .encode(&Point { x: 3, y: -4 })
        .expect("encode")
        .into_bytes();
    bytes.push(0);
    let err = codec.decode::<Point>(&bytes).unwrap_err();
    assert_eq!(
        corrupt(&err),
        &CorruptData::TrailingBytes {
            offset: 8,
            remaining: 1,
        }
    );
}

#[test]
fn test_oversized_count_underruns_without_allocating() {
    let codec = Codec::new();
    codec.register::<Node>().expect("register");
    // value = 0, children = 1_000_000 with no bytes behind it.
    let mut bytes = vec![0, 0, 0, 0];
    bytes.extend_from_slice(&1_000_000u32.to_le_bytes());
    let err = codec.decode::<Node>(&bytes).unwrap_err();
    assert!(matches!(
        corrupt(&err),
        CorruptData::BufferUnderrun { offset: 8, .. }
    ));
}

#[test]
fn test_count_above_limit() {
    let codec = Codec::new().with_config(CodecConfig::default().with_max_collection_len(16));
    let mut bytes = vec![0, 0, 0, 0];
    bytes.extend_from_slice(&u32::MAX.to_le_bytes());
    let err = codec.decode::<Node>(&bytes).unwrap_err();
    assert_eq!(
        corrupt(&err),
        &CorruptData::LimitExceeded {
            what: "collection",
            len: u32::MAX as usize,
            max: 16,
        }
    );
}

#[test]
fn test_nesting_bomb_hits_depth_limit() {
    let codec = Codec::new();
    codec.register::<Node>().expect("register");
    // Each level: value 0, one child.
    let mut bytes = Vec::new();
    for _ in 0..1000 {
        bytes.extend_from_slice(&[0, 0, 0, 0, 1, 0, 0, 0]);
    }
    let err = codec.decode::<Node>(&bytes).unwrap_err();
    assert_eq!(corrupt(&err), &CorruptData::DepthExceeded { max: 128 });
}

#[test]
fn test_decode_with_wrong_schema_fails_or_mismatches() {
    let codec = Codec::new();
    let container = codec.encode(&Point { x: 1, y: 2 }).expect("encode");
    // A Point is too short to be a Profile.
    let err = codec.decode::<Profile>(container.as_bytes()).unwrap_err();
    assert!(err.is_corrupt_data());
    assert_eq!(Point::type_id(), parcelkit::TypeId::from_type_name("Point"));
}
