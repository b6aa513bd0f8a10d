// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared record types for integration tests.

#![allow(dead_code)]

use bytes::Bytes;
use parcelkit::schema::{FieldType, RecordDefinition, SchemaBuilder};
use parcelkit::value::{IntoValue, Record};
use parcelkit::{parcelable_value, Parcelable, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Parcelable for Point {
    const TYPE_NAME: &'static str = "Point";

    fn definition() -> RecordDefinition {
        SchemaBuilder::new(Self::TYPE_NAME)
            .field("x", FieldType::Int32)
            .field("y", FieldType::Int32)
            .build()
    }

    fn to_record(&self) -> Record {
        Record::new(Self::type_id(), vec![self.x.into_value(), self.y.into_value()])
    }

    fn from_record(record: Record) -> Result<Self> {
        let mut fields = record.into_fields();
        let point = Point {
            x: fields.next()?,
            y: fields.next()?,
        };
        fields.finish()?;
        Ok(point)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Node {
    pub value: i32,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(value: i32) -> Self {
        Node {
            value,
            children: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }
}

impl Parcelable for Node {
    const TYPE_NAME: &'static str = "Node";

    fn definition() -> RecordDefinition {
        SchemaBuilder::new(Self::TYPE_NAME)
            .field("value", FieldType::Int32)
            .field("children", FieldType::list(FieldType::record::<Node>()))
            .build()
    }

    fn to_record(&self) -> Record {
        Record::new(
            Self::type_id(),
            vec![self.value.into_value(), self.children.clone().into_value()],
        )
    }

    fn from_record(record: Record) -> Result<Self> {
        let mut fields = record.into_fields();
        let node = Node {
            value: fields.next()?,
            children: fields.next()?,
        };
        fields.finish()?;
        Ok(node)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub nickname: Option<String>,
    pub age: Option<i32>,
    pub score: f64,
    pub active: bool,
    pub avatar: Bytes,
    pub tags: BTreeSet<String>,
    pub home: Option<Point>,
    pub path: Vec<Point>,
    pub counters: HashMap<String, i64>,
    pub visits: BTreeMap<i64, Vec<String>>,
}

impl Parcelable for Profile {
    const TYPE_NAME: &'static str = "Profile";

    fn definition() -> RecordDefinition {
        SchemaBuilder::new(Self::TYPE_NAME)
            .field("name", FieldType::String)
            .nullable_field("nickname", FieldType::String)
            .nullable_field("age", FieldType::Int32)
            .field("score", FieldType::Float64)
            .field("active", FieldType::Bool)
            .field("avatar", FieldType::Bytes)
            .field("tags", FieldType::set(FieldType::String))
            .nullable_field("home", FieldType::record::<Point>())
            .field("path", FieldType::list(FieldType::record::<Point>()))
            .field("counters", FieldType::map(FieldType::String, FieldType::Int64))
            .field(
                "visits",
                FieldType::map(FieldType::Int64, FieldType::list(FieldType::String)),
            )
            .build()
    }

    fn to_record(&self) -> Record {
        Record::new(
            Self::type_id(),
            vec![
                self.name.clone().into_value(),
                self.nickname.clone().into_value(),
                self.age.into_value(),
                self.score.into_value(),
                self.active.into_value(),
                self.avatar.clone().into_value(),
                self.tags.clone().into_value(),
                self.home.clone().into_value(),
                self.path.clone().into_value(),
                self.counters.clone().into_value(),
                self.visits.clone().into_value(),
            ],
        )
    }

    fn from_record(record: Record) -> Result<Self> {
        let mut fields = record.into_fields();
        let profile = Profile {
            name: fields.next()?,
            nickname: fields.next()?,
            age: fields.next()?,
            score: fields.next()?,
            active: fields.next()?,
            avatar: fields.next()?,
            tags: fields.next()?,
            home: fields.next()?,
            path: fields.next()?,
            counters: fields.next()?,
            visits: fields.next()?,
        };
        fields.finish()?;
        Ok(profile)
    }
}

parcelable_value!(Point, Node);

pub fn random_string(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(0..12);
    (0..len).map(|_| rng.alphanumeric()).collect()
}

pub fn random_point(rng: &mut fastrand::Rng) -> Point {
    Point {
        x: rng.i32(..),
        y: rng.i32(..),
    }
}

pub fn random_node(rng: &mut fastrand::Rng, depth: usize) -> Node {
    let width = if depth == 0 { 0 } else { rng.usize(1..4) };
    Node {
        value: rng.i32(..),
        children: (0..width).map(|_| random_node(rng, depth - 1)).collect(),
    }
}

pub fn random_profile(rng: &mut fastrand::Rng) -> Profile {
    Profile {
        name: random_string(rng),
        nickname: rng.bool().then(|| random_string(rng)),
        age: rng.bool().then(|| rng.i32(0..120)),
        score: rng.f64() * 1000.0 - 500.0,
        active: rng.bool(),
        avatar: Bytes::from((0..rng.usize(0..32)).map(|_| rng.u8(..)).collect::<Vec<u8>>()),
        tags: (0..rng.usize(0..5)).map(|_| random_string(rng)).collect(),
        home: rng.bool().then(|| random_point(rng)),
        path: (0..rng.usize(0..6)).map(|_| random_point(rng)).collect(),
        counters: (0..rng.usize(0..4))
            .map(|_| (random_string(rng), rng.i64(..)))
            .collect(),
        visits: (0..rng.usize(0..3))
            .map(|_| {
                let names: Vec<String> = (0..rng.usize(0..3)).map(|_| random_string(rng)).collect();
                (rng.i64(..), names)
            })
            .collect(),
    }
}

pub fn sample_profile() -> Profile {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut profile = random_profile(&mut rng);
    profile.nickname = Some("ada".into());
    profile.home = Some(Point { x: 1, y: 2 });
    profile.tags.insert("admin".into());
    profile
}
