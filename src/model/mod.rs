//! # Property Graph Model
//!
//! Clean DTOs for every value a Jolt stream can carry.
//! These types are what the codec encodes and what it hands back on decode.
//!
//! Design rule: NO wire types here.
//! This module is pure data with no I/O and no JSON.

pub mod node;
pub mod relationship;
pub mod path;
pub mod value;
pub mod property_map;
pub mod temporal;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, ReversedRelationship, RelId, Direction};
pub use path::{Path, PathElement};
pub use value::Value;
pub use property_map::{PropertyMap, property_map};
pub use temporal::{IsoDuration, OffsetTime, ZonedDateTime};
