//! cardex: an embeddable, schema-typed, in-memory record store with
//! secondary indexing and a small boolean query language.
//!
//! Client code defines a [`Schema`] (named, typed columns plus index
//! declarations), inserts records into a [`Collection`], and retrieves
//! record-id sets by evaluating [`Query`] trees against the registered
//! indexes: a prefix trie and an exact-match hash per declared column,
//! with an always-available table-scan fallback for everything else.
//!
//! ```
//! use cardex::{Collection, FieldType, IndexKind, Query, Schema, Value};
//!
//! let schema = Schema::new("people")
//!     .column("name", FieldType::Str)
//!     .column("age", FieldType::UInt)
//!     .index("name", IndexKind::Prefix);
//!
//! let mut people = Collection::new(schema)?;
//! people.insert(vec![Value::from("alice"), Value::UInt(30)])?;
//! people.insert(vec![Value::from("alan"), Value::UInt(41)])?;
//!
//! let hits = people.filter(&Query::prefix("name", "al"))?;
//! assert_eq!(hits.len(), 2);
//! # Ok::<(), cardex::Error>(())
//! ```

pub mod core;
pub mod index;
pub mod query;
pub mod schema;

pub use crate::core::collection::Collection;
pub use crate::core::error::{Error, Result};
pub use crate::core::ids::IdSet;
pub use crate::core::stats::{CollectionStats, IndexStats};
pub use crate::core::store::{CollectionHandle, Store};
pub use crate::core::types::{FieldType, Record, RecordId, Value};
pub use crate::query::{Atom, MatchKind, Query};
pub use crate::schema::{IndexKind, Schema};
