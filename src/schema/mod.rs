pub mod schema;

pub use schema::{ColumnDef, IndexKind, IndexSpec, Schema};
