//! Editors over document slots
//!
//! - [`node`]: mount a kind (strip, discriminant, defaults) and edit its fields
//! - [`fields`]: leaf field editors and their component-local state
//! - [`collection`]: ordered child collections with row keys
//! - [`selector`]: the kind dropdown of a polymorphic slot

pub mod collection;
pub mod fields;
pub mod node;
pub mod selector;

pub use collection::RowKeys;
pub use fields::{
    ChoiceField, DateTimeInput, DateTimeValue, FieldEdit, IntervalBound, JsonField, KeyValueMapField,
    MultiValueField, SelectOption,
};
pub use node::mount;
pub use selector::{KindSelector, Selection};
