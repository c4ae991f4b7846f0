//! Document model: paths, nodes, slot values and the options pair

pub mod node;
pub mod options;
pub mod path;
pub mod value;

pub use node::Node;
pub use options::{shallow_merge, BuilderOptions, SettingsBag};
pub use path::{NodePath, PathSegment};
pub use value::NodeValue;
