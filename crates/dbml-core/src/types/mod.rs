mod column;
mod constraint;
mod default_value;
mod document;
mod enum_def;
mod group;
mod index;
mod project;
mod qualified_name;
mod reference;
mod table;
mod value;

pub use column::{Column, GeneratedColumn, IdentityGeneration, InlineReference};
pub use constraint::{Constraint, ConstraintKind, ExcludeElement};
pub use default_value::DefaultValue;
pub use document::Document;
pub use enum_def::{Enum, EnumValue};
pub use group::Group;
pub use index::{Index, IndexColumn, IndexType, SortOrder};
pub use project::Project;
pub use qualified_name::QualifiedName;
pub use reference::{Endpoint, EndpointColumns, ReferentialAction, Reference, RelationKind};
pub use table::{Table, TableElement, TablePartial};
pub use value::Value;
