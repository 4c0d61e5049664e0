//! Core data types for the EXL expression language.
//!
//! - [`Value`] / [`ValueList`]: runtime values with explicit list ownership
//! - [`Node`]: the parsed expression tree and its text renderings
//! - [`Context`] / [`Resolver`]: how a host supplies symbol values and
//!   custom functions, cached per node
//! - [`Span`]: byte ranges into the source text

pub mod node;
mod resolver;
mod span;
pub mod value;

pub use node::{Associativity, Block, BlockKind, Call, Node, NodeKind, OpKind, Operator, Symbol};
pub use resolver::{Context, Resolver, ResolverSlot, UnresolvedKind};
pub use span::Span;
pub use value::{
    ErrorKind, Heap, ListOwner, ListSlot, SharedList, Value, ValueError, ValueKind, ValueList,
    MAX_STRING_LEN,
};
