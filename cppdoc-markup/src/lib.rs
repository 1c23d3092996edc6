//! Generic markup object model for documentation output
//!
//! A renderer-agnostic document tree: a closed set of block and phrasing
//! entity kinds, owned by an arena-backed [`MarkupTree`] addressed through
//! stable [`NodeId`] indices. Trees are assembled through [`TreeBuilder`]
//! objects, treated as immutable afterwards, deep-copied with `clone`, and
//! traversed pre-order, either with a closure ([`MarkupTree::visit`]) or a
//! [`Visitor`] implementation.
//!
//! Renderers never see this crate's internals; they consume either the
//! visitor walk or the normalized [`snapshot`] form.

pub mod block_id;
pub mod builder;
pub mod entity;
pub mod error;
pub mod snapshot;
pub mod tree;
pub mod visitor;

pub use block_id::BlockId;
pub use builder::TreeBuilder;
pub use entity::EntityKind;
pub use error::{MarkupError, MarkupResult};
pub use snapshot::{snapshot_tree, treeviz, MarkupSnapshot};
pub use tree::{MarkupTree, NodeId};
pub use visitor::{walk, Visitor};
