//! metabridge - reconcile two incomplete views of the same declaration:
//! the structural reflective view a platform frontend exposes, and the
//! compact binary metadata view carrying source-level facts the reflective
//! view cannot express (nullability, aliases, variance, suspend-ness).
//!
//! - declarations correlate across views by canonical signature; return
//!   types are excluded on purpose
//! - metadata precision wins per field, the reflective view is the fallback
//! - failures stay local to one declaration and never block siblings

pub mod bridge;
pub mod equiv;
pub mod flags;
pub mod metadata;
pub mod mirror;
pub mod platform;
pub mod resolve;
pub mod signature;
pub mod types;

pub use bridge::{ClassDecl, ConstructorDecl, FunctionDecl, MetadataBridge};
pub use equiv::{
    HashCollector, annotation_eqv, annotation_hash, collect_hash, meta_type_eqv, meta_type_hash,
    mirror_type_eqv, mirror_type_hash,
};
pub use resolve::{mirror_type_ref, resolve_type, resolve_type_or_raw};
pub use signature::Signature;
pub use types::{TypeName, TypeRef, TypeShape};
