//! Metadata adapter: the façade the orchestrator asks, for a given
//! reflective declaration, "what does the richer metadata say about this".
//!
//! One bridge per top-level declaration, holding its decoded metadata unit
//! (or nothing). Declaration identities pair a mirror node with the
//! correlated metadata record on demand; metadata absence is a valid state
//! and every query degrades to a reflective-only answer.

use crate::metadata::{self, MetaClass, MetaConstructor, MetaFunction, MetaProperty, MetaUnit};
use crate::mirror::{ClassMirror, ExecutableMirror};
use crate::resolve::resolve_type_or_raw;
use crate::signature::Signature;
use crate::types::TypeRef;

pub struct MetadataBridge {
    unit: Option<MetaUnit>,
}

impl MetadataBridge {
    pub fn new(unit: Option<MetaUnit>) -> MetadataBridge {
        MetadataBridge { unit }
    }

    /// decode an attached metadata blob. Undecodable metadata degrades to
    /// "no metadata" so one bad declaration cannot block its siblings.
    pub fn from_header_bytes(bytes: Option<&[u8]>) -> MetadataBridge {
        let unit = bytes.and_then(|bytes| match metadata::decode_unit(bytes) {
            Ok(unit) => Some(unit),
            Err(err) => {
                log::warn!("discarding undecodable metadata: {err:#}");
                None
            }
        });
        MetadataBridge::new(unit)
    }

    pub fn has_metadata(&self) -> bool {
        self.unit.is_some()
    }

    pub fn unit(&self) -> Option<&MetaUnit> {
        self.unit.as_ref()
    }

    pub fn meta_class(&self) -> Option<&MetaClass> {
        self.unit.as_ref().and_then(MetaUnit::class)
    }

    /// find the metadata record whose canonical signature matches the
    /// reflective executable. A miss means "reflective-only declaration",
    /// not an error.
    pub fn correlate(&self, executable: &ExecutableMirror) -> Option<&MetaFunction> {
        let target = Signature::of_mirror(executable);
        let found = self.unit.as_ref()?.functions().iter().find(|function| {
            function
                .signature
                .as_ref()
                .is_some_and(|signature| Signature::of_meta(signature) == target)
        });
        if found.is_none() {
            log::trace!("no metadata record for {target}");
        }
        found
    }

    /// constructor records correlate the same way; reflective constructors
    /// carry the platform name `<init>`
    pub fn correlate_constructor(&self, executable: &ExecutableMirror) -> Option<&MetaConstructor> {
        let target = Signature::of_mirror(executable);
        self.meta_class()?.constructors.iter().find(|constructor| {
            constructor
                .signature
                .as_ref()
                .is_some_and(|signature| Signature::of_meta(signature) == target)
        })
    }

    /// property records have no platform descriptor; they correlate by name
    pub fn property(&self, name: &str) -> Option<&MetaProperty> {
        self.unit
            .as_ref()?
            .properties()
            .iter()
            .find(|property| property.name == name)
    }

    pub fn class_decl<'a>(&'a self, mirror: &'a ClassMirror) -> ClassDecl<'a> {
        ClassDecl {
            mirror,
            meta: self.meta_class(),
        }
    }

    pub fn function_decl<'a>(&'a self, mirror: &'a ExecutableMirror) -> FunctionDecl<'a> {
        FunctionDecl {
            meta: self.correlate(mirror),
            mirror,
        }
    }

    pub fn constructor_decl<'a>(&'a self, mirror: &'a ExecutableMirror) -> ConstructorDecl<'a> {
        ConstructorDecl {
            meta: self.correlate_constructor(mirror),
            mirror,
        }
    }
}

/// a class seen through both views; flag queries answer false without
/// metadata
pub struct ClassDecl<'a> {
    pub mirror: &'a ClassMirror,
    pub meta: Option<&'a MetaClass>,
}

impl ClassDecl<'_> {
    pub fn has_metadata(&self) -> bool {
        self.meta.is_some()
    }

    pub fn is_abstract(&self) -> bool {
        self.meta.is_some_and(|meta| meta.is_abstract())
    }

    pub fn is_interface(&self) -> bool {
        self.meta.is_some_and(|meta| meta.is_interface())
    }

    pub fn is_object(&self) -> bool {
        self.meta.is_some_and(|meta| meta.is_object())
    }
}

/// a function seen through both views. Types prefer metadata precision per
/// field and fall back to the mirror per field, never per declaration.
pub struct FunctionDecl<'a> {
    pub mirror: &'a ExecutableMirror,
    pub meta: Option<&'a MetaFunction>,
}

impl FunctionDecl<'_> {
    pub fn has_metadata(&self) -> bool {
        self.meta.is_some()
    }

    pub fn is_abstract(&self) -> bool {
        self.meta.is_some_and(|meta| meta.is_abstract())
    }

    pub fn is_private(&self) -> bool {
        self.meta.is_some_and(|meta| meta.is_private())
    }

    pub fn is_suspend(&self) -> bool {
        self.meta.is_some_and(|meta| meta.is_suspend())
    }

    pub fn parameter_has_default(&self, index: usize) -> bool {
        self.meta
            .and_then(|meta| meta.value_parameters.get(index))
            .is_some_and(|parameter| parameter.declares_default())
    }

    pub fn parameter_type(&self, index: usize) -> Option<TypeRef> {
        let raw = self.mirror.parameters.get(index)?;
        let meta = self
            .meta
            .and_then(|meta| meta.value_parameters.get(index))
            .map(|parameter| &parameter.ty);
        Some(resolve_type_or_raw(raw, meta))
    }

    pub fn return_type(&self) -> TypeRef {
        resolve_type_or_raw(
            &self.mirror.return_type,
            self.meta.map(|meta| &meta.return_type),
        )
    }
}

/// a constructor seen through both views; treated as primary when metadata
/// is absent, since only metadata can mark one secondary
pub struct ConstructorDecl<'a> {
    pub mirror: &'a ExecutableMirror,
    pub meta: Option<&'a MetaConstructor>,
}

impl ConstructorDecl<'_> {
    pub fn has_metadata(&self) -> bool {
        self.meta.is_some()
    }

    pub fn is_primary(&self) -> bool {
        self.meta.is_none_or(|meta| meta.is_primary())
    }

    pub fn parameter_has_default(&self, index: usize) -> bool {
        self.meta
            .and_then(|meta| meta.value_parameters.get(index))
            .is_some_and(|parameter| parameter.declares_default())
    }

    pub fn parameter_type(&self, index: usize) -> Option<TypeRef> {
        let raw = self.mirror.parameters.get(index)?;
        let meta = self
            .meta
            .and_then(|meta| meta.value_parameters.get(index))
            .map(|parameter| &parameter.ty);
        Some(resolve_type_or_raw(raw, meta))
    }
}
