//! Structural equivalence engine: deep equality and stable hashing over
//! annotations, reflective types, and metadata types, usable as map/set
//! keys when the generator deduplicates declarations discovered via
//! multiple paths.
//!
//! Each relation has a matching hash; equal values hash equal. Mixing
//! order is part of that contract and must not change.

use crate::metadata::MetaType;
use crate::mirror::{AnnotationMirror, TypeMirror};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// accumulates a structural hash across nested calls so recursion does not
/// need to thread the outer running state explicitly
#[derive(Debug, Default)]
pub struct HashCollector {
    hasher: DefaultHasher,
}

impl HashCollector {
    pub fn new() -> HashCollector {
        HashCollector::default()
    }

    pub fn mix<T: Hash>(&mut self, value: T) {
        value.hash(&mut self.hasher);
    }

    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}

/// run a hashing closure against a fresh collector
pub fn collect_hash(collect: impl FnOnce(&mut HashCollector)) -> u64 {
    let mut collector = HashCollector::new();
    collect(&mut collector);
    collector.finish()
}

// pairwise comparison; differing lengths break equivalence immediately
fn eqv_iter<'a, T: 'a>(
    a: impl IntoIterator<Item = &'a T>,
    b: impl IntoIterator<Item = &'a T>,
    eq: impl Fn(&T, &T) -> bool,
) -> bool {
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (Some(x), Some(y)) => {
                if !eq(x, y) {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// annotation instances are equivalent iff their declared type is identical
/// and their values match pairwise in declaration order; the two views do
/// not guarantee argument-name alignment, so names are not consulted
pub fn annotation_eqv(a: &AnnotationMirror, b: &AnnotationMirror) -> bool {
    if a.type_name != b.type_name {
        return false;
    }
    eqv_iter(&a.values, &b.values, |x, y| x == y)
}

/// mixes the annotation type, then each value in order
pub fn annotation_hash(annotation: &AnnotationMirror) -> u64 {
    collect_hash(|collector| {
        collector.mix(&annotation.type_name);
        for value in &annotation.values {
            collector.mix(value);
        }
    })
}

/// shallow reflective-type equivalence: simple name of the declared
/// element plus recursive arguments. Used only where full resolution is
/// not available.
pub fn mirror_type_eqv(a: &TypeMirror, b: &TypeMirror) -> bool {
    match (a, b) {
        (
            TypeMirror::Declared {
                names: a_names,
                args: a_args,
                ..
            },
            TypeMirror::Declared {
                names: b_names,
                args: b_args,
                ..
            },
        ) => a_names.last() == b_names.last() && eqv_iter(a_args, b_args, mirror_type_eqv),
        (TypeMirror::Array(a_component), TypeMirror::Array(b_component)) => {
            mirror_type_eqv(a_component, b_component)
        }
        _ => a == b,
    }
}

pub fn mirror_type_hash(ty: &TypeMirror) -> u64 {
    collect_hash(|collector| mirror_type_hash_into(ty, collector))
}

/// only declared elements contribute: simple name, then arguments in
/// order. Everything else mixes nothing, matching the shallow precision
/// of the equivalence (collisions are fine, disagreement is not).
pub fn mirror_type_hash_into(ty: &TypeMirror, collector: &mut HashCollector) {
    if let TypeMirror::Declared { names, args, .. } = ty {
        if let Some(simple) = names.last() {
            collector.mix(simple);
        }
        for arg in args {
            mirror_type_hash_into(arg, collector);
        }
    }
}

/// deep metadata-type equivalence over alias-normalized (actual) types:
/// classifier, nullability, platform-ness, and arguments with variance.
/// Alias presence must agree; the alias shape itself is never compared.
pub fn meta_type_eqv(a: &MetaType, b: &MetaType) -> bool {
    if a.abbreviated.is_some() != b.abbreviated.is_some() {
        return false;
    }
    a.classifier == b.classifier
        && a.is_nullable() == b.is_nullable()
        && a.is_platform_type() == b.is_platform_type()
        && eqv_iter(&a.arguments, &b.arguments, |x, y| {
            x.variance == y.variance
                && match (&x.ty, &y.ty) {
                    (Some(x_ty), Some(y_ty)) => meta_type_eqv(x_ty, y_ty),
                    (None, None) => true,
                    _ => false,
                }
        })
}

pub fn meta_type_hash(ty: &MetaType) -> u64 {
    collect_hash(|collector| meta_type_hash_into(ty, collector))
}

/// mixing order is the contract: alias presence, classifier, nullability,
/// platform-ness, then per argument its variance and (for non-star
/// projections) the recursive type hash
pub fn meta_type_hash_into(ty: &MetaType, collector: &mut HashCollector) {
    collector.mix(ty.abbreviated.is_some());
    collector.mix(&ty.classifier);
    collector.mix(ty.is_nullable());
    collector.mix(ty.is_platform_type());
    for argument in &ty.arguments {
        collector.mix(argument.variance);
        if let Some(nested) = &argument.ty {
            meta_type_hash_into(nested, collector);
        }
    }
}
