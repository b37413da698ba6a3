//! Type synthesizer: turns metadata types into fully-resolved references,
//! expanding aliases and recognizing the function-family shapes.

use crate::metadata::{MetaType, MetaTypeProjection};
use crate::mirror::TypeMirror;
use crate::platform::{CONTINUATION_MARKER, FUNCTION_FAMILY};
use crate::types::{TypeName, TypeRef, TypeShape};

/// resolve a metadata type into a reference.
///
/// Returns `None` when the classifier cannot be mapped (e.g. a bare type
/// parameter) or any nested argument fails; callers fall back to the
/// reflective view via [`resolve_type_or_raw`].
pub fn resolve_type(ty: &MetaType) -> Option<TypeRef> {
    if let Some(alias) = &ty.abbreviated {
        // the actual type wins; the alias spelling is retained for display
        // only. A failed actual resolution fails the whole type - the less
        // precise alias shape is never a substitute.
        let mut resolved = resolve_actual(ty)?;
        resolved.alias = alias.classifier.name().map(TypeName::parse);
        return Some(resolved);
    }
    resolve_actual(ty)
}

fn resolve_actual(ty: &MetaType) -> Option<TypeRef> {
    let shape = if is_function(ty) {
        if is_suspend_function(ty) {
            // the continuation argument wraps the real return type; the
            // trailing two arguments are calling-convention plumbing
            let split = ty.arguments.len() - 2;
            let params = resolve_all(&ty.arguments[..split])?;
            let continuation = ty.arguments[split].ty.as_deref()?;
            let ret = resolve_projection(continuation.arguments.first()?)?;
            TypeShape::Function {
                params,
                ret: Box::new(ret),
                suspending: true,
            }
        } else {
            let (ret, params) = ty.arguments.split_last()?;
            TypeShape::Function {
                params: resolve_all(params)?,
                ret: Box::new(resolve_projection(ret)?),
                suspending: false,
            }
        }
    } else {
        let name = TypeName::parse(ty.classifier.name()?);
        TypeShape::Named {
            name,
            args: resolve_all(&ty.arguments)?,
        }
    };

    Some(TypeRef {
        shape,
        nullable: ty.is_nullable(),
        alias: None,
    })
}

fn resolve_all(arguments: &[MetaTypeProjection]) -> Option<Vec<TypeRef>> {
    arguments.iter().map(resolve_projection).collect()
}

// star projections carry no type and are unresolvable positions
fn resolve_projection(argument: &MetaTypeProjection) -> Option<TypeRef> {
    resolve_type(argument.ty.as_deref()?)
}

pub(crate) fn is_function(ty: &MetaType) -> bool {
    ty.classifier
        .name()
        .is_some_and(|name| FUNCTION_FAMILY.is_match(name))
}

fn is_suspend_function(ty: &MetaType) -> bool {
    ty.arguments.len() >= 2
        && ty.arguments[ty.arguments.len() - 2]
            .ty
            .as_deref()
            .is_some_and(|argument| argument.classifier.name() == Some(CONTINUATION_MARKER))
}

/// resolve with metadata precision when available, otherwise degrade to the
/// reflective view. Always produces a reference.
pub fn resolve_type_or_raw(raw: &TypeMirror, meta: Option<&MetaType>) -> TypeRef {
    if let Some(meta) = meta {
        if let Some(resolved) = resolve_type(meta) {
            return resolved;
        }
        log::trace!("metadata type did not resolve, falling back to the mirror");
    }
    mirror_type_ref(raw)
}

/// lower-precision reference from the reflective view alone: erased
/// generics stay bare names and nothing is nullable
pub fn mirror_type_ref(raw: &TypeMirror) -> TypeRef {
    let shape = match raw {
        TypeMirror::Boolean => builtin("Boolean"),
        TypeMirror::Byte => builtin("Byte"),
        TypeMirror::Char => builtin("Char"),
        TypeMirror::Short => builtin("Short"),
        TypeMirror::Int => builtin("Int"),
        TypeMirror::Long => builtin("Long"),
        TypeMirror::Float => builtin("Float"),
        TypeMirror::Double => builtin("Double"),
        TypeMirror::Void => builtin("Unit"),
        TypeMirror::Array(component) => TypeShape::Named {
            name: TypeName::new("kotlin", "Array"),
            args: vec![mirror_type_ref(component)],
        },
        TypeMirror::Declared {
            package,
            names,
            args,
        } => TypeShape::Named {
            name: TypeName {
                package: package.clone(),
                names: names.clone(),
            },
            args: args.iter().map(mirror_type_ref).collect(),
        },
        TypeMirror::Variable(name) => TypeShape::Named {
            name: TypeName {
                package: String::new(),
                names: vec![name.clone()],
            },
            args: Vec::new(),
        },
        TypeMirror::Wildcard => builtin("Any"),
    };

    TypeRef {
        shape,
        nullable: false,
        alias: None,
    }
}

fn builtin(name: &str) -> TypeShape {
    TypeShape::Named {
        name: TypeName::new("kotlin", name),
        args: Vec::new(),
    }
}
