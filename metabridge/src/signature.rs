//! Canonical platform signatures for correlating function-like declarations
//! across the two views.
//!
//! A signature is the name plus the encoded parameter list, without the
//! return type. The platform does not allow overloads that differ only by
//! return type, and the two views cannot be expected to agree on its
//! representation, so leaving it out is both safe and necessary.

use crate::metadata::MetaSignature;
use crate::mirror::{ExecutableMirror, TypeMirror};
use crate::platform::OBJECT_DESCRIPTOR;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// encode a reflective executable. Parameter types are encoded
    /// recursively; type variables and wildcards erase to the object
    /// marker since the views cannot agree on generic substitution.
    pub fn of_mirror(executable: &ExecutableMirror) -> Signature {
        let mut out = String::new();
        out.push_str(&executable.name);
        out.push('(');
        for parameter in &executable.parameters {
            encode(parameter, &mut out);
        }
        out.push(')');
        Signature(out)
    }

    /// the metadata view ships a pre-encoded descriptor; keep everything
    /// through the closing parameter marker and drop the return suffix
    pub fn of_meta(signature: &MetaSignature) -> Signature {
        let end = signature.desc.rfind(')').map_or(0, |index| index + 1);
        Signature(format!("{}{}", signature.name, &signature.desc[..end]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn encode(ty: &TypeMirror, out: &mut String) {
    match ty {
        TypeMirror::Boolean => out.push('Z'),
        TypeMirror::Byte => out.push('B'),
        TypeMirror::Char => out.push('C'),
        TypeMirror::Short => out.push('S'),
        TypeMirror::Int => out.push('I'),
        TypeMirror::Long => out.push('J'),
        TypeMirror::Float => out.push('F'),
        TypeMirror::Double => out.push('D'),
        TypeMirror::Void => out.push('V'),
        TypeMirror::Array(component) => {
            out.push('[');
            encode(component, out);
        }
        TypeMirror::Declared { package, names, .. } => {
            out.push('L');
            if !package.is_empty() {
                out.push_str(&package.replace('.', "/"));
                out.push('/');
            }
            out.push_str(&names.join("$"));
            out.push(';');
        }
        TypeMirror::Variable(_) | TypeMirror::Wildcard => out.push_str(OBJECT_DESCRIPTOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executable(name: &str, parameters: Vec<TypeMirror>) -> ExecutableMirror {
        ExecutableMirror {
            name: name.to_string(),
            parameters,
            return_type: TypeMirror::Void,
            annotations: Vec::new(),
        }
    }

    #[test]
    fn test_primitive_encoding() {
        let signature = Signature::of_mirror(&executable(
            "mix",
            vec![
                TypeMirror::Boolean,
                TypeMirror::Byte,
                TypeMirror::Char,
                TypeMirror::Short,
                TypeMirror::Int,
                TypeMirror::Long,
                TypeMirror::Float,
                TypeMirror::Double,
            ],
        ));
        assert_eq!(signature.as_str(), "mix(ZBCSIJFD)");
    }

    #[test]
    fn test_array_recurses_with_prefix() {
        let signature = Signature::of_mirror(&executable(
            "fill",
            vec![TypeMirror::Array(Box::new(TypeMirror::Array(Box::new(
                TypeMirror::Int,
            ))))],
        ));
        assert_eq!(signature.as_str(), "fill([[I)");
    }

    #[test]
    fn test_declared_type_encoding() {
        let signature = Signature::of_mirror(&executable(
            "put",
            vec![TypeMirror::declared("java.lang", "String")],
        ));
        assert_eq!(signature.as_str(), "put(Ljava/lang/String;)");
    }

    #[test]
    fn test_nested_type_uses_inner_separator() {
        let nested = TypeMirror::Declared {
            package: "java.util".to_string(),
            names: vec!["Map".to_string(), "Entry".to_string()],
            args: Vec::new(),
        };
        let signature = Signature::of_mirror(&executable("take", vec![nested]));
        assert_eq!(signature.as_str(), "take(Ljava/util/Map$Entry;)");
    }

    #[test]
    fn test_unqualified_type_has_no_leading_slash() {
        let signature =
            Signature::of_mirror(&executable("use", vec![TypeMirror::declared("", "TopLevel")]));
        assert_eq!(signature.as_str(), "use(LTopLevel;)");
    }

    #[test]
    fn test_generics_erase_to_object() {
        let signature = Signature::of_mirror(&executable(
            "apply",
            vec![TypeMirror::Variable("T".to_string()), TypeMirror::Wildcard],
        ));
        assert_eq!(
            signature.as_str(),
            "apply(Ljava/lang/Object;Ljava/lang/Object;)"
        );
    }

    #[test]
    fn test_meta_descriptor_drops_return_suffix() {
        let signature =
            Signature::of_meta(&MetaSignature::new("get", "(ILjava/lang/String;)Lapp/Repo;"));
        assert_eq!(signature.as_str(), "get(ILjava/lang/String;)");
    }

    #[test]
    fn test_meta_descriptor_without_marker_keeps_name_only() {
        let signature = Signature::of_meta(&MetaSignature::new("broken", "I"));
        assert_eq!(signature.as_str(), "broken");
    }

    #[test]
    fn test_views_agree_on_same_declaration() {
        let mirror = Signature::of_mirror(&executable(
            "find",
            vec![TypeMirror::Int, TypeMirror::declared("java.lang", "String")],
        ));
        let meta = Signature::of_meta(&MetaSignature::new("find", "(ILjava/lang/String;)Lapp/Repo;"));
        assert_eq!(mirror, meta);
    }

    #[test]
    fn test_parameter_order_distinguishes_overloads() {
        let ab = Signature::of_mirror(&executable(
            "find",
            vec![TypeMirror::Int, TypeMirror::declared("java.lang", "String")],
        ));
        let ba = Signature::of_mirror(&executable(
            "find",
            vec![TypeMirror::declared("java.lang", "String"), TypeMirror::Int],
        ));
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_erased_overloads_are_indistinguishable() {
        // documented limitation: the target platform itself cannot tell
        // these apart post-erasure
        let of_t = Signature::of_mirror(&executable("of", vec![TypeMirror::Variable("T".to_string())]));
        let of_u = Signature::of_mirror(&executable("of", vec![TypeMirror::Variable("U".to_string())]));
        assert_eq!(of_t, of_u);
    }
}
