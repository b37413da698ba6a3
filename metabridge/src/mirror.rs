//! The reflective view: declarations as a generic platform frontend sees
//! them. Structural only - generics are erased, nullability and calling
//! conventions are invisible. The richer facts live in the metadata view
//! and are reconciled by the bridge.

use std::hash::{Hash, Hasher};

/// a type as observed through reflection
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMirror {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
    Array(Box<TypeMirror>),
    /// class or interface type. `names` is the enclosing path of simple
    /// names, outermost first, so nested types keep their spine.
    Declared {
        package: String,
        names: Vec<String>,
        args: Vec<TypeMirror>,
    },
    /// type variable, known only by its declared name
    Variable(String),
    Wildcard,
}

impl TypeMirror {
    pub fn declared(package: &str, name: &str) -> TypeMirror {
        TypeMirror::Declared {
            package: package.to_string(),
            names: vec![name.to_string()],
            args: Vec::new(),
        }
    }

    pub fn parameterized(package: &str, name: &str, args: Vec<TypeMirror>) -> TypeMirror {
        TypeMirror::Declared {
            package: package.to_string(),
            names: vec![name.to_string()],
            args,
        }
    }

    /// simple name of the underlying declared element, if any
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            TypeMirror::Declared { names, .. } => names.last().map(String::as_str),
            _ => None,
        }
    }
}

/// a function-like element: method, or constructor under the platform
/// name `<init>`
#[derive(Debug, Clone)]
pub struct ExecutableMirror {
    pub name: String,
    pub parameters: Vec<TypeMirror>,
    pub return_type: TypeMirror,
    pub annotations: Vec<AnnotationMirror>,
}

/// a class-like element
#[derive(Debug, Clone)]
pub struct ClassMirror {
    pub package: String,
    /// enclosing path of simple names, outermost first
    pub names: Vec<String>,
    pub annotations: Vec<AnnotationMirror>,
}

impl ClassMirror {
    pub fn new(package: &str, name: &str) -> ClassMirror {
        ClassMirror {
            package: package.to_string(),
            names: vec![name.to_string()],
            annotations: Vec::new(),
        }
    }

    /// the class viewed as a raw (argument-free) declared type
    pub fn type_mirror(&self) -> TypeMirror {
        TypeMirror::Declared {
            package: self.package.clone(),
            names: self.names.clone(),
            args: Vec::new(),
        }
    }
}

/// an annotation instance. values are kept in declaration order because the
/// two views do not guarantee name alignment for annotation arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMirror {
    /// dot-qualified name of the annotation type
    pub type_name: String,
    pub values: Vec<AnnotationValue>,
    /// dot-qualified names of the annotations present on the annotation
    /// type itself
    pub type_annotations: Vec<String>,
}

/// simple annotation argument value
#[derive(Debug, Clone)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    EnumConst(String),
    Type(String),
}

// floats compare and hash bitwise so equality stays consistent with hashing
impl PartialEq for AnnotationValue {
    fn eq(&self, other: &AnnotationValue) -> bool {
        match (self, other) {
            (AnnotationValue::Bool(a), AnnotationValue::Bool(b)) => a == b,
            (AnnotationValue::Int(a), AnnotationValue::Int(b)) => a == b,
            (AnnotationValue::Float(a), AnnotationValue::Float(b)) => a.to_bits() == b.to_bits(),
            (AnnotationValue::Str(a), AnnotationValue::Str(b)) => a == b,
            (AnnotationValue::EnumConst(a), AnnotationValue::EnumConst(b)) => a == b,
            (AnnotationValue::Type(a), AnnotationValue::Type(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AnnotationValue {}

impl Hash for AnnotationValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            AnnotationValue::Bool(v) => (0u8, v).hash(state),
            AnnotationValue::Int(v) => (1u8, v).hash(state),
            AnnotationValue::Float(v) => (2u8, v.to_bits()).hash(state),
            AnnotationValue::Str(v) => (3u8, v).hash(state),
            AnnotationValue::EnumConst(v) => (4u8, v).hash(state),
            AnnotationValue::Type(v) => (5u8, v).hash(state),
        }
    }
}

/// shared annotation queries for any annotated element
pub trait Annotated {
    fn annotations(&self) -> &[AnnotationMirror];

    fn has_annotation(&self, qualified_name: &str) -> bool {
        self.annotations()
            .iter()
            .any(|annotation| annotation.type_name == qualified_name)
    }

    /// find an annotation whose own declared type is annotated with
    /// `qualified_name` (scope-style meta-annotations)
    fn annotation_annotated_with(&self, qualified_name: &str) -> Option<&AnnotationMirror> {
        self.annotations().iter().find(|annotation| {
            annotation
                .type_annotations
                .iter()
                .any(|name| name == qualified_name)
        })
    }
}

impl Annotated for ClassMirror {
    fn annotations(&self) -> &[AnnotationMirror] {
        &self.annotations
    }
}

impl Annotated for ExecutableMirror {
    fn annotations(&self) -> &[AnnotationMirror] {
        &self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(type_name: &str, type_annotations: &[&str]) -> AnnotationMirror {
        AnnotationMirror {
            type_name: type_name.to_string(),
            values: Vec::new(),
            type_annotations: type_annotations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_has_annotation() {
        let mut class = ClassMirror::new("app", "Repo");
        class.annotations.push(annotation("me.inject.Component", &[]));

        assert!(class.has_annotation("me.inject.Component"));
        assert!(!class.has_annotation("me.inject.Provides"));
    }

    #[test]
    fn test_annotation_annotated_with() {
        let mut class = ClassMirror::new("app", "Repo");
        class
            .annotations
            .push(annotation("app.AppScope", &["me.inject.Scope"]));

        let found = class.annotation_annotated_with("me.inject.Scope");
        assert_eq!(found.map(|a| a.type_name.as_str()), Some("app.AppScope"));
        assert!(class.annotation_annotated_with("me.inject.Qualifier").is_none());
    }

    #[test]
    fn test_float_values_compare_bitwise() {
        let a = AnnotationValue::Float(f64::NAN);
        let b = AnnotationValue::Float(f64::NAN);
        assert_eq!(a, b);

        assert_ne!(AnnotationValue::Float(0.0), AnnotationValue::Float(-0.0));
    }

    #[test]
    fn test_nested_simple_name() {
        let inner = TypeMirror::Declared {
            package: "app".to_string(),
            names: vec!["Outer".to_string(), "Inner".to_string()],
            args: Vec::new(),
        };
        assert_eq!(inner.simple_name(), Some("Inner"));
        assert_eq!(TypeMirror::Int.simple_name(), None);
    }
}
