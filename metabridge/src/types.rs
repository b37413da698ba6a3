//! The canonical output model: fully-resolved type references the
//! downstream generator consumes.

use std::fmt;
use std::hash::{Hash, Hasher};

/// dot-qualified package plus the enclosing path of simple names
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub package: String,
    pub names: Vec<String>,
}

impl TypeName {
    pub fn new(package: &str, name: &str) -> TypeName {
        TypeName {
            package: package.to_string(),
            names: vec![name.to_string()],
        }
    }

    /// parse a slash-qualified metadata name; nested simple names are
    /// dot-separated after the package (`kotlin/collections/Map.Entry`).
    /// A name with no package stays a single simple name.
    pub fn parse(name: &str) -> TypeName {
        match name.rfind('/') {
            None => TypeName {
                package: String::new(),
                names: vec![name.to_string()],
            },
            Some(split) => TypeName {
                package: name[..split].replace('/', "."),
                names: name[split + 1..].split('.').map(str::to_string).collect(),
            },
        }
    }

    pub fn simple_name(&self) -> &str {
        self.names.last().map_or("", String::as_str)
    }

    pub fn qualified(&self) -> String {
        let names = self.names.join(".");
        if self.package.is_empty() {
            names
        } else {
            format!("{}.{}", self.package, names)
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// shape of a resolved type: a plain named type, or one of the function
/// shapes (plain or continuation-passing)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Named {
        name: TypeName,
        args: Vec<TypeRef>,
    },
    Function {
        params: Vec<TypeRef>,
        ret: Box<TypeRef>,
        suspending: bool,
    },
}

/// a fully-resolved type reference. The shape always denotes the actual
/// (post-alias) type; `alias` retains the source's alias spelling for
/// display and takes no part in equality or hashing.
#[derive(Debug, Clone)]
pub struct TypeRef {
    pub shape: TypeShape,
    pub nullable: bool,
    pub alias: Option<TypeName>,
}

impl TypeRef {
    pub fn named(name: TypeName) -> TypeRef {
        TypeRef {
            shape: TypeShape::Named {
                name,
                args: Vec::new(),
            },
            nullable: false,
            alias: None,
        }
    }

    pub fn qualified_name(&self) -> Option<String> {
        match &self.shape {
            TypeShape::Named { name, .. } => Some(name.qualified()),
            TypeShape::Function { .. } => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.shape, TypeShape::Function { .. })
    }

    pub fn is_suspending(&self) -> bool {
        matches!(
            self.shape,
            TypeShape::Function {
                suspending: true,
                ..
            }
        )
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &TypeRef) -> bool {
        self.shape == other.shape && self.nullable == other.nullable
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape.hash(state);
        self.nullable.hash(state);
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.nullable { "?" } else { "" };

        // the alias spelling wins for display
        if let Some(alias) = &self.alias {
            return write!(f, "{}{suffix}", alias.qualified());
        }

        match &self.shape {
            TypeShape::Named { name, args } => {
                if args.is_empty() {
                    write!(f, "{}{suffix}", name.qualified())
                } else {
                    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                    write!(f, "{}<{}>{suffix}", name.qualified(), args.join(", "))
                }
            }
            TypeShape::Function {
                params,
                ret,
                suspending,
            } => {
                let params: Vec<String> = params.iter().map(|param| param.to_string()).collect();
                let prefix = if *suspending { "suspend " } else { "" };
                let body = format!("{prefix}({}) -> {ret}", params.join(", "));
                if self.nullable {
                    write!(f, "({body})?")
                } else {
                    f.write_str(&body)
                }
            }
        }
    }
}
