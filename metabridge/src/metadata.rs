//! The compact binary metadata view: source-level facts the reflective view
//! cannot express (nullability, aliases, variance, suspend-ness), attached
//! per top-level declaration as a versioned header plus a binary payload.
//!
//! Class names arrive slash-qualified with nested classes dot-separated
//! (`kotlin/collections/Map.Entry`).

use crate::flags::TypeFlags;
use crate::platform::PLATFORM_TYPE_ID;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// record kinds a metadata header may carry
pub const KIND_CLASS: u32 = 1;
pub const KIND_FILE_FACADE: u32 = 2;
pub const KIND_SYNTHETIC_CLASS: u32 = 3;
pub const KIND_MULTI_FILE_FACADE: u32 = 4;
pub const KIND_MULTI_FILE_PART: u32 = 5;

/// format version written by `encode_unit`; decoding rejects other majors
pub const FORMAT_VERSION: [u16; 3] = [2, 0, 0];

/// header in front of every metadata payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataHeader {
    pub kind: u32,
    pub version: [u16; 3],
    pub payload: Vec<u8>,
}

/// pre-encoded platform signature of a function-like record,
/// e.g. name `get` with desc `(I)Ljava/lang/String;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSignature {
    pub name: String,
    pub desc: String,
}

impl MetaSignature {
    pub fn new(name: &str, desc: &str) -> MetaSignature {
        MetaSignature {
            name: name.to_string(),
            desc: desc.to_string(),
        }
    }
}

/// declared variance of a type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variance {
    Invariant,
    In,
    Out,
}

/// what a type refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetaClassifier {
    /// slash-qualified class name
    Class(String),
    /// slash-qualified alias name, used when an alias appears as a raw
    /// classifier
    TypeAlias(String),
    /// positional reference to a type parameter; not mappable without the
    /// declaring scope
    TypeParameter(u32),
}

impl MetaClassifier {
    pub fn name(&self) -> Option<&str> {
        match self {
            MetaClassifier::Class(name) => Some(name),
            MetaClassifier::TypeAlias(name) => Some(name),
            MetaClassifier::TypeParameter(_) => None,
        }
    }
}

/// a type argument: variance plus the projected type, `None` for a star
/// projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTypeProjection {
    pub variance: Variance,
    pub ty: Option<Box<MetaType>>,
}

impl MetaTypeProjection {
    pub fn invariant(ty: MetaType) -> MetaTypeProjection {
        MetaTypeProjection {
            variance: Variance::Invariant,
            ty: Some(Box::new(ty)),
        }
    }

    pub fn with_variance(variance: Variance, ty: MetaType) -> MetaTypeProjection {
        MetaTypeProjection {
            variance,
            ty: Some(Box::new(ty)),
        }
    }

    pub fn star() -> MetaTypeProjection {
        MetaTypeProjection {
            variance: Variance::Invariant,
            ty: None,
        }
    }
}

/// upper bound of a flexible type; its flexibility id distinguishes
/// platform-inferred nullability from explicit nullability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexibleUpperBound {
    pub ty: MetaType,
    pub flexibility_id: String,
}

/// a type as the metadata view describes it. The type itself is always the
/// actual (post-alias) type; `abbreviated` holds the alias spelling the
/// source used, when there was one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaType {
    pub flags: u32,
    pub classifier: MetaClassifier,
    pub arguments: Vec<MetaTypeProjection>,
    pub abbreviated: Option<Box<MetaType>>,
    pub flexible_upper_bound: Option<Box<FlexibleUpperBound>>,
}

impl MetaType {
    pub fn class(name: &str) -> MetaType {
        MetaType {
            flags: 0,
            classifier: MetaClassifier::Class(name.to_string()),
            arguments: Vec::new(),
            abbreviated: None,
            flexible_upper_bound: None,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<MetaTypeProjection>) -> MetaType {
        self.arguments = arguments;
        self
    }

    pub fn nullable(mut self) -> MetaType {
        self.flags |= TypeFlags::NULLABLE.bits();
        self
    }

    /// attach the alias spelling the source used for this type
    pub fn abbreviated_as(mut self, alias: MetaType) -> MetaType {
        self.abbreviated = Some(Box::new(alias));
        self
    }

    /// mark the type as platform-inferred via its flexible upper bound
    pub fn platform(mut self, upper_bound: MetaType) -> MetaType {
        self.flexible_upper_bound = Some(Box::new(FlexibleUpperBound {
            ty: upper_bound,
            flexibility_id: PLATFORM_TYPE_ID.to_string(),
        }));
        self
    }

    /// dot-qualified package of the display name, preferring the alias
    /// spelling when one is present
    pub fn package_name(&self) -> String {
        if let Some(abbreviated) = &self.abbreviated {
            return abbreviated.package_name();
        }
        self.classifier.name().map_or_else(String::new, package_of)
    }

    /// simple (possibly dotted-nested) display name, preferring the alias
    /// spelling when one is present
    pub fn simple_name(&self) -> &str {
        if let Some(abbreviated) = &self.abbreviated {
            return abbreviated.simple_name();
        }
        self.classifier.name().map_or("", simple_of)
    }
}

fn package_of(name: &str) -> String {
    name.rfind('/')
        .map_or_else(String::new, |split| name[..split].replace('/', "."))
}

fn simple_of(name: &str) -> &str {
    &name[name.rfind('/').map_or(0, |split| split + 1)..]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaValueParameter {
    pub name: String,
    pub flags: u32,
    pub ty: MetaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaFunction {
    pub name: String,
    pub flags: u32,
    /// pre-encoded platform signature; absent for declarations the platform
    /// never materializes
    pub signature: Option<MetaSignature>,
    pub value_parameters: Vec<MetaValueParameter>,
    pub return_type: MetaType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaConstructor {
    pub flags: u32,
    pub signature: Option<MetaSignature>,
    pub value_parameters: Vec<MetaValueParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaProperty {
    pub name: String,
    pub flags: u32,
    pub ty: MetaType,
}

/// metadata record for a class-like declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaClass {
    /// slash-qualified class name
    pub name: String,
    pub flags: u32,
    pub constructors: Vec<MetaConstructor>,
    pub functions: Vec<MetaFunction>,
    pub properties: Vec<MetaProperty>,
}

/// metadata record for file-facade and multi-file-part declarations:
/// top-level functions and properties with no class around them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaPackage {
    pub functions: Vec<MetaFunction>,
    pub properties: Vec<MetaProperty>,
}

/// a decoded metadata unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetaUnit {
    Class(MetaClass),
    Package(MetaPackage),
}

impl MetaUnit {
    pub fn class(&self) -> Option<&MetaClass> {
        match self {
            MetaUnit::Class(class) => Some(class),
            MetaUnit::Package(_) => None,
        }
    }

    pub fn functions(&self) -> &[MetaFunction] {
        match self {
            MetaUnit::Class(class) => &class.functions,
            MetaUnit::Package(package) => &package.functions,
        }
    }

    pub fn properties(&self) -> &[MetaProperty] {
        match self {
            MetaUnit::Class(class) => &class.properties,
            MetaUnit::Package(package) => &package.properties,
        }
    }
}

/// decode an attached metadata blob into a unit.
///
/// errors here mean "this declaration has no usable metadata"; callers
/// degrade to reflective-only behavior and keep processing siblings.
pub fn decode_unit(bytes: &[u8]) -> Result<MetaUnit> {
    let header: MetadataHeader =
        bincode::deserialize(bytes).context("malformed metadata header")?;

    if header.version[0] != FORMAT_VERSION[0] {
        return Err(anyhow!(
            "unsupported metadata version {}.{}.{}",
            header.version[0],
            header.version[1],
            header.version[2]
        ));
    }

    log::trace!(
        "decode metadata unit, kind {} payload {} bytes",
        header.kind,
        header.payload.len()
    );

    let unit = match header.kind {
        KIND_CLASS => {
            let class: MetaClass =
                bincode::deserialize(&header.payload).context("malformed class record")?;
            MetaUnit::Class(class)
        }
        KIND_FILE_FACADE | KIND_MULTI_FILE_PART => {
            let package: MetaPackage =
                bincode::deserialize(&header.payload).context("malformed package record")?;
            MetaUnit::Package(package)
        }
        kind => return Err(anyhow!("metadata kind {kind} carries no declarations")),
    };

    log::debug!(
        "decoded metadata unit with {} functions, {} properties",
        unit.functions().len(),
        unit.properties().len()
    );
    Ok(unit)
}

/// encode a unit behind a current-version header
pub fn encode_unit(unit: &MetaUnit) -> Vec<u8> {
    let (kind, payload) = match unit {
        MetaUnit::Class(class) => (
            KIND_CLASS,
            bincode::serialize(class).expect("serialization cannot fail"),
        ),
        MetaUnit::Package(package) => (
            KIND_FILE_FACADE,
            bincode::serialize(package).expect("serialization cannot fail"),
        ),
    };
    let header = MetadataHeader {
        kind,
        version: FORMAT_VERSION,
        payload,
    };
    bincode::serialize(&header).expect("serialization cannot fail")
}
