//! Flag decoder: bitset-encoded boolean facts on metadata records.
//!
//! Each record kind gets its own small flag type exposing only the facts
//! meaningful to that kind. Raw bitsets decode with truncation, so
//! unrecognized bits evaluate to false instead of failing.

use crate::metadata::{
    MetaClass, MetaConstructor, MetaFunction, MetaProperty, MetaType, MetaValueParameter,
};
use crate::platform::PLATFORM_TYPE_ID;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassFlags: u32 {
        const ABSTRACT = 1 << 0;
        const INTERFACE = 1 << 1;
        const OBJECT = 1 << 2;
        const COMPANION_OBJECT = 1 << 3;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FunctionFlags: u32 {
        const ABSTRACT = 1 << 0;
        const PRIVATE = 1 << 1;
        const SUSPEND = 1 << 2;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PropertyFlags: u32 {
        const ABSTRACT = 1 << 0;
        const PRIVATE = 1 << 1;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ConstructorFlags: u32 {
        const SECONDARY = 1 << 0;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ValueParameterFlags: u32 {
        const DECLARES_DEFAULT = 1 << 0;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TypeFlags: u32 {
        const NULLABLE = 1 << 0;
    }
}

impl MetaClass {
    pub fn is_abstract(&self) -> bool {
        ClassFlags::from_bits_truncate(self.flags).contains(ClassFlags::ABSTRACT)
    }

    pub fn is_interface(&self) -> bool {
        ClassFlags::from_bits_truncate(self.flags).contains(ClassFlags::INTERFACE)
    }

    /// object and companion-object declarations collapse to the same
    /// singleton fact
    pub fn is_object(&self) -> bool {
        ClassFlags::from_bits_truncate(self.flags)
            .intersects(ClassFlags::OBJECT | ClassFlags::COMPANION_OBJECT)
    }
}

impl MetaFunction {
    pub fn is_abstract(&self) -> bool {
        FunctionFlags::from_bits_truncate(self.flags).contains(FunctionFlags::ABSTRACT)
    }

    pub fn is_private(&self) -> bool {
        FunctionFlags::from_bits_truncate(self.flags).contains(FunctionFlags::PRIVATE)
    }

    pub fn is_suspend(&self) -> bool {
        FunctionFlags::from_bits_truncate(self.flags).contains(FunctionFlags::SUSPEND)
    }
}

impl MetaProperty {
    pub fn is_abstract(&self) -> bool {
        PropertyFlags::from_bits_truncate(self.flags).contains(PropertyFlags::ABSTRACT)
    }

    pub fn is_private(&self) -> bool {
        PropertyFlags::from_bits_truncate(self.flags).contains(PropertyFlags::PRIVATE)
    }
}

impl MetaConstructor {
    pub fn is_primary(&self) -> bool {
        !ConstructorFlags::from_bits_truncate(self.flags).contains(ConstructorFlags::SECONDARY)
    }
}

impl MetaValueParameter {
    pub fn declares_default(&self) -> bool {
        ValueParameterFlags::from_bits_truncate(self.flags)
            .contains(ValueParameterFlags::DECLARES_DEFAULT)
    }
}

impl MetaType {
    pub fn is_nullable(&self) -> bool {
        TypeFlags::from_bits_truncate(self.flags).contains(TypeFlags::NULLABLE)
    }

    /// platform-inferred nullability, carried by a flexibility marker on the
    /// upper bound rather than a flag bit
    pub fn is_platform_type(&self) -> bool {
        self.flexible_upper_bound
            .as_ref()
            .is_some_and(|bound| bound.flexibility_id == PLATFORM_TYPE_ID)
    }
}
