//! Class-file access flags.
//!
//! The flag constants mirror the `access_flags` encoding of the class-file
//! format. Class, field and method flags share one bit space; which bits are
//! meaningful depends on where the flags came from.

use bitflags::bitflags;

bitflags! {
    /// Access and property flags of a class, field or method.
    ///
    /// Headers coming over the external interface carry raw `u32` flag words;
    /// convert with [`AccessFlags::from_bits_truncate`] so unknown bits from
    /// newer class-file versions are ignored rather than rejected.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        /// `synchronized` on methods, `super` on classes.
        const SYNCHRONIZED = 0x0020;
        /// `volatile` on fields, `bridge` on methods.
        const BRIDGE = 0x0040;
        /// `transient` on fields, `varargs` on methods.
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

impl AccessFlags {
    #[inline]
    pub fn is_public(self) -> bool {
        self.contains(AccessFlags::PUBLIC)
    }

    #[inline]
    pub fn is_private(self) -> bool {
        self.contains(AccessFlags::PRIVATE)
    }

    #[inline]
    pub fn is_static(self) -> bool {
        self.contains(AccessFlags::STATIC)
    }

    #[inline]
    pub fn is_final(self) -> bool {
        self.contains(AccessFlags::FINAL)
    }

    #[inline]
    pub fn is_interface(self) -> bool {
        self.contains(AccessFlags::INTERFACE)
    }

    #[inline]
    pub fn is_abstract(self) -> bool {
        self.contains(AccessFlags::ABSTRACT)
    }

    #[inline]
    pub fn is_synthetic(self) -> bool {
        self.contains(AccessFlags::SYNTHETIC)
    }

    /// Only meaningful for method flags.
    #[inline]
    pub fn is_bridge(self) -> bool {
        self.contains(AccessFlags::BRIDGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bits_round_trip() {
        let flags = AccessFlags::from_bits_truncate(0x1041);
        assert!(flags.is_public());
        assert!(flags.is_bridge());
        assert!(flags.is_synthetic());
        assert!(!flags.is_static());
    }
}
