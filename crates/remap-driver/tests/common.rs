//! Shared header-building helpers for the integration tests.
#![allow(dead_code)]

use remap_common::AccessFlags;
use remap_driver::{ClassHeader, MemberHeader, MemberKind, UnitResult, VersionTag};

pub const PUBLIC: u32 = AccessFlags::PUBLIC.bits();
pub const PRIVATE: u32 = AccessFlags::PRIVATE.bits();
pub const STATIC: u32 = AccessFlags::STATIC.bits();
pub const BRIDGE_SYNTHETIC: u32 = AccessFlags::BRIDGE
    .union(AccessFlags::SYNTHETIC)
    .union(AccessFlags::PUBLIC)
    .bits();

pub struct HeaderBuilder {
    header: ClassHeader,
}

pub fn class(name: &str) -> HeaderBuilder {
    HeaderBuilder {
        header: ClassHeader {
            name: name.to_string(),
            super_name: Some(String::from("java/lang/Object")),
            interfaces: Vec::new(),
            access: PUBLIC,
            version: VersionTag::BASE,
            is_input: true,
            members: Vec::new(),
            tags: Vec::new(),
        },
    }
}

pub fn interface(name: &str) -> HeaderBuilder {
    let mut b = class(name);
    b.header.access = PUBLIC | AccessFlags::INTERFACE.bits() | AccessFlags::ABSTRACT.bits();
    b
}

#[allow(dead_code)]
impl HeaderBuilder {
    pub fn extends(mut self, name: &str) -> Self {
        self.header.super_name = Some(name.to_string());
        self
    }

    pub fn implements(mut self, name: &str) -> Self {
        self.header.interfaces.push(name.to_string());
        self
    }

    pub fn version(mut self, v: u16) -> Self {
        self.header.version = VersionTag(v);
        self
    }

    pub fn method(self, name: &str, desc: &str) -> Self {
        self.method_flags(name, desc, PUBLIC)
    }

    pub fn method_flags(mut self, name: &str, desc: &str, access: u32) -> Self {
        self.header.members.push(MemberHeader {
            kind: MemberKind::Method,
            name: name.to_string(),
            desc: desc.to_string(),
            access,
        });
        self
    }

    pub fn field(mut self, name: &str, desc: &str) -> Self {
        self.header.members.push(MemberHeader {
            kind: MemberKind::Field,
            name: name.to_string(),
            desc: desc.to_string(),
            access: PUBLIC,
        });
        self
    }

    pub fn build(self) -> ClassHeader {
        self.header
    }

    pub fn unit(self) -> UnitResult {
        Ok(self.header)
    }
}
