//! Header-building helpers shared by the unit tests.

use crate::graph::{ClassGraph, GraphBuilder};
use crate::options::RemapOptions;
use crate::types::{ClassHeader, MemberHeader, MemberKind, VersionTag};
use remap_common::AccessFlags;

pub(crate) const PUBLIC: u32 = AccessFlags::PUBLIC.bits();
pub(crate) const PRIVATE: u32 = AccessFlags::PRIVATE.bits();
pub(crate) const STATIC: u32 = AccessFlags::STATIC.bits();
pub(crate) const ABSTRACT: u32 = AccessFlags::ABSTRACT.bits();
pub(crate) const BRIDGE_SYNTHETIC: u32 =
    AccessFlags::BRIDGE.union(AccessFlags::SYNTHETIC).union(AccessFlags::PUBLIC).bits();

pub(crate) struct HeaderBuilder {
    header: ClassHeader,
}

pub(crate) fn class(name: &str) -> HeaderBuilder {
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

pub(crate) fn interface(name: &str) -> HeaderBuilder {
    let mut b = class(name);
    b.header.access = PUBLIC | AccessFlags::INTERFACE.bits() | ABSTRACT;
    b
}

impl HeaderBuilder {
    pub(crate) fn extends(mut self, name: &str) -> Self {
        self.header.super_name = Some(name.to_string());
        self
    }

    pub(crate) fn implements(mut self, name: &str) -> Self {
        self.header.interfaces.push(name.to_string());
        self
    }

    pub(crate) fn version(mut self, v: u16) -> Self {
        self.header.version = VersionTag(v);
        self
    }

    pub(crate) fn classpath(mut self) -> Self {
        self.header.is_input = false;
        self
    }

    pub(crate) fn method(self, name: &str, desc: &str) -> Self {
        self.method_flags(name, desc, PUBLIC)
    }

    pub(crate) fn method_flags(mut self, name: &str, desc: &str, access: u32) -> Self {
        self.header.members.push(MemberHeader {
            kind: MemberKind::Method,
            name: name.to_string(),
            desc: desc.to_string(),
            access,
        });
        self
    }

    pub(crate) fn field(self, name: &str, desc: &str) -> Self {
        self.field_flags(name, desc, PUBLIC)
    }

    pub(crate) fn field_flags(mut self, name: &str, desc: &str, access: u32) -> Self {
        self.header.members.push(MemberHeader {
            kind: MemberKind::Field,
            name: name.to_string(),
            desc: desc.to_string(),
            access,
        });
        self
    }

    pub(crate) fn build(self) -> ClassHeader {
        self.header
    }
}

/// Destination name assigned to a declared member, via the base context.
pub(crate) fn member_dest(
    graph: &ClassGraph,
    owner: &str,
    kind: MemberKind,
    name: &str,
    desc: &str,
) -> Option<String> {
    let ctx = graph.base_context().expect("graph has a context");
    let interner = graph.interner();
    let class = ctx.get(interner.intern(owner))?;
    let key = graph.member_key(kind, interner.intern(name), interner.intern(desc));
    let member = graph.get_member(class, &key)?;
    graph
        .member(member)
        .dest_name()
        .map(|a| graph.resolve_atom(a))
}

pub(crate) fn method_dest(graph: &ClassGraph, owner: &str, name: &str, desc: &str) -> Option<String> {
    member_dest(graph, owner, MemberKind::Method, name, desc)
}

pub(crate) fn graph_of(headers: Vec<ClassHeader>) -> ClassGraph {
    graph_with(RemapOptions::default(), headers)
}

pub(crate) fn graph_with(options: RemapOptions, headers: Vec<ClassHeader>) -> ClassGraph {
    let builder = GraphBuilder::new(options);
    for header in headers {
        builder.add_class(header).expect("test header must be valid");
    }
    builder.freeze()
}
