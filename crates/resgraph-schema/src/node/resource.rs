use crate::{
    graph::GraphError,
    node::{AttrField, EagerLoad, Relationship},
    types::{LinkTypes, TypeKey},
};
use serde::Serialize;

///
/// ResourceType
///
/// The durable unit of metadata for one resource: identity, fields,
/// relationships, eager loads and link overrides. Built once during startup
/// and never mutated afterwards.
///

#[derive(Clone, Debug, Serialize)]
pub struct ResourceType {
    /// Name exposed to clients; unique across the graph.
    pub public_name: String,

    pub resource: TypeKey,
    pub identity: TypeKey,
    pub identity_member: &'static str,

    pub attributes: Vec<AttrField>,
    pub relationships: Vec<Relationship>,
    pub eager_loads: Vec<EagerLoad>,

    pub top_level_links: LinkTypes,
    pub resource_links: LinkTypes,
    pub relationship_links: LinkTypes,
}

///
/// FieldSelector
///
/// Member-selecting expression resolved against a resource's declared
/// fields: a single member, or a multi-member projection.
///

#[derive(Clone, Copy, Debug)]
pub enum FieldSelector<'a> {
    Member(&'a str),
    Projection(&'a [&'a str]),
}

///
/// ResourceField
///
/// A declared field: attribute or relationship.
///

#[derive(Clone, Copy, Debug)]
pub enum ResourceField<'a> {
    Attribute(&'a AttrField),
    Relationship(&'a Relationship),
}

impl<'a> ResourceField<'a> {
    #[must_use]
    pub const fn member(&self) -> &'static str {
        match self {
            Self::Attribute(attr) => attr.member,
            Self::Relationship(rel) => rel.member,
        }
    }

    /// Borrows from the underlying resource record, not from the wrapper.
    #[must_use]
    pub fn public_name(&self) -> &'a str {
        match *self {
            Self::Attribute(attr) => &attr.public_name,
            Self::Relationship(rel) => &rel.public_name,
        }
    }
}

impl ResourceType {
    /// All declared fields: attributes first, then relationships.
    pub fn all_fields(&self) -> impl Iterator<Item = ResourceField<'_>> {
        self.attributes
            .iter()
            .map(ResourceField::Attribute)
            .chain(self.relationships.iter().map(ResourceField::Relationship))
    }

    #[must_use]
    pub fn attr(&self, member: &str) -> Option<&AttrField> {
        self.attributes.iter().find(|a| a.member == member)
    }

    #[must_use]
    pub fn attr_by_public_name(&self, name: &str) -> Option<&AttrField> {
        self.attributes.iter().find(|a| a.public_name == name)
    }

    #[must_use]
    pub fn relationship(&self, member: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.member == member)
    }

    #[must_use]
    pub fn relationship_by_public_name(&self, name: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.public_name == name)
    }

    /// Resolve a selector against all declared fields, in projection order.
    ///
    /// An unresolvable member is a usage error, not a data error.
    pub fn fields(&self, selector: FieldSelector<'_>) -> Result<Vec<ResourceField<'_>>, GraphError> {
        self.select(selector, |member| {
            self.all_fields().find(|f| f.member() == member)
        })
    }

    /// Resolve a selector against attribute fields only.
    pub fn select_attributes(
        &self,
        selector: FieldSelector<'_>,
    ) -> Result<Vec<&AttrField>, GraphError> {
        self.select(selector, |member| self.attr(member))
    }

    /// Resolve a selector against relationships only.
    pub fn select_relationships(
        &self,
        selector: FieldSelector<'_>,
    ) -> Result<Vec<&Relationship>, GraphError> {
        self.select(selector, |member| self.relationship(member))
    }

    fn select<T>(
        &self,
        selector: FieldSelector<'_>,
        resolve: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>, GraphError> {
        let members: &[&str] = match selector {
            FieldSelector::Member(member) => &[member],
            FieldSelector::Projection(members) => members,
        };

        members
            .iter()
            .map(|member| {
                resolve(member).ok_or_else(|| GraphError::UnknownMember {
                    resource: self.public_name.clone(),
                    member: (*member).to_string(),
                })
            })
            .collect()
    }
}
