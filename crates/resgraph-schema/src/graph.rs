//! Read-only lookup facade over the assembled resource-type set.

use crate::node::ResourceType;
use serde::{Serialize, Serializer};
use std::{
    any::{Any, TypeId},
    collections::HashMap,
};
use thiserror::Error as ThisError;

///
/// GraphError
///
/// Errors from throwing lookups. `UnknownMember` is a usage error (a
/// selector referenced a member that does not exist), not a data error.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum GraphError {
    #[error("resource '{0}' is not registered in the resource graph")]
    NameNotFound(String),

    #[error("type '{0}' is not registered in the resource graph")]
    TypeNotFound(&'static str),

    #[error("member '{member}' does not resolve to a field on resource '{resource}'")]
    UnknownMember { resource: String, member: String },
}

///
/// ResourceGraph
///
/// The immutable, process-wide registry of resource-type records. Built
/// once during startup, then shared read-only; concurrent reads need no
/// locking. Rebuilding (for tests) constructs an entirely new instance.
///

#[derive(Debug)]
pub struct ResourceGraph {
    resources: Vec<ResourceType>,
    by_name: HashMap<String, usize>,
    by_type: HashMap<TypeId, usize>,

    /// Lazy-loading proxy type -> declared base resource type.
    proxies: HashMap<TypeId, TypeId>,
}

impl ResourceGraph {
    pub(crate) fn assemble(
        resources: Vec<ResourceType>,
        proxies: HashMap<TypeId, TypeId>,
    ) -> Self {
        let by_name = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.public_name.clone(), i))
            .collect();
        let by_type = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.resource.id(), i))
            .collect();

        Self {
            resources,
            by_name,
            by_type,
            proxies,
        }
    }

    /// Lookup by public name; absence is a programmer error.
    pub fn get(&self, public_name: &str) -> Result<&ResourceType, GraphError> {
        self.try_get(public_name)
            .ok_or_else(|| GraphError::NameNotFound(public_name.to_string()))
    }

    /// Lookup by public name for untrusted input.
    #[must_use]
    pub fn try_get(&self, public_name: &str) -> Option<&ResourceType> {
        self.by_name.get(public_name).map(|&i| &self.resources[i])
    }

    /// Lookup by concrete type; absence is a programmer error.
    pub fn get_by_type<T: 'static>(&self) -> Result<&ResourceType, GraphError> {
        self.try_get_by_type_id(TypeId::of::<T>())
            .ok_or(GraphError::TypeNotFound(std::any::type_name::<T>()))
    }

    #[must_use]
    pub fn try_get_by_type<T: 'static>(&self) -> Option<&ResourceType> {
        self.try_get_by_type_id(TypeId::of::<T>())
    }

    /// Lookup by runtime type id, resolving registered lazy-loading proxies
    /// to their declared base resource type.
    #[must_use]
    pub fn try_get_by_type_id(&self, type_id: TypeId) -> Option<&ResourceType> {
        let resolved = self.proxies.get(&type_id).copied().unwrap_or(type_id);
        self.by_type.get(&resolved).map(|&i| &self.resources[i])
    }

    /// Lookup from a runtime instance whose concrete type may be a proxy.
    #[must_use]
    pub fn try_get_for_instance(&self, instance: &dyn Any) -> Option<&ResourceType> {
        self.try_get_by_type_id(instance.type_id())
    }

    /// Declared base resource type, when `type_id` is a registered
    /// lazy-loading proxy type.
    #[must_use]
    pub fn proxy_base(&self, type_id: TypeId) -> Option<TypeId> {
        self.proxies.get(&type_id).copied()
    }

    /// Resource types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResourceType> {
        self.resources.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Serialize for ResourceGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.resources.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{GraphOptions, ResourceGraphBuilder},
        node::FieldSelector,
        test_fixtures::{self, Article, ArticleProxy, Author, Tag},
    };

    fn blog_graph() -> ResourceGraph {
        let container = test_fixtures::blog_container();
        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Author>().add::<Article>().add::<Tag>();
        builder.build().expect("blog graph should build")
    }

    #[test]
    fn name_and_type_lookups_return_the_identical_record() {
        let graph = blog_graph();

        let by_name = graph.get("articles").expect("articles should resolve by name");
        let by_type = graph
            .get_by_type::<Article>()
            .expect("articles should resolve by type");

        assert!(
            std::ptr::eq(by_name, by_type),
            "both lookups should return the same record"
        );
    }

    #[test]
    fn throwing_and_try_lookups_disagree_only_in_failure_mode() {
        let graph = blog_graph();

        assert!(graph.try_get("missing").is_none());
        let err = graph.get("missing").expect_err("missing name should error");
        assert!(matches!(err, GraphError::NameNotFound(name) if name == "missing"));

        assert!(graph.try_get_by_type::<String>().is_none());
        assert!(graph.get_by_type::<String>().is_err());
    }

    #[test]
    fn proxy_instances_resolve_to_their_base_resource() {
        let graph = blog_graph();
        let proxied = ArticleProxy {
            inner: Article {
                id: 7,
                title: "proxied".to_string(),
            },
        };

        let resolved = graph
            .try_get_for_instance(&proxied)
            .expect("proxy instance should resolve to its base resource");
        assert_eq!(resolved.public_name, "articles");

        assert_eq!(
            graph.proxy_base(TypeId::of::<ArticleProxy>()),
            Some(TypeId::of::<Article>())
        );
        assert!(
            graph.proxy_base(TypeId::of::<Article>()).is_none(),
            "a base resource type is not itself a proxy"
        );
    }

    #[test]
    fn single_member_selector_returns_exactly_one_field() {
        let graph = blog_graph();
        let articles = graph.get("articles").expect("articles should be registered");

        let fields = articles
            .fields(FieldSelector::Member("title"))
            .expect("title should resolve");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].public_name(), "title");
    }

    #[test]
    fn projection_selector_preserves_projection_order() {
        let graph = blog_graph();
        let articles = graph.get("articles").expect("articles should be registered");

        let fields = articles
            .fields(FieldSelector::Projection(&["tags", "id", "title"]))
            .expect("projection should resolve");
        let members: Vec<_> = fields.iter().map(|f| f.member()).collect();
        assert_eq!(members, vec!["tags", "id", "title"]);
    }

    #[test]
    fn unresolvable_member_is_a_usage_error() {
        let graph = blog_graph();
        let articles = graph.get("articles").expect("articles should be registered");

        let err = articles
            .fields(FieldSelector::Member("nonexistent"))
            .expect_err("unknown member should be rejected");
        assert!(matches!(err, GraphError::UnknownMember { member, .. } if member == "nonexistent"));
    }

    #[test]
    fn graph_serializes_to_a_diagnostics_snapshot() {
        let graph = blog_graph();
        let snapshot = serde_json::to_value(&graph).expect("graph should serialize");

        let names: Vec<_> = snapshot
            .as_array()
            .expect("snapshot should be a resource array")
            .iter()
            .map(|r| r["public_name"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, vec!["authors", "articles", "tags"]);
    }
}
