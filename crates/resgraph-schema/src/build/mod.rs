//! Resource graph construction: turns registered descriptors into
//! [`ResourceType`] records and assembles the immutable graph.

pub mod eager_load;
pub mod relationship;

use crate::{
    Error, MAX_EAGER_LOAD_DEPTH, err,
    container::{TypeContainer, TypeEntry},
    error::ErrorTree,
    graph::ResourceGraph,
    naming::NamingPolicy,
    node::{AttrField, ResourceType},
    scan::ResourceDescriptor,
    types::{AttrCapabilities, Identifiable, TypeKey},
    validate::validate_graph,
};
use std::{
    any::TypeId,
    collections::{HashMap, HashSet},
};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("resource graph validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// GraphOptions
///
/// Explicit builder configuration; replaces any process-wide state. The
/// defaults follow JSON:API conventions: every capability allowed, camel
/// casing, pluralized type names.
///

#[derive(Debug)]
pub struct GraphOptions {
    pub default_capabilities: AttrCapabilities,

    /// Fallback identity type for resources added without one and lacking
    /// the identifiable capability.
    pub default_identity: Option<TypeKey>,

    pub naming: NamingPolicy,

    /// Depth bound for eager-load chains.
    pub eager_load_depth: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            default_capabilities: AttrCapabilities::ALL,
            default_identity: None,
            naming: NamingPolicy::default(),
            eager_load_depth: MAX_EAGER_LOAD_DEPTH,
        }
    }
}

///
/// NavigationResolver
///
/// Optional persistence-layer collaborator. Relationship discovery works
/// without one; only automatic inverse-navigation wiring is lost.
///

pub trait NavigationResolver {
    /// Identity member for a resource, when the store knows better than the
    /// registered default.
    fn identity_member(&self, resource: TypeKey) -> Option<&'static str> {
        let _ = resource;
        None
    }

    /// Inverse navigation member on the target side of a relationship.
    fn inverse_of(&self, owner: TypeKey, member: &'static str) -> Option<&'static str>;
}

///
/// PendingResource
///

#[derive(Clone, Debug)]
struct PendingResource {
    resource: TypeKey,
    identity: Option<TypeKey>,
    public_name: Option<String>,
}

///
/// ResourceGraphBuilder
///
/// Collects containers and resource registrations, then resolves and
/// validates everything in one `build` pass. All configuration errors are
/// aggregated and reported together.
///

pub struct ResourceGraphBuilder {
    options: GraphOptions,
    entries: HashMap<TypeId, TypeEntry>,
    pending: Vec<PendingResource>,
    seen: HashSet<TypeId>,
    navigation: Option<Box<dyn NavigationResolver>>,
}

impl ResourceGraphBuilder {
    #[must_use]
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
            pending: Vec::new(),
            seen: HashSet::new(),
            navigation: None,
        }
    }

    /// Make a container's entries available for shape and join resolution.
    pub fn add_container(&mut self, container: &TypeContainer) -> &mut Self {
        for entry in container.entries() {
            self.entries.entry(entry.key().id()).or_insert_with(|| entry.clone());
        }

        self
    }

    #[must_use]
    pub fn with_navigation_resolver(mut self, resolver: Box<dyn NavigationResolver>) -> Self {
        self.navigation = Some(resolver);
        self
    }

    /// Add a resource by type; identity and public name are derived.
    pub fn add<R: Identifiable>(&mut self) -> &mut Self {
        self.add_with(TypeKey::of::<R>(), None, None)
    }

    /// Add a resource from a scanned descriptor.
    pub fn add_descriptor(&mut self, descriptor: ResourceDescriptor) -> &mut Self {
        self.add_with(descriptor.resource, Some(descriptor.identity), None)
    }

    /// Add a resource with optional explicit identity type and public name.
    /// Re-adding a known type has no effect.
    pub fn add_with(
        &mut self,
        resource: TypeKey,
        identity: Option<TypeKey>,
        public_name: Option<&str>,
    ) -> &mut Self {
        if !self.seen.insert(resource.id()) {
            return self;
        }

        self.pending.push(PendingResource {
            resource,
            identity,
            public_name: public_name.map(str::to_string),
        });

        self
    }

    /// Resolve every pending resource and assemble the immutable graph.
    pub fn build(self) -> Result<ResourceGraph, Error> {
        let mut errs = ErrorTree::new();
        let mut resources = Vec::with_capacity(self.pending.len());

        for pending in &self.pending {
            if let Some(resource) = self.build_resource(pending, &mut errs) {
                resources.push(resource);
            }
        }

        let proxies = self.collect_proxies(&resources, &mut errs);
        validate_graph(&resources, &mut errs);

        errs.result().map_err(BuildError::Validation)?;

        log::info!("resource graph built: {} resource type(s)", resources.len());

        Ok(ResourceGraph::assemble(resources, proxies))
    }

    // Resolve one pending resource into a ResourceType record.
    fn build_resource(&self, pending: &PendingResource, errs: &mut ErrorTree) -> Option<ResourceType> {
        let Some(entry) = self.entries.get(&pending.resource.id()) else {
            err!(
                errs,
                "type '{}' was added to the resource graph but is not registered in any container",
                pending.resource
            );
            return None;
        };

        if let Some(base) = entry.proxy_of {
            err!(
                errs,
                "type '{}' is a lazy-loading proxy for '{base}' and cannot be added as a resource",
                pending.resource
            );
            return None;
        }

        let identity = self.resolve_identity(pending, entry, errs)?;
        let identity_member = self
            .navigation
            .as_deref()
            .and_then(|n| n.identity_member(entry.key()))
            .unwrap_or(entry.identity_member);

        let public_name = pending.public_name.clone().unwrap_or_else(|| {
            self.options
                .naming
                .public_type_name(pending.resource.name())
        });

        let attributes = self.build_attributes(entry, identity_member, errs);

        let relationships = entry
            .relationships
            .iter()
            .filter_map(|marker| {
                relationship::resolve(
                    entry,
                    marker,
                    &self.entries,
                    &self.options.naming,
                    self.navigation.as_deref(),
                    errs,
                )
            })
            .collect();

        let eager_loads =
            eager_load::resolve(entry, &self.entries, self.options.eager_load_depth, errs);

        let links = entry.links.unwrap_or_default();

        Some(ResourceType {
            public_name,
            resource: pending.resource,
            identity,
            identity_member,
            attributes,
            relationships,
            eager_loads,
            top_level_links: links.top_level,
            resource_links: links.resource,
            relationship_links: links.relationship,
        })
    }

    // Explicit identity wins but must agree with the declared capability;
    // otherwise fall back from capability to the configured default.
    fn resolve_identity(
        &self,
        pending: &PendingResource,
        entry: &TypeEntry,
        errs: &mut ErrorTree,
    ) -> Option<TypeKey> {
        let declared = entry.declared_identity();

        match (pending.identity, declared) {
            (Some(explicit), Some(declared)) if explicit != declared => {
                err!(
                    errs,
                    "identity type '{explicit}' supplied for '{}' does not match its declared identity type '{declared}'",
                    pending.resource
                );
                None
            }
            (Some(identity), _) | (None, Some(identity)) => Some(identity),
            (None, None) => {
                if self.options.default_identity.is_none() {
                    err!(
                        errs,
                        "cannot resolve an identity type for '{}': no identifiable capability and no default identity configured",
                        pending.resource
                    );
                }
                self.options.default_identity
            }
        }
    }

    // The identity member always leads the attribute list, marker or not.
    fn build_attributes(
        &self,
        entry: &TypeEntry,
        identity_member: &'static str,
        errs: &mut ErrorTree,
    ) -> Vec<AttrField> {
        if entry.shape.member(identity_member).is_none() {
            err!(
                errs,
                "type '{}' declares identity member '{identity_member}', but the member is not registered on its shape",
                entry.key()
            );
        }

        let naming = &self.options.naming;
        let mut attributes = vec![AttrField {
            member: identity_member,
            public_name: naming.public_member_name(identity_member),
            capabilities: self.options.default_capabilities,
            explicit_capabilities: false,
        }];

        for marker in &entry.attrs {
            if entry.shape.member(marker.member).is_none() {
                err!(
                    errs,
                    "type '{}' marks member '{}' as an attribute, but the member is not registered on its shape",
                    entry.key(),
                    marker.member
                );
                continue;
            }

            let field = AttrField {
                member: marker.member,
                public_name: marker
                    .public_name
                    .map_or_else(|| naming.public_member_name(marker.member), str::to_string),
                capabilities: marker
                    .capabilities
                    .unwrap_or(self.options.default_capabilities),
                explicit_capabilities: marker.capabilities.is_some(),
            };

            if marker.member == identity_member {
                // Explicit marker on the identity member refines the
                // implicit entry instead of duplicating it.
                attributes[0] = field;
            } else {
                attributes.push(field);
            }
        }

        attributes
    }

    // Proxy declarations become a proxy -> base lookup map; each base must
    // itself be a built resource.
    fn collect_proxies(
        &self,
        resources: &[ResourceType],
        errs: &mut ErrorTree,
    ) -> HashMap<TypeId, TypeId> {
        let mut proxies = HashMap::new();

        for entry in self.entries.values() {
            let Some(base) = entry.proxy_of else {
                continue;
            };

            if resources.iter().any(|r| r.resource == base) {
                proxies.insert(entry.key().id(), base.id());
            } else {
                err!(
                    errs,
                    "type '{}' is declared as a proxy for '{base}', which is not a registered resource",
                    entry.key()
                );
            }
        }

        proxies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        container::{RelationshipMarker, TypeContainer, TypeEntry},
        node::{MemberKind, RelationshipKind},
        test_fixtures::{self, Article, ArticleTag, Author, Tag},
        types::LinkTypes,
    };

    fn blog_builder() -> ResourceGraphBuilder {
        let container = test_fixtures::blog_container();
        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Author>().add::<Article>().add::<Tag>();
        builder
    }

    #[test]
    fn adding_the_same_resource_twice_is_idempotent() {
        let mut builder = blog_builder();
        builder.add::<Article>().add::<Article>();

        let graph = builder.build().expect("blog graph should build");
        assert_eq!(graph.len(), 3, "each resource should appear exactly once");
    }

    #[test]
    fn through_relationship_resolves_join_members_by_convention() {
        let graph = blog_builder().build().expect("blog graph should build");
        let articles = graph.get("articles").expect("articles should be registered");

        let tags = articles
            .relationship("tags")
            .expect("through relationship should be built");
        assert_eq!(tags.kind, RelationshipKind::ToManyThrough);
        assert_eq!(tags.target, TypeKey::of::<Tag>());

        let through = tags.through.as_ref().expect("join metadata should be present");
        assert_eq!(through.through_member, "article_tags");
        assert_eq!(through.through_type, TypeKey::of::<ArticleTag>());
        assert_eq!(through.left_member, "article");
        assert_eq!(through.left_id_member, "article_id");
        assert_eq!(through.right_member, "tag");
        assert_eq!(through.right_id_member, "tag_id");
    }

    #[test]
    fn missing_id_shadow_member_fails_the_build_naming_the_join_type() {
        let broken_join = TypeEntry::new::<ArticleTag>()
            .with_member("article", MemberKind::Reference(TypeKey::of::<Article>()))
            .with_member("article_id", MemberKind::Scalar)
            .with_member("tag", MemberKind::Reference(TypeKey::of::<Tag>()));

        let container = TypeContainer::new("blog")
            .register(test_fixtures::author_entry())
            .register(test_fixtures::article_entry())
            .register(test_fixtures::tag_entry())
            .register(broken_join)
            .register(test_fixtures::revision_entry());

        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Author>().add::<Article>().add::<Tag>();

        let err = builder.build().expect_err("missing tag_id should fail the build");
        let message = err.to_string();
        assert!(
            message.contains("ArticleTag") && message.contains("tag_id"),
            "error should name the join type and the expected member: {message}"
        );
    }

    #[test]
    fn non_collection_join_member_fails_the_build() {
        let article = TypeEntry::resource::<Article>()
            .with_member("article_tags", MemberKind::Reference(TypeKey::of::<ArticleTag>()))
            .with_member("tags", MemberKind::Collection(TypeKey::of::<Tag>()))
            .with_relationship(RelationshipMarker::to_many_through("tags", "article_tags"));

        let container = TypeContainer::new("blog")
            .register(article)
            .register(test_fixtures::tag_entry())
            .register(test_fixtures::article_tag_entry());

        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Article>().add::<Tag>();

        let err = builder
            .build()
            .expect_err("non-collection join member should fail the build");
        assert!(
            err.to_string().contains("article_tags"),
            "error should name the offending join member"
        );
    }

    #[test]
    fn identity_mismatch_is_a_configuration_error() {
        let container = test_fixtures::blog_container();
        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add_with(TypeKey::of::<Tag>(), Some(TypeKey::of::<String>()), None);

        let err = builder.build().expect_err("identity mismatch should fail");
        assert!(err.to_string().contains("does not match its declared identity"));
    }

    #[test]
    fn identity_member_missing_from_the_shape_fails_the_build() {
        let container = TypeContainer::new("blog")
            .register(test_fixtures::tag_entry().with_identity_member("key"));

        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Tag>();

        let err = builder
            .build()
            .expect_err("unregistered identity member should fail the build");
        assert!(
            err.to_string().contains("identity member 'key'"),
            "error should name the missing member"
        );
    }

    #[test]
    fn identity_member_leads_the_attribute_list() {
        let graph = blog_builder().build().expect("blog graph should build");
        let articles = graph.get("articles").expect("articles should be registered");

        assert_eq!(articles.attributes[0].member, "id");
        assert!(!articles.attributes[0].explicit_capabilities);
        assert!(articles.attr("title").is_some());
    }

    #[test]
    fn link_overrides_keep_the_not_configured_sentinel() {
        let graph = blog_builder().build().expect("blog graph should build");
        let articles = graph.get("articles").expect("articles should be registered");

        assert_eq!(articles.top_level_links, LinkTypes::ALL);
        assert_eq!(articles.resource_links, LinkTypes::NOT_CONFIGURED);
        assert_eq!(articles.relationship_links, LinkTypes::NONE);

        let tags = graph.get("tags").expect("tags should be registered");
        assert!(
            !tags.top_level_links.is_configured(),
            "types without an override should keep the sentinel everywhere"
        );
    }

    #[test]
    fn inverse_navigation_is_wired_when_a_resolver_is_configured() {
        struct StubResolver;

        impl NavigationResolver for StubResolver {
            fn inverse_of(&self, owner: TypeKey, member: &'static str) -> Option<&'static str> {
                (owner == TypeKey::of::<Article>() && member == "author").then_some("articles")
            }
        }

        let container = test_fixtures::blog_container();
        let mut builder = ResourceGraphBuilder::new(GraphOptions::default())
            .with_navigation_resolver(Box::new(StubResolver));
        builder.add_container(&container);
        builder.add::<Author>().add::<Article>().add::<Tag>();

        let graph = builder.build().expect("blog graph should build");
        let author = graph
            .get("articles")
            .expect("articles should be registered")
            .relationship("author")
            .expect("author relationship should be built");

        assert_eq!(author.inverse_member, Some("articles"));
    }
}
