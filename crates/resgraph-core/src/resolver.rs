//! Maps a runtime mutation operation to its correctly-typed handler.

use crate::{
    error::DispatchError,
    factory::GenericServiceFactory,
    operation::{Operation, OperationTarget},
    processor::{OperationProcessor, processor_service},
    scope::ServiceScope,
};
use resgraph_schema::node::ResourceType;
use std::{any::Any, sync::Arc};

///
/// OperationProcessorResolver
///
/// Switches on the operation kind to pick the matching processor
/// capability, resolves the operation's resource type from the graph, and
/// delegates to the generic service factory. A batch of heterogeneous
/// operations dispatches per item through this.
///

pub struct OperationProcessorResolver {
    factory: GenericServiceFactory,
}

impl OperationProcessorResolver {
    #[must_use]
    pub const fn new(factory: GenericServiceFactory) -> Self {
        Self { factory }
    }

    /// Resolve the handler for one operation.
    ///
    /// An unknown resource type is a client-facing error; a missing
    /// registration for a known resource is `Ok(None)` for the caller to
    /// convert into a fatal condition.
    pub fn resolve(
        &self,
        scope: &ServiceScope,
        operation: &Operation,
    ) -> Result<Option<Arc<dyn OperationProcessor>>, DispatchError> {
        let resource_type = self.resource_type_of(operation)?;

        Ok(self.factory.get::<Arc<dyn OperationProcessor>>(
            scope,
            processor_service(operation.kind),
            resource_type.resource,
        ))
    }

    // Resource lookup is miss-tolerant: both target forms originate from
    // untrusted request input. Proxy-typed instances are rejected outright;
    // the typed processor downcasts to the base resource type, which a proxy
    // instance can never satisfy.
    fn resource_type_of(&self, operation: &Operation) -> Result<&ResourceType, DispatchError> {
        let graph = self.factory.graph();

        match &operation.target {
            OperationTarget::TypeName(name) => graph
                .try_get(name)
                .ok_or_else(|| DispatchError::UnsupportedResourceType(name.clone())),
            OperationTarget::Instance { value, type_name } => {
                let instance: &dyn Any = value.as_ref();
                if graph.proxy_base(instance.type_id()).is_some() {
                    return Err(DispatchError::ProxiedTarget {
                        type_name: *type_name,
                    });
                }

                graph
                    .try_get_for_instance(instance)
                    .ok_or_else(|| DispatchError::UnsupportedResourceType((*type_name).to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        operation::OperationKind,
        processor::DeleteProcessor,
        registry::ServiceRegistry,
    };
    use resgraph_schema::{
        build::{GraphOptions, ResourceGraphBuilder},
        container::{TypeContainer, TypeEntry},
        graph::ResourceGraph,
        types::{Identifiable, TypeKey},
    };
    use std::sync::{
        Mutex,
        atomic::{AtomicI64, Ordering},
    };

    struct Article {
        id: i64,
    }

    impl Identifiable for Article {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }
    }

    struct ArticleProxy {
        inner: Article,
    }

    fn article_graph() -> Arc<ResourceGraph> {
        let container = TypeContainer::new("blog")
            .register(TypeEntry::resource::<Article>())
            .register(TypeEntry::proxy::<ArticleProxy>(TypeKey::of::<Article>()));

        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Article>();

        Arc::new(builder.build().expect("article graph should build"))
    }

    struct CountingDeleter {
        deleted: Arc<AtomicI64>,
    }

    impl DeleteProcessor<Article> for CountingDeleter {
        fn delete(&self, id: &i64, _scope: &ServiceScope) -> Result<(), DispatchError> {
            self.deleted.fetch_add(*id, Ordering::SeqCst);
            Ok(())
        }
    }

    fn delete_setup() -> (OperationProcessorResolver, ServiceScope, Arc<AtomicI64>) {
        let deleted = Arc::new(AtomicI64::new(0));
        let sink = Arc::clone(&deleted);

        let mut registry = ServiceRegistry::new();
        registry
            .register_delete_processor::<Article, _, _>(move |_scope| CountingDeleter {
                deleted: Arc::clone(&sink),
            })
            .expect("delete processor should register");

        let resolver = OperationProcessorResolver::new(GenericServiceFactory::new(article_graph()));
        let scope = ServiceScope::new(Arc::new(registry));

        (resolver, scope, deleted)
    }

    #[test]
    fn delete_on_a_known_resource_resolves_its_processor() {
        let (resolver, scope, deleted) = delete_setup();

        let operation = Operation::delete(Article { id: 12 });
        let processor = resolver
            .resolve(&scope, &operation)
            .expect("known resource should resolve")
            .expect("registered delete processor should be found");

        assert_eq!(processor.kind(), OperationKind::Delete);
        processor
            .process(&operation, &scope)
            .expect("delete should succeed");
        assert_eq!(deleted.load(Ordering::SeqCst), 12);
    }

    #[test]
    fn unknown_resource_type_is_a_client_facing_error() {
        let (resolver, scope, _deleted) = delete_setup();

        let operation = Operation::for_type_name(OperationKind::Delete, "unicorns");
        let err = resolver
            .resolve(&scope, &operation)
            .err()
            .expect("unknown type name should be rejected");

        assert!(matches!(err, DispatchError::UnsupportedResourceType(ref name) if name == "unicorns"));
        assert!(err.is_client_error());
    }

    #[test]
    fn proxy_typed_instance_target_is_rejected_before_dispatch() {
        let (resolver, scope, deleted) = delete_setup();

        let proxied = ArticleProxy {
            inner: Article { id: 5 },
        };
        assert_eq!(proxied.inner.id, 5);

        let err = resolver
            .resolve(&scope, &Operation::delete(proxied))
            .err()
            .expect("proxy instance should be rejected");

        assert!(matches!(err, DispatchError::ProxiedTarget { .. }));
        assert!(!err.is_client_error());
        assert_eq!(
            deleted.load(Ordering::SeqCst),
            0,
            "no processor should run for a proxy-typed target"
        );
    }

    #[test]
    fn unregistered_kind_resolves_to_none() {
        let (resolver, scope, _deleted) = delete_setup();

        let resolved = resolver
            .resolve(&scope, &Operation::create(Article { id: 3 }))
            .expect("known resource should not error");
        assert!(
            resolved.is_none(),
            "no create processor is registered, so resolution should miss"
        );
    }

    #[test]
    fn scope_local_collaborators_reach_the_factory() {
        // Factories see the resolving scope, so scope-local state (an
        // ambient transaction, a request id) stays isolated per request.
        let seen: Arc<Mutex<Vec<u64>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        struct ScopedDeleter;

        impl DeleteProcessor<Article> for ScopedDeleter {
            fn delete(&self, _id: &i64, _scope: &ServiceScope) -> Result<(), DispatchError> {
                Ok(())
            }
        }

        let mut registry = ServiceRegistry::new();
        registry
            .register_delete_processor::<Article, _, _>(move |scope| {
                if let Some(request) = scope.context::<u64>() {
                    sink.lock().expect("sink lock should not be poisoned").push(*request);
                }
                ScopedDeleter
            })
            .expect("delete processor should register");

        let resolver = OperationProcessorResolver::new(GenericServiceFactory::new(article_graph()));
        let registry = Arc::new(registry);

        let mut first = ServiceScope::new(Arc::clone(&registry));
        first.insert_context(7u64);
        let mut second = ServiceScope::new(registry);
        second.insert_context(9u64);

        let operation = Operation::delete(Article { id: 1 });
        resolver
            .resolve(&first, &operation)
            .expect("resolution should succeed")
            .expect("processor should be registered");
        resolver
            .resolve(&second, &operation)
            .expect("resolution should succeed")
            .expect("processor should be registered");

        assert_eq!(
            *seen.lock().expect("sink lock should not be poisoned"),
            vec![7, 9],
            "each resolution should observe its own scope's context"
        );
    }
}
