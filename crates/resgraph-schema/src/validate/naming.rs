use crate::{err, error::ErrorTree, node::ResourceType};
use std::collections::BTreeMap;

/// Public names must be unique across the graph, and field public names
/// unique within each resource.
pub(crate) fn validate_public_names(resources: &[ResourceType], errs: &mut ErrorTree) {
    let mut by_name: BTreeMap<&str, Vec<&ResourceType>> = BTreeMap::new();
    for resource in resources {
        by_name
            .entry(resource.public_name.as_str())
            .or_default()
            .push(resource);
    }

    for (name, owners) in &by_name {
        if owners.len() > 1 {
            let types = owners
                .iter()
                .map(|r| r.resource.name())
                .collect::<Vec<_>>()
                .join("', '");
            err!(
                errs,
                "public name '{name}' is claimed by multiple resource types: '{types}'"
            );
        }
    }

    for resource in resources {
        validate_field_names(resource, errs);
    }
}

fn validate_field_names(resource: &ResourceType, errs: &mut ErrorTree) {
    let mut seen: BTreeMap<&str, &'static str> = BTreeMap::new();

    for field in resource.all_fields() {
        if let Some(previous) = seen.insert(field.public_name(), field.member()) {
            err!(
                errs,
                "resource '{}' exposes public field name '{}' from both members '{previous}' and '{}'",
                resource.public_name,
                field.public_name(),
                field.member()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        build::{GraphOptions, ResourceGraphBuilder},
        test_fixtures::{self, Article, Author, Tag},
        types::TypeKey,
    };

    #[test]
    fn duplicate_public_names_fail_validation() {
        let container = test_fixtures::blog_container();
        let mut builder = ResourceGraphBuilder::new(GraphOptions::default());
        builder.add_container(&container);
        builder.add::<Author>().add::<Tag>();
        builder.add_with(TypeKey::of::<Article>(), None, Some("tags"));

        let err = builder
            .build()
            .expect_err("two resources under 'tags' should fail");
        assert!(
            err.to_string().contains("public name 'tags' is claimed"),
            "error should report the contested name"
        );
    }
}
