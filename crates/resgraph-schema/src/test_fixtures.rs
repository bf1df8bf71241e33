//! Shared blog-domain fixtures for schema tests.

#![allow(dead_code)]

use crate::{
    container::{AttrMarker, RelationshipMarker, TypeContainer, TypeEntry},
    node::MemberKind,
    types::{Identifiable, LinkConfig, LinkTypes, TypeKey},
};

pub struct Author {
    pub id: i32,
    pub name: String,
}

impl Identifiable for Author {
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}

pub struct Article {
    pub id: i64,
    pub title: String,
}

impl Identifiable for Article {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

pub struct Tag {
    pub id: i32,
    pub name: String,
}

impl Identifiable for Tag {
    type Id = i32;

    fn id(&self) -> i32 {
        self.id
    }
}

/// Join row between articles and tags.
pub struct ArticleTag {
    pub article_id: i64,
    pub tag_id: i32,
}

/// Historical revision, reachable only through eager loading.
pub struct Revision {
    pub id: i32,
}

/// Stand-in for a runtime-generated lazy-loading proxy of [`Article`].
pub struct ArticleProxy {
    pub inner: Article,
}

pub fn author_entry() -> TypeEntry {
    TypeEntry::resource::<Author>()
        .with_member("name", MemberKind::Scalar)
        .with_member("articles", MemberKind::Collection(TypeKey::of::<Article>()))
        .with_attr(AttrMarker::new("name"))
        .with_relationship(RelationshipMarker::to_many("articles"))
}

pub fn article_entry() -> TypeEntry {
    TypeEntry::resource::<Article>()
        .with_member("title", MemberKind::Scalar)
        .with_member("author", MemberKind::Reference(TypeKey::of::<Author>()))
        .with_member(
            "article_tags",
            MemberKind::Collection(TypeKey::of::<ArticleTag>()),
        )
        .with_member("tags", MemberKind::Collection(TypeKey::of::<Tag>()))
        .with_member(
            "revisions",
            MemberKind::Collection(TypeKey::of::<Revision>()),
        )
        .with_attr(AttrMarker::new("title"))
        .with_relationship(RelationshipMarker::to_one("author"))
        .with_relationship(RelationshipMarker::to_many_through("tags", "article_tags"))
        .with_eager_load("revisions")
        .with_links(LinkConfig {
            top_level: LinkTypes::ALL,
            resource: LinkTypes::NOT_CONFIGURED,
            relationship: LinkTypes::NONE,
        })
}

pub fn tag_entry() -> TypeEntry {
    TypeEntry::resource::<Tag>()
        .with_member("name", MemberKind::Scalar)
        .with_attr(AttrMarker::new("name"))
}

pub fn article_tag_entry() -> TypeEntry {
    TypeEntry::new::<ArticleTag>()
        .with_member("article", MemberKind::Reference(TypeKey::of::<Article>()))
        .with_member("article_id", MemberKind::Scalar)
        .with_member("tag", MemberKind::Reference(TypeKey::of::<Tag>()))
        .with_member("tag_id", MemberKind::Scalar)
}

pub fn revision_entry() -> TypeEntry {
    TypeEntry::new::<Revision>()
}

pub fn proxy_entry() -> TypeEntry {
    TypeEntry::proxy::<ArticleProxy>(TypeKey::of::<Article>())
}

/// The full blog container: three resources, a join row, an eager-load
/// target and a proxy.
pub fn blog_container() -> TypeContainer {
    TypeContainer::new("blog")
        .register(author_entry())
        .register(article_entry())
        .register(tag_entry())
        .register(article_tag_entry())
        .register(revision_entry())
        .register(proxy_entry())
}
