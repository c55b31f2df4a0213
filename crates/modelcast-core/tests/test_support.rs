//! Shared test support utilities for integration tests
//!
//! Provides a small blog domain (users, posts, tags, categories), their
//! transformer definitions, and a resolver that records every request.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use modelcast_core::{
    fields_of, Container, Fields, Model, ModelRef, Related, Resolver, Result, Transformable,
    TransformerBuilder, TransformerDefinition, TransformerProvider, TransformerRegistry,
};
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

pub const USER_TRANSFORMER: &str = "UserTransformer";
pub const POST_TRANSFORMER: &str = "PostTransformer";
pub const TAG_TRANSFORMER: &str = "TagTransformer";

/// Fixed creation time so outputs are deterministic
pub fn created_at(offset: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(1_700_000_000 + offset, 0).expect("valid timestamp")
}

#[derive(Debug, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub posts: Vec<ModelRef>,
    #[serde(skip)]
    pub transformer: Option<&'static str>,
}

impl Model for User {
    fn model_key(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn relation(&self, name: &str) -> Option<Related> {
        match name {
            "posts" => Some(Related::Many(self.posts.clone())),
            _ => None,
        }
    }

    fn to_plain(&self) -> Result<Fields> {
        fields_of(self)
    }

    fn as_transformable(&self) -> Option<&dyn Transformable> {
        Some(self)
    }
}

impl Transformable for User {
    fn transformer_type(&self) -> Option<&str> {
        self.transformer
    }
}

#[derive(Debug, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub tags: Vec<ModelRef>,
    #[serde(skip)]
    pub author: Option<ModelRef>,
    #[serde(skip)]
    pub category: Option<ModelRef>,
}

impl Model for Post {
    fn model_key(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn relation(&self, name: &str) -> Option<Related> {
        match name {
            "tags" => Some(Related::Many(self.tags.clone())),
            "author" => Some(Related::from(self.author.clone())),
            "category" => Some(Related::from(self.category.clone())),
            _ => None,
        }
    }

    fn to_plain(&self) -> Result<Fields> {
        fields_of(self)
    }

    fn as_transformable(&self) -> Option<&dyn Transformable> {
        Some(self)
    }
}

impl Transformable for Post {
    fn transformer_type(&self) -> Option<&str> {
        Some(POST_TRANSFORMER)
    }
}

/// Tags declare no association; they are found through the registry
#[derive(Debug, Serialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

impl Model for Tag {
    fn model_key(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn to_plain(&self) -> Result<Fields> {
        fields_of(self)
    }

    fn as_transformable(&self) -> Option<&dyn Transformable> {
        Some(self)
    }
}

impl Transformable for Tag {}

/// Categories have no transformer at all
#[derive(Debug, Serialize)]
pub struct Category {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
}

impl Model for Category {
    fn to_plain(&self) -> Result<Fields> {
        fields_of(self)
    }
}

pub fn user_definition() -> TransformerDefinition {
    TransformerBuilder::<User>::new(USER_TRANSFORMER)
        .default(|user| {
            json!({
                "name": user.name,
                "email": user.email,
                "memberSince": user.created_at.timestamp(),
            })
        })
        .alternate("admin", |user| {
            json!({
                "name": user.name,
                "email": user.email,
                "memberSince": user.created_at.timestamp(),
                "isAdmin": user.id == 1,
            })
        })
        .build()
        .expect("user definition is valid")
}

pub fn post_definition() -> TransformerDefinition {
    TransformerBuilder::<Post>::new(POST_TRANSFORMER)
        .default(|post| {
            json!({
                "title": post.title,
                "body": post.body,
                "created": post.created_at.timestamp(),
            })
        })
        .build()
        .expect("post definition is valid")
}

pub fn tag_definition() -> TransformerDefinition {
    TransformerBuilder::<Tag>::new(TAG_TRANSFORMER)
        .default(|tag| json!({ "name": tag.name }))
        .build()
        .expect("tag definition is valid")
}

pub fn provider() -> TransformerProvider {
    TransformerProvider::new()
        .definitions([user_definition(), post_definition(), tag_definition()])
        .expect("definitions are distinct")
}

/// Registry knowing only tags
pub fn registry() -> TransformerRegistry {
    TransformerRegistry::from_entries([(std::any::type_name::<Tag>(), TAG_TRANSFORMER)])
        .expect("registry is valid")
}

/// Container with every blog transformer bound
pub fn container() -> Container {
    let mut container = Container::new();
    provider()
        .register(&registry(), &mut container)
        .expect("registration succeeds");
    container
}

/// Resolver that records every type it is asked to make
#[derive(Debug, Default)]
pub struct RecordingResolver {
    inner: Container,
    requests: RefCell<Vec<String>>,
}

impl RecordingResolver {
    pub fn new(inner: Container) -> Self {
        Self {
            inner,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Resolver for RecordingResolver {
    fn make(&self, type_name: &str) -> Result<Box<dyn Any>> {
        self.requests.borrow_mut().push(type_name.to_string());
        self.inner.make(type_name)
    }

    fn has(&self, type_name: &str) -> bool {
        self.inner.has(type_name)
    }
}

pub fn make_user(id: u64) -> User {
    User {
        id,
        name: format!("User {}", id),
        email: format!("user{}@example.com", id),
        created_at: created_at(id as i64),
        posts: Vec::new(),
        transformer: Some(USER_TRANSFORMER),
    }
}

pub fn make_users(count: u64) -> Vec<ModelRef> {
    (1..=count).map(|id| Rc::new(make_user(id)) as ModelRef).collect()
}

pub fn make_tags(count: u64, first_id: u64) -> Vec<ModelRef> {
    (first_id..first_id + count)
        .map(|id| {
            Rc::new(Tag {
                id,
                name: format!("tag{}", id),
            }) as ModelRef
        })
        .collect()
}

pub fn make_post(id: u64, tags: Vec<ModelRef>) -> Post {
    Post {
        id,
        title: format!("Post {}", id),
        body: format!("Body of post {}", id),
        created_at: created_at(100 + id as i64),
        tags,
        author: None,
        category: None,
    }
}

/// A user with 3 posts, each carrying 4 tags
pub fn user_with_posts() -> User {
    let mut user = make_user(1);
    user.posts = (1..=3)
        .map(|id| Rc::new(make_post(id, make_tags(4, id * 10))) as ModelRef)
        .collect();
    user
}

/// A user whose posts point back at (a copy of) the same user
pub fn user_with_cyclic_posts() -> User {
    let mut user = make_user(1);
    user.posts = (1..=2)
        .map(|id| {
            let mut post = make_post(id, Vec::new());
            post.author = Some(Rc::new(make_user(1)));
            Rc::new(post) as ModelRef
        })
        .collect();
    user
}
