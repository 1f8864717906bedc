use serde::{Deserialize, Serialize};

/// A top-level item from the posts endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// A child item from the comments endpoint, tied to a post by `post_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(rename = "postId")]
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A post together with its comments, in comment-fetch order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Posts,
    Comments,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Posts => "posts",
            ResourceKind::Comments => "comments",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Loading,
    Populated(Vec<PostWithComments>),
    Empty,
    Failed,
}

impl RenderOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            RenderOutcome::Loading => OutcomeKind::Loading,
            RenderOutcome::Populated(posts) if posts.is_empty() => OutcomeKind::Empty,
            RenderOutcome::Populated(_) => OutcomeKind::Populated,
            RenderOutcome::Empty => OutcomeKind::Empty,
            RenderOutcome::Failed => OutcomeKind::Failed,
        }
    }
}

/// What ended up in the container, without the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Loading,
    Populated,
    Empty,
    Failed,
}
