pub mod engine;
pub mod fetcher;
pub mod join;
pub mod render;

pub use crate::domain::model::{
    Comment, OutcomeKind, Post, PostWithComments, RenderOutcome, ResourceKind,
};
pub use crate::domain::node::Node;
pub use crate::domain::ports::{BackgroundRegistration, CollectionSource, ConfigProvider, Container};
pub use crate::utils::error::Result;
