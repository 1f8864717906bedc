use crate::core::{Container, Node, PostWithComments, RenderOutcome};
use crate::utils::error::Result;

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_TEXT: &str = "No posts found";
pub const FAILED_TEXT: &str = "Failed to load posts.";
pub const COMMENTS_HEADING: &str = "Comments:";

const POST_CLASSES: &[&str] = &[
    "relative",
    "px-4",
    "py-10",
    "bg-white",
    "shadow-lg",
    "sm:rounded-3xl",
    "sm:p-20",
    "bg-clip-padding",
    "bg-opacity-60",
    "border",
    "border-gray-200",
];

/// Replace the container's content with the nodes for `outcome`.
pub async fn render<T: Container>(container: &T, outcome: &RenderOutcome) -> Result<()> {
    let nodes = render_nodes(outcome);
    tracing::debug!("Rendering {:?} state", outcome.kind());
    container.replace_content(&nodes).await
}

pub fn render_nodes(outcome: &RenderOutcome) -> Vec<Node> {
    match outcome {
        RenderOutcome::Loading => vec![Node::element("p").with_text(LOADING_TEXT)],
        RenderOutcome::Populated(posts) if !posts.is_empty() => vec![post_list(posts)],
        RenderOutcome::Populated(_) | RenderOutcome::Empty => vec![Node::element("p")
            .with_classes(&["text-gray-500"])
            .with_text(EMPTY_TEXT)],
        RenderOutcome::Failed => vec![Node::element("p")
            .with_classes(&["text-red-500"])
            .with_text(FAILED_TEXT)],
    }
}

fn post_list(posts: &[PostWithComments]) -> Node {
    posts
        .iter()
        .map(post_item)
        .fold(Node::element("ul").with_classes(&["space-y-4"]), Node::with_child)
}

fn post_item(entry: &PostWithComments) -> Node {
    let item = Node::element("li")
        .with_classes(POST_CLASSES)
        .with_child(
            Node::element("h2")
                .with_classes(&["mb-2", "text-xl", "font-bold"])
                .with_text(entry.post.title.as_str()),
        )
        .with_child(
            Node::element("p")
                .with_classes(&["mb-4"])
                .with_text(entry.post.body.as_str()),
        );

    if entry.comments.is_empty() {
        return item;
    }

    let comment_list = entry.comments.iter().fold(
        Node::element("ul").with_classes(&["pl-5", "mt-4", "text-sm", "text-gray-600"]),
        |list, comment| list.with_child(Node::element("li").with_text(comment.body.as_str())),
    );

    item.with_child(
        Node::element("section")
            .with_child(
                Node::element("h3")
                    .with_classes(&["mt-4", "text-lg", "text-gray-800"])
                    .with_text(COMMENTS_HEADING),
            )
            .with_child(comment_list),
    )
}
