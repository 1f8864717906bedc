use crate::core::{Comment, Post, PostWithComments};
use std::collections::HashMap;

/// Attach to every post the comments whose `post_id` matches its `id`.
///
/// Output order and length follow `posts`; each post's comments keep the
/// order they had in `comments`. Comments pointing at no fetched post are
/// dropped.
pub fn join(posts: Vec<Post>, comments: Vec<Comment>) -> Vec<PostWithComments> {
    let total_comments = comments.len();

    let mut by_post: HashMap<i64, Vec<Comment>> = HashMap::new();
    for comment in comments {
        by_post.entry(comment.post_id).or_default().push(comment);
    }

    // 同一個 id 重複出現時，每個 post 都要拿到完整的留言
    let mut seen_counts: HashMap<i64, usize> = HashMap::new();
    for post in &posts {
        *seen_counts.entry(post.id).or_default() += 1;
    }

    let mut attached = 0;
    let joined: Vec<PostWithComments> = posts
        .into_iter()
        .map(|post| {
            let remaining = seen_counts.get_mut(&post.id).map(|count| {
                *count -= 1;
                *count
            });
            let comments = match remaining {
                Some(0) => by_post.remove(&post.id).unwrap_or_default(),
                _ => by_post.get(&post.id).cloned().unwrap_or_default(),
            };
            attached += comments.len();
            PostWithComments { post, comments }
        })
        .collect();

    if attached < total_comments {
        tracing::debug!(
            "Dropped {} comments without a matching post",
            total_comments - attached
        );
    }

    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64) -> Post {
        Post {
            id,
            user_id: 1,
            title: format!("post {}", id),
            body: format!("body {}", id),
        }
    }

    fn comment(id: i64, post_id: i64) -> Comment {
        Comment {
            id,
            post_id,
            name: format!("comment {}", id),
            email: "someone@example.com".to_string(),
            body: format!("comment body {}", id),
        }
    }

    fn comment_ids(enriched: &PostWithComments) -> Vec<i64> {
        enriched.comments.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_join_groups_comments_in_fetch_order() {
        let joined = join(
            vec![post(1), post(2)],
            vec![comment(10, 1), comment(11, 2), comment(12, 1)],
        );

        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].post.id, 1);
        assert_eq!(comment_ids(&joined[0]), vec![10, 12]);
        assert_eq!(joined[1].post.id, 2);
        assert_eq!(comment_ids(&joined[1]), vec![11]);
    }

    #[test]
    fn test_join_keeps_post_order_and_length() {
        let joined = join(vec![post(3), post(1), post(2)], vec![comment(1, 2)]);

        let ids: Vec<i64> = joined.iter().map(|p| p.post.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert!(joined[0].comments.is_empty());
        assert!(joined[1].comments.is_empty());
        assert_eq!(comment_ids(&joined[2]), vec![1]);
    }

    #[test]
    fn test_join_drops_orphan_comments() {
        let joined = join(vec![post(1)], vec![comment(5, 99), comment(6, 1)]);

        assert_eq!(comment_ids(&joined[0]), vec![6]);
    }

    #[test]
    fn test_join_empty_inputs() {
        assert!(join(vec![], vec![]).is_empty());
        assert!(join(vec![], vec![comment(1, 1)]).is_empty());
    }

    #[test]
    fn test_join_duplicate_post_ids_each_get_all_matches() {
        let joined = join(vec![post(1), post(1)], vec![comment(7, 1), comment(8, 1)]);

        assert_eq!(comment_ids(&joined[0]), vec![7, 8]);
        assert_eq!(comment_ids(&joined[1]), vec![7, 8]);
    }

    #[test]
    fn test_join_matches_linear_scan() {
        let posts: Vec<Post> = (1..=5).map(post).collect();
        let comments: Vec<Comment> = (0..40).map(|i| comment(100 + i, (i * 7) % 6)).collect();

        let joined = join(posts.clone(), comments.clone());

        for (enriched, original) in joined.iter().zip(&posts) {
            let expected: Vec<Comment> = comments
                .iter()
                .filter(|c| c.post_id == original.id)
                .cloned()
                .collect();
            assert_eq!(&enriched.post, original);
            assert_eq!(enriched.comments, expected);
        }
    }
}
