//! Paths of the REST resources, relative to the backend origin

use crate::{CommentId, PostId};

pub const FEED: &str = "/api/v1/posts/";

pub fn feed_page(size: usize, page: usize, postid_lte: PostId) -> String {
    format!("{FEED}?size={size}&page={page}&postid_lte={postid_lte}")
}

pub fn post(id: PostId) -> String {
    format!("/api/v1/posts/{id}/")
}

/// Collection to POST a like for post `id` to
pub fn likes(id: PostId) -> String {
    format!("/api/v1/likes/?postid={id}")
}

pub fn like(likeid: u64) -> String {
    format!("/api/v1/likes/{likeid}/")
}

/// Collection to POST a comment on post `id` to
pub fn comments(id: PostId) -> String {
    format!("/api/v1/comments/?postid={id}")
}

pub fn comment(id: CommentId) -> String {
    format!("/api/v1/comments/{id}/")
}

/// Human-facing page of a user
pub fn user_show(username: &str) -> String {
    format!("/users/{username}/")
}

/// Human-facing page of a post
pub fn post_show(id: PostId) -> String {
    format!("/posts/{id}/")
}
