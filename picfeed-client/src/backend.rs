use async_trait::async_trait;

use crate::api::{Comment, FeedPage, NewComment, NewLike, PostDetail, PostId, RequestFailed};

/// The REST backend, as seen by the views
///
/// Futures are not required to be `Send`: in the browser they all run on the
/// single UI event loop.
#[async_trait(?Send)]
pub trait Backend {
    /// GET a feed page, either the feed entry point or a `next` cursor
    async fn fetch_feed(&self, url: &str) -> Result<FeedPage, RequestFailed>;

    async fn fetch_post(&self, url: &str) -> Result<PostDetail, RequestFailed>;

    async fn add_like(&self, postid: PostId) -> Result<NewLike, RequestFailed>;

    /// DELETE the like resource returned by `add_like`
    async fn remove_like(&self, url: &str) -> Result<(), RequestFailed>;

    async fn add_comment(
        &self,
        postid: PostId,
        comment: &NewComment,
    ) -> Result<Comment, RequestFailed>;

    async fn delete_comment(&self, url: &str) -> Result<(), RequestFailed>;
}
