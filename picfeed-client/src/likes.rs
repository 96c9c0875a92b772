use crate::{
    api::{LikeState, PostId, RequestFailed},
    Backend,
};

pub fn count_label(num_likes: u64) -> String {
    match num_likes {
        1 => String::from("1 like"),
        n => format!("{n} likes"),
    }
}

pub fn button_label(likes: &LikeState) -> &'static str {
    match likes.logname_likes_this {
        true => "Unlike",
        false => "Like",
    }
}

/// Flip the viewer's like on `postid` and return the state to replace
/// `current` with
///
/// This is the only place where the like count and the like resource URL get
/// updated, whatever triggered the toggle. On failure nothing changes.
pub async fn toggle_like<B>(
    backend: &B,
    postid: PostId,
    current: &LikeState,
) -> Result<LikeState, RequestFailed>
where
    B: Backend + ?Sized,
{
    match current.logname_likes_this {
        true => {
            backend.remove_like(&current.url).await?;
            Ok(current.unliked())
        }
        false => {
            let like = backend.add_like(postid).await?;
            Ok(current.liked(like.url))
        }
    }
}
