use crate::{
    api::{Comment, CommentId, LikeState, NewComment, PostDetail, PostId, RequestFailed, Time},
    Backend, Diagnostics, Generation, StaleGuard,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PostState {
    Loading,
    Loaded(PostDetail),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostRequest {
    pub generation: Generation,
    pub url: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PostResponse {
    pub generation: Generation,
    pub url: String,
    pub result: Result<PostDetail, RequestFailed>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentRequest {
    pub postid: PostId,
    pub comment: NewComment,
}

/// Remove the comment `id` from `comments`, keeping the others in order
pub fn remove_comment(comments: &mut Vec<Comment>, id: CommentId) -> Option<Comment> {
    let idx = comments.iter().position(|c| c.commentid == id)?;
    Some(comments.remove(idx))
}

/// State of one post view
///
/// The detail is replaced wholesale by each successful fetch. After that,
/// only its likes and comments change, through the dedicated handlers below.
#[derive(Debug)]
pub struct PostView {
    state: PostState,
    comment_draft: String,
    guard: StaleGuard,
}

impl Default for PostView {
    fn default() -> PostView {
        PostView {
            state: PostState::Loading,
            comment_draft: String::new(),
            guard: StaleGuard::new(),
        }
    }
}

impl PostView {
    pub fn new() -> PostView {
        PostView::default()
    }

    pub fn state(&self) -> &PostState {
        &self.state
    }

    pub fn detail(&self) -> Option<&PostDetail> {
        match &self.state {
            PostState::Loading => None,
            PostState::Loaded(d) => Some(d),
        }
    }

    pub fn postid(&self) -> Option<PostId> {
        self.detail().map(|d| d.postid)
    }

    pub fn likes(&self) -> Option<&LikeState> {
        self.detail().map(|d| &d.likes)
    }

    pub fn comments(&self) -> &[Comment] {
        match &self.state {
            PostState::Loading => &[],
            PostState::Loaded(d) => &d.comments,
        }
    }

    pub fn created_since(&self, now: Time) -> Option<String> {
        self.detail().map(|d| crate::humanize_since(d.created, now))
    }

    /// (Re)load the post at `url`
    ///
    /// The view goes back to loading and any earlier fetch is superseded.
    pub fn start(&mut self, url: &str) -> PostRequest {
        self.state = PostState::Loading;
        PostRequest {
            generation: self.guard.begin(),
            url: url.to_string(),
        }
    }

    pub async fn fetch<B>(backend: &B, req: PostRequest) -> PostResponse
    where
        B: Backend + ?Sized,
    {
        let result = backend.fetch_post(&req.url).await;
        PostResponse {
            generation: req.generation,
            url: req.url,
            result,
        }
    }

    pub fn complete(&mut self, resp: PostResponse, diag: &dyn Diagnostics) -> bool {
        if !self.guard.is_current(resp.generation) {
            tracing::debug!(url = %resp.url, "dropping stale post");
            return false;
        }
        match resp.result {
            Ok(detail) => {
                self.state = PostState::Loaded(detail);
                true
            }
            Err(err) => {
                diag.report("failed fetching post", &err);
                false
            }
        }
    }

    pub fn teardown(&mut self) {
        self.guard.invalidate();
    }

    /// Like state to toggle when the image gets double-clicked
    ///
    /// Double-clicking only ever likes: when the viewer already likes the
    /// post, or the post is not loaded yet, there is nothing to do.
    pub fn double_click_like(&self) -> Option<(PostId, LikeState)> {
        let d = self.detail()?;
        match d.likes.logname_likes_this {
            true => None,
            false => Some((d.postid, d.likes.clone())),
        }
    }

    /// Replace the like state of post `postid`, if it is still the one shown
    pub fn set_likes(&mut self, postid: PostId, likes: LikeState) -> bool {
        match &mut self.state {
            PostState::Loaded(d) if d.postid == postid => {
                d.likes = likes;
                true
            }
            _ => false,
        }
    }

    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    pub fn set_comment_draft(&mut self, text: String) {
        self.comment_draft = text;
    }

    /// The comment input stays disabled until the post identifier is known
    pub fn comment_input_enabled(&self) -> bool {
        self.postid().is_some()
    }

    /// Take the draft for submission
    ///
    /// The draft is cleared right away, before the request outcome is known.
    pub fn submit_comment(&mut self) -> Option<CommentRequest> {
        let postid = self.postid()?;
        let text = std::mem::take(&mut self.comment_draft);
        Some(CommentRequest {
            postid,
            comment: NewComment { text },
        })
    }

    pub async fn send_comment<B>(backend: &B, req: CommentRequest) -> Result<Comment, RequestFailed>
    where
        B: Backend + ?Sized,
    {
        backend.add_comment(req.postid, &req.comment).await
    }

    /// Append a comment the backend confirmed for post `postid`
    pub fn append_comment(&mut self, postid: PostId, comment: Comment) -> bool {
        match &mut self.state {
            PostState::Loaded(d) if d.postid == postid => {
                d.comments.push(comment);
                true
            }
            _ => false,
        }
    }

    /// Remove one of the viewer's comments from the view
    ///
    /// Returns the removed comment, whose `url` is then to be deleted on the
    /// backend. The removal does not wait for that request: if it fails, the
    /// view stays out of sync with the backend until the next reload.
    pub fn delete_comment(&mut self, id: CommentId) -> Option<Comment> {
        let d = match &mut self.state {
            PostState::Loading => return None,
            PostState::Loaded(d) => d,
        };
        if !d.comments.iter().any(|c| c.commentid == id && c.logname_owns_this) {
            return None;
        }
        remove_comment(&mut d.comments, id)
    }
}
