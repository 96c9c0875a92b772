use crate::{
    api::{FeedPage, PostSummary, RequestFailed},
    Backend, Diagnostics, Generation, StaleGuard,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRequest {
    pub generation: Generation,
    pub url: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageResponse {
    pub generation: Generation,
    pub url: String,
    pub result: Result<FeedPage, RequestFailed>,
}

/// State of a feed: the post references accumulated so far and the
/// pagination cursor
///
/// The list only ever grows, in the order pages arrived.
#[derive(Debug, Default)]
pub struct FeedView {
    posts: Vec<PostSummary>,
    next: String,
    loading: bool,
    guard: StaleGuard,
}

impl FeedView {
    pub fn new() -> FeedView {
        FeedView::default()
    }

    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// Cursor of the next page, empty when there is none
    pub fn next_url(&self) -> &str {
        &self.next
    }

    pub fn has_more(&self) -> bool {
        !self.next.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch `url`, on mount or when the feed URL changed
    ///
    /// Whatever was still in flight is superseded.
    pub fn start(&mut self, url: &str) -> PageRequest {
        self.loading = true;
        PageRequest {
            generation: self.guard.begin(),
            url: url.to_string(),
        }
    }

    /// Fetch the page after the last one received
    ///
    /// Returns `None` when there are no more pages or when a page is already
    /// being fetched.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if self.loading || self.next.is_empty() {
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            generation: self.guard.current(),
            url: self.next.clone(),
        })
    }

    pub async fn fetch<B>(backend: &B, req: PageRequest) -> PageResponse
    where
        B: Backend + ?Sized,
    {
        let result = backend.fetch_feed(&req.url).await;
        PageResponse {
            generation: req.generation,
            url: req.url,
            result,
        }
    }

    /// Apply a fetched page, returning whether the state changed
    ///
    /// Responses to superseded requests are dropped. Failures are reported and
    /// leave the posts and cursor untouched.
    pub fn complete(&mut self, resp: PageResponse, diag: &dyn Diagnostics) -> bool {
        if !self.guard.is_current(resp.generation) {
            tracing::debug!(url = %resp.url, "dropping stale feed page");
            return false;
        }
        self.loading = false;
        match resp.result {
            Ok(page) => {
                tracing::debug!(url = %resp.url, num_posts = page.results.len(), "received feed page");
                self.posts.extend(page.results);
                self.next = page.next;
            }
            Err(err) => diag.report("failed fetching feed page", &err),
        }
        true
    }

    /// The feed is going away: nothing in flight may land anymore, and no
    /// further page gets requested
    pub fn teardown(&mut self) {
        self.guard.invalidate();
        self.loading = false;
        self.next.clear();
    }
}
