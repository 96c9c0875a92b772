use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
};

use async_trait::async_trait;
use picfeed_client::{
    api::{
        endpoints, Comment, CommentId, FeedPage, LikeState, Method, NewComment, NewLike,
        PostDetail, PostId, PostSummary, RequestFailed, StatusCode, Time,
    },
    Backend, Diagnostics,
};

const DEFAULT_PAGE_SIZE: usize = 10;

/// In-memory stand-in for the REST backend
///
/// Every request is logged before being answered, so tests can check exactly
/// what went over the wire.
pub struct MockServer(RefCell<State>);

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

#[derive(Debug)]
struct State {
    logname: String,
    users: BTreeMap<String, DbUser>,
    posts: BTreeMap<PostId, DbPost>,
    likes: BTreeMap<u64, DbLike>,
    comments: BTreeMap<CommentId, DbComment>,
    next_id: u64,
    page_size: usize,
    fail_next: Option<StatusCode>,
    requests: Vec<Request>,
}

#[derive(Debug)]
struct DbUser {
    img: String,
    following: BTreeSet<String>,
}

#[derive(Debug)]
struct DbPost {
    owner: String,
    img: String,
    created: Time,
}

#[derive(Debug)]
struct DbLike {
    owner: String,
    postid: PostId,
}

#[derive(Debug)]
struct DbComment {
    owner: String,
    postid: PostId,
    text: String,
}

impl MockServer {
    /// Backend seen by `logname`, who already exists
    pub fn new(logname: &str) -> MockServer {
        let mut users = BTreeMap::new();
        users.insert(logname.to_string(), DbUser::new(logname));
        MockServer(RefCell::new(State {
            logname: logname.to_string(),
            users,
            posts: BTreeMap::new(),
            likes: BTreeMap::new(),
            comments: BTreeMap::new(),
            next_id: 1,
            page_size: DEFAULT_PAGE_SIZE,
            fail_next: None,
            requests: Vec::new(),
        }))
    }

    pub fn add_user(&self, name: &str) {
        self.0
            .borrow_mut()
            .users
            .entry(name.to_string())
            .or_insert_with(|| DbUser::new(name));
    }

    pub fn follow(&self, follower: &str, followed: &str) {
        self.add_user(follower);
        self.add_user(followed);
        let mut s = self.0.borrow_mut();
        if let Some(u) = s.users.get_mut(follower) {
            u.following.insert(followed.to_string());
        }
    }

    pub fn add_post(&self, owner: &str, created: Time) -> PostId {
        self.add_user(owner);
        let mut s = self.0.borrow_mut();
        let id = PostId(s.fresh_id());
        s.posts.insert(
            id,
            DbPost {
                owner: owner.to_string(),
                img: format!("/uploads/post-{id}.jpg"),
                created,
            },
        );
        id
    }

    pub fn add_comment_as(&self, owner: &str, postid: PostId, text: &str) -> CommentId {
        self.add_user(owner);
        let mut s = self.0.borrow_mut();
        let id = CommentId(s.fresh_id());
        s.comments.insert(
            id,
            DbComment {
                owner: owner.to_string(),
                postid,
                text: text.to_string(),
            },
        );
        id
    }

    pub fn like_as(&self, owner: &str, postid: PostId) -> u64 {
        self.add_user(owner);
        let mut s = self.0.borrow_mut();
        s.find_like(owner, postid).unwrap_or_else(|| {
            let id = s.fresh_id();
            s.likes.insert(
                id,
                DbLike {
                    owner: owner.to_string(),
                    postid,
                },
            );
            id
        })
    }

    pub fn set_page_size(&self, size: usize) {
        self.0.borrow_mut().page_size = size;
    }

    /// Answer the next request with `status`, whatever it is
    pub fn fail_next(&self, status: StatusCode) {
        self.0.borrow_mut().fail_next = Some(status);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.0.borrow().requests.clone()
    }

    pub fn take_requests(&self) -> Vec<Request> {
        std::mem::take(&mut self.0.borrow_mut().requests)
    }

    pub fn num_likes(&self, postid: PostId) -> usize {
        self.0
            .borrow()
            .likes
            .values()
            .filter(|l| l.postid == postid)
            .count()
    }

    pub fn comment_texts(&self, postid: PostId) -> Vec<String> {
        self.0
            .borrow()
            .comments
            .values()
            .filter(|c| c.postid == postid)
            .map(|c| c.text.clone())
            .collect()
    }

    fn begin(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<std::cell::RefMut<'_, State>, RequestFailed> {
        let mut s = self.0.borrow_mut();
        tracing::trace!(%method, url, "mock server got request");
        s.requests.push(Request {
            method: method.clone(),
            url: url.to_string(),
            body,
        });
        match s.fail_next.take() {
            Some(status) => Err(RequestFailed::status(method, url, status)),
            None => Ok(s),
        }
    }
}

impl DbUser {
    fn new(name: &str) -> DbUser {
        DbUser {
            img: format!("/uploads/{name}.jpg"),
            following: BTreeSet::new(),
        }
    }
}

impl State {
    fn fresh_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn find_like(&self, owner: &str, postid: PostId) -> Option<u64> {
        self.likes
            .iter()
            .find(|(_, l)| l.owner == owner && l.postid == postid)
            .map(|(id, _)| *id)
    }

    fn is_visible(&self, post: &DbPost) -> bool {
        post.owner == self.logname
            || self
                .users
                .get(&self.logname)
                .map(|u| u.following.contains(&post.owner))
                .unwrap_or(false)
    }

    fn feed_page(&self, url: &str) -> Result<FeedPage, StatusCode> {
        let (path, query) = split_url(url);
        if path != endpoints::FEED {
            return Err(StatusCode::NOT_FOUND);
        }
        let size = query_param(&query, "size")?.unwrap_or(self.page_size as u64) as usize;
        let page = query_param(&query, "page")?.unwrap_or(0) as usize;
        let visible = self
            .posts
            .iter()
            .rev()
            .filter(|(_, p)| self.is_visible(p))
            .map(|(id, _)| *id)
            .collect::<Vec<_>>();
        // pin the newest post at first access so that pages stay stable
        let postid_lte = match query_param(&query, "postid_lte")? {
            Some(id) => PostId(id),
            None => visible.first().copied().unwrap_or(PostId(0)),
        };
        let results = visible
            .into_iter()
            .filter(|id| *id <= postid_lte)
            .skip(page * size)
            .take(size)
            .map(|postid| PostSummary {
                postid,
                url: endpoints::post(postid),
            })
            .collect::<Vec<_>>();
        let next = match size > 0 && results.len() >= size {
            true => endpoints::feed_page(size, page + 1, postid_lte),
            false => String::new(),
        };
        Ok(FeedPage {
            results,
            next,
            url: url.to_string(),
        })
    }

    fn post_detail(&self, postid: PostId) -> Result<PostDetail, StatusCode> {
        let post = self.posts.get(&postid).ok_or(StatusCode::NOT_FOUND)?;
        let num_likes = self.likes.values().filter(|l| l.postid == postid).count() as u64;
        let likes = match self.find_like(&self.logname, postid) {
            Some(likeid) => LikeState {
                logname_likes_this: true,
                num_likes,
                url: endpoints::like(likeid),
            },
            None => LikeState {
                logname_likes_this: false,
                num_likes,
                url: String::new(),
            },
        };
        let comments = self
            .comments
            .iter()
            .filter(|(_, c)| c.postid == postid)
            .map(|(id, c)| self.comment(*id, c))
            .collect();
        Ok(PostDetail {
            postid,
            img_url: post.img.clone(),
            owner: post.owner.clone(),
            owner_img_url: self
                .users
                .get(&post.owner)
                .map(|u| u.img.clone())
                .unwrap_or_default(),
            owner_show_url: endpoints::user_show(&post.owner),
            post_show_url: endpoints::post_show(postid),
            url: endpoints::post(postid),
            created: post.created,
            likes,
            comments,
        })
    }

    fn comment(&self, id: CommentId, c: &DbComment) -> Comment {
        Comment {
            commentid: id,
            owner: c.owner.clone(),
            owner_show_url: endpoints::user_show(&c.owner),
            text: c.text.clone(),
            url: endpoints::comment(id),
            logname_owns_this: c.owner == self.logname,
        }
    }
}

/// Split `url` into its path and its `key=value` query pairs
fn split_url(url: &str) -> (&str, Vec<(&str, &str)>) {
    match url.split_once('?') {
        None => (url, Vec::new()),
        Some((path, query)) => (
            path,
            query
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|p| p.split_once('=').unwrap_or((p, "")))
                .collect(),
        ),
    }
}

fn query_param(query: &[(&str, &str)], key: &str) -> Result<Option<u64>, StatusCode> {
    match query.iter().find(|(k, _)| *k == key) {
        None => Ok(None),
        Some((_, v)) => v
            .parse()
            .map(Some)
            .map_err(|_| StatusCode::BAD_REQUEST),
    }
}

/// Parse the numeric id out of `{prefix}{id}/`
fn resource_id(url: &str, prefix: &str) -> Result<u64, StatusCode> {
    url.strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix('/'))
        .and_then(|id| id.parse().ok())
        .ok_or(StatusCode::NOT_FOUND)
}

#[async_trait(?Send)]
impl Backend for MockServer {
    async fn fetch_feed(&self, url: &str) -> Result<FeedPage, RequestFailed> {
        let s = self.begin(Method::GET, url, None)?;
        s.feed_page(url)
            .map_err(|status| RequestFailed::status(Method::GET, url, status))
    }

    async fn fetch_post(&self, url: &str) -> Result<PostDetail, RequestFailed> {
        let s = self.begin(Method::GET, url, None)?;
        resource_id(url, "/api/v1/posts/")
            .and_then(|id| s.post_detail(PostId(id)))
            .map_err(|status| RequestFailed::status(Method::GET, url, status))
    }

    async fn add_like(&self, postid: PostId) -> Result<NewLike, RequestFailed> {
        let url = endpoints::likes(postid);
        let mut s = self.begin(Method::POST, &url, None)?;
        if !s.posts.contains_key(&postid) {
            return Err(RequestFailed::status(Method::POST, url, StatusCode::NOT_FOUND));
        }
        let logname = s.logname.clone();
        let likeid = match s.find_like(&logname, postid) {
            Some(id) => id,
            None => {
                let id = s.fresh_id();
                s.likes.insert(
                    id,
                    DbLike {
                        owner: logname,
                        postid,
                    },
                );
                id
            }
        };
        Ok(NewLike {
            likeid: Some(likeid),
            url: endpoints::like(likeid),
        })
    }

    async fn remove_like(&self, url: &str) -> Result<(), RequestFailed> {
        let mut s = self.begin(Method::DELETE, url, None)?;
        let fail = |status| RequestFailed::status(Method::DELETE, url, status);
        let id = resource_id(url, "/api/v1/likes/").map_err(fail)?;
        let owner = s.likes.get(&id).map(|l| l.owner.clone());
        match owner {
            None => Err(fail(StatusCode::NOT_FOUND)),
            Some(owner) if owner != s.logname => Err(fail(StatusCode::FORBIDDEN)),
            Some(_) => {
                s.likes.remove(&id);
                Ok(())
            }
        }
    }

    async fn add_comment(
        &self,
        postid: PostId,
        comment: &NewComment,
    ) -> Result<Comment, RequestFailed> {
        let url = endpoints::comments(postid);
        let body = serde_json::to_value(comment)
            .map_err(|e| RequestFailed::transport(Method::POST, url.clone(), e))?;
        let mut s = self.begin(Method::POST, &url, Some(body))?;
        if !s.posts.contains_key(&postid) {
            return Err(RequestFailed::status(Method::POST, url, StatusCode::NOT_FOUND));
        }
        let id = CommentId(s.fresh_id());
        let c = DbComment {
            owner: s.logname.clone(),
            postid,
            text: comment.text.clone(),
        };
        let res = s.comment(id, &c);
        s.comments.insert(id, c);
        Ok(res)
    }

    async fn delete_comment(&self, url: &str) -> Result<(), RequestFailed> {
        let mut s = self.begin(Method::DELETE, url, None)?;
        let fail = |status| RequestFailed::status(Method::DELETE, url, status);
        let id = CommentId(resource_id(url, "/api/v1/comments/").map_err(fail)?);
        let owner = s.comments.get(&id).map(|c| c.owner.clone());
        match owner {
            None => Err(fail(StatusCode::NOT_FOUND)),
            Some(owner) if owner != s.logname => Err(fail(StatusCode::FORBIDDEN)),
            Some(_) => {
                s.comments.remove(&id);
                Ok(())
            }
        }
    }
}

/// `Diagnostics` that keeps every report for later inspection
#[derive(Debug, Default)]
pub struct RecordedDiagnostics(RefCell<Vec<(String, RequestFailed)>>);

impl RecordedDiagnostics {
    pub fn new() -> RecordedDiagnostics {
        RecordedDiagnostics::default()
    }

    pub fn reports(&self) -> Vec<(String, RequestFailed)> {
        self.0.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl Diagnostics for RecordedDiagnostics {
    fn report(&self, context: &str, err: &RequestFailed) {
        self.0.borrow_mut().push((context.to_string(), err.clone()));
    }
}
