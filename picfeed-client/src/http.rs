use async_trait::async_trait;

use crate::{
    api::{
        endpoints, Comment, FeedPage, Method, NewComment, NewLike, PostDetail, PostId,
        RequestFailed,
    },
    Backend,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// `Backend` talking to the real REST API through reqwest
///
/// Resource URLs handed out by the backend are origin-relative; they get
/// resolved against `origin`. In the browser the fetch API keeps its default
/// same-origin credential scoping, so the session cookie goes along. Outside
/// the browser, HTTP basic credentials can be set instead.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    origin: String,
    credentials: Option<Credentials>,
}

impl HttpBackend {
    pub fn new(client: reqwest::Client, origin: impl Into<String>) -> HttpBackend {
        HttpBackend {
            client,
            origin: origin.into().trim_end_matches('/').to_string(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> HttpBackend {
        self.credentials = Some(credentials);
        self
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        match url.starts_with('/') {
            true => format!("{}{}", self.origin, url),
            false => format!("{}/{}", self.origin, url),
        }
    }

    async fn send<T>(
        &self,
        method: Method,
        url: &str,
        body: Option<&T>,
    ) -> Result<reqwest::Response, RequestFailed>
    where
        T: serde::Serialize + ?Sized,
    {
        let mut req = self.client.request(method.clone(), self.resolve(url));
        if let Some(c) = &self.credentials {
            req = req.basic_auth(&c.user, Some(&c.pass));
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        tracing::trace!(%method, url, "sending request");
        let resp = req
            .send()
            .await
            .map_err(|e| RequestFailed::transport(method.clone(), url, e))?;
        if !resp.status().is_success() {
            return Err(RequestFailed::status(method, url, resp.status()));
        }
        Ok(resp)
    }

    async fn send_for_json<T, R>(
        &self,
        method: Method,
        url: &str,
        body: Option<&T>,
    ) -> Result<R, RequestFailed>
    where
        T: serde::Serialize + ?Sized,
        R: for<'de> serde::Deserialize<'de>,
    {
        self.send(method.clone(), url, body)
            .await?
            .json()
            .await
            .map_err(|e| RequestFailed::transport(method, url, e))
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn fetch_feed(&self, url: &str) -> Result<FeedPage, RequestFailed> {
        self.send_for_json::<(), _>(Method::GET, url, None).await
    }

    async fn fetch_post(&self, url: &str) -> Result<PostDetail, RequestFailed> {
        self.send_for_json::<(), _>(Method::GET, url, None).await
    }

    async fn add_like(&self, postid: PostId) -> Result<NewLike, RequestFailed> {
        self.send_for_json::<(), _>(Method::POST, &endpoints::likes(postid), None)
            .await
    }

    async fn remove_like(&self, url: &str) -> Result<(), RequestFailed> {
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    async fn add_comment(
        &self,
        postid: PostId,
        comment: &NewComment,
    ) -> Result<Comment, RequestFailed> {
        self.send_for_json(Method::POST, &endpoints::comments(postid), Some(comment))
            .await
    }

    async fn delete_comment(&self, url: &str) -> Result<(), RequestFailed> {
        self.send::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }
}
