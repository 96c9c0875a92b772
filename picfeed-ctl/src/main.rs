use anyhow::{anyhow, Context};
use picfeed_client::{
    api::{endpoints, CommentId, PostId},
    count_label, toggle_like, Backend, Credentials, FeedView, HttpBackend, PostView,
    TracingDiagnostics,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// Origin of the backend
    #[structopt(short, long, default_value = "http://localhost:8000")]
    host: String,

    /// Log in as this user, with the password from PICFEED_PASSWORD
    #[structopt(short, long)]
    user: Option<String>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List the posts of the feed
    Feed {
        /// Feed entry point
        #[structopt(long, default_value = "/api/v1/posts/")]
        url: String,

        /// Maximum number of pages to fetch
        #[structopt(long, default_value = "1")]
        pages: usize,
    },

    /// Show a post with its likes and comments
    Show { postid: u64 },

    /// Like a post, unless already liked
    Like { postid: u64 },

    /// Retract a like
    Unlike { postid: u64 },

    /// Comment on a post
    Comment { postid: u64, text: String },

    /// Delete one of your comments
    DeleteComment { commentid: u64 },
}

fn password() -> anyhow::Result<String> {
    std::env::var("PICFEED_PASSWORD").context("retrieving PICFEED_PASSWORD environment variable")
}

async fn load_post(backend: &HttpBackend, postid: u64) -> anyhow::Result<PostView> {
    let mut view = PostView::new();
    let req = view.start(&endpoints::post(PostId(postid)));
    let resp = PostView::fetch(backend, req).await;
    if let Err(e) = &resp.result {
        return Err(e.clone()).with_context(|| format!("loading post {postid}"));
    }
    view.complete(resp, &TracingDiagnostics);
    Ok(view)
}

async fn feed(backend: &HttpBackend, url: &str, pages: usize) {
    let mut view = FeedView::new();
    let mut req = Some(view.start(url));
    let mut fetched = 0;
    while let Some(r) = req.take() {
        let resp = FeedView::fetch(backend, r).await;
        let failed = resp.result.is_err();
        view.complete(resp, &TracingDiagnostics);
        fetched += 1;
        if failed {
            break;
        }
        if fetched < pages {
            req = view.load_more();
        }
    }
    for p in view.posts() {
        println!("{}\t{}", p.postid, p.url);
    }
    if view.has_more() {
        println!("more: {}", view.next_url());
    }
}

fn show(view: &PostView) {
    let d = match view.detail() {
        Some(d) => d,
        None => return,
    };
    let created = view.created_since(chrono::Utc::now()).unwrap_or_default();
    println!("post {} by {} ({created})", d.postid, d.owner);
    println!("image: {}", d.img_url);
    println!(
        "{}{}",
        count_label(d.likes.num_likes),
        if d.likes.logname_likes_this { ", including you" } else { "" },
    );
    for c in &d.comments {
        let mine = if c.logname_owns_this { " (yours)" } else { "" };
        println!("  [{}] {}{mine}: {}", c.commentid, c.owner, c.text);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();
    tracing::debug!(host = %opt.host, user = ?opt.user, "connecting to backend");

    let mut backend = HttpBackend::new(reqwest::Client::new(), opt.host);
    if let Some(user) = opt.user {
        backend = backend.with_credentials(Credentials {
            user,
            pass: password()?,
        });
    }

    match opt.cmd {
        Command::Feed { url, pages } => feed(&backend, &url, pages).await,
        Command::Show { postid } => show(&load_post(&backend, postid).await?),
        Command::Like { postid } => {
            let mut view = load_post(&backend, postid).await?;
            match view.double_click_like() {
                None => println!("post {postid} is already liked"),
                Some((postid, likes)) => {
                    let likes = toggle_like(&backend, postid, &likes)
                        .await
                        .with_context(|| format!("liking post {postid}"))?;
                    view.set_likes(postid, likes);
                    show(&view);
                }
            }
        }
        Command::Unlike { postid } => {
            let mut view = load_post(&backend, postid).await?;
            let likes = view
                .likes()
                .cloned()
                .ok_or_else(|| anyhow!("post {postid} has no like state"))?;
            match likes.logname_likes_this {
                false => println!("post {postid} is not liked"),
                true => {
                    let likes = toggle_like(&backend, PostId(postid), &likes)
                        .await
                        .with_context(|| format!("unliking post {postid}"))?;
                    view.set_likes(PostId(postid), likes);
                    show(&view);
                }
            }
        }
        Command::Comment { postid, text } => {
            let mut view = load_post(&backend, postid).await?;
            view.set_comment_draft(text);
            let req = view
                .submit_comment()
                .ok_or_else(|| anyhow!("post {postid} is not loaded"))?;
            let c = PostView::send_comment(&backend, req)
                .await
                .with_context(|| format!("commenting on post {postid}"))?;
            println!("added comment {} at {}", c.commentid, c.url);
        }
        Command::DeleteComment { commentid } => {
            backend
                .delete_comment(&endpoints::comment(CommentId(commentid)))
                .await
                .with_context(|| format!("deleting comment {commentid}"))?;
            println!("deleted comment {commentid}");
        }
    }

    Ok(())
}
