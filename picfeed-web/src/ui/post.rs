use picfeed_client::{
    api::{Comment, CommentId, LikeState, PostId, RequestFailed},
    toggle_like, PostRequest, PostResponse, PostState, PostView,
};
use yew::prelude::*;

use crate::{api::Services, ui};

#[derive(Clone, PartialEq, Properties)]
pub struct PostProps {
    pub url: String,
    pub services: Services,
}

pub enum PostMsg {
    Loaded(PostResponse),
    ImageDoubleClicked,
    LikesChanged(PostId, LikeState),
    DraftChanged(String),
    SubmitComment,
    CommentAdded(PostId, Comment),
    DeleteComment(CommentId),
    CommentDeleted,
    Failed(&'static str, RequestFailed),
}

pub struct Post {
    view: PostView,
}

impl Post {
    fn fetch(&self, ctx: &Context<Self>, req: PostRequest) {
        tracing::debug!(url = %req.url, "fetching post");
        let backend = ctx.props().services.backend.clone();
        ctx.link()
            .send_future(async move { PostMsg::Loaded(PostView::fetch(&*backend, req).await) });
    }
}

impl Component for Post {
    type Message = PostMsg;
    type Properties = PostProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut this = Post {
            view: PostView::new(),
        };
        let req = this.view.start(&ctx.props().url);
        this.fetch(ctx, req);
        this
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().url != old_props.url {
            let req = self.view.start(&ctx.props().url);
            self.fetch(ctx, req);
        }
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let services = &ctx.props().services;
        match msg {
            PostMsg::Loaded(resp) => self.view.complete(resp, &*services.diagnostics),
            PostMsg::ImageDoubleClicked => {
                if let Some((postid, likes)) = self.view.double_click_like() {
                    let backend = services.backend.clone();
                    ctx.link().send_future(async move {
                        match toggle_like(&*backend, postid, &likes).await {
                            Ok(likes) => PostMsg::LikesChanged(postid, likes),
                            Err(e) => PostMsg::Failed("failed liking post", e),
                        }
                    });
                }
                false
            }
            PostMsg::LikesChanged(postid, likes) => self.view.set_likes(postid, likes),
            PostMsg::DraftChanged(text) => {
                self.view.set_comment_draft(text);
                true
            }
            PostMsg::SubmitComment => {
                if let Some(req) = self.view.submit_comment() {
                    let backend = services.backend.clone();
                    ctx.link().send_future(async move {
                        let postid = req.postid;
                        match PostView::send_comment(&*backend, req).await {
                            Ok(c) => PostMsg::CommentAdded(postid, c),
                            Err(e) => PostMsg::Failed("failed adding comment", e),
                        }
                    });
                }
                true
            }
            PostMsg::CommentAdded(postid, c) => self.view.append_comment(postid, c),
            PostMsg::DeleteComment(id) => match self.view.delete_comment(id) {
                Some(c) => {
                    let backend = services.backend.clone();
                    ctx.link().send_future(async move {
                        match backend.delete_comment(&c.url).await {
                            Ok(()) => PostMsg::CommentDeleted,
                            Err(e) => PostMsg::Failed("failed deleting comment", e),
                        }
                    });
                    true
                }
                None => false,
            },
            PostMsg::CommentDeleted => false,
            PostMsg::Failed(context, e) => {
                services.diagnostics.report(context, &e);
                false
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.view.teardown();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let d = match self.view.state() {
            PostState::Loaded(d) => d,
            PostState::Loading => {
                return html! {
                    <div class="post">
                        <p>{ "Loading likes..." }</p>
                        { comment_form(&self.view, link) }
                    </div>
                };
            }
        };
        let created = self
            .view
            .created_since(chrono::Utc::now())
            .unwrap_or_default();
        let postid = d.postid;
        html! {
            <div class="post">
                <div class="post-header">
                    <img src={ d.owner_img_url.clone() } alt="owner_image" height="60" width="60" />
                    <a href={ d.owner_show_url() } class="post-header-user">
                        <b>{ &d.owner }</b>
                    </a>
                    <a href={ d.post_show_url() } class="post-header-timestamp">
                        { created }
                    </a>
                </div>
                <img
                    src={ d.img_url.clone() }
                    class="post-image"
                    alt="post_image"
                    ondblclick={ link.callback(|_| PostMsg::ImageDoubleClicked) }
                />
                <ui::Likes
                    likes={ d.likes.clone() }
                    { postid }
                    on_change={ link.callback(move |likes| PostMsg::LikesChanged(postid, likes)) }
                    services={ ctx.props().services.clone() }
                />
                <ui::CommentList
                    comments={ d.comments.clone() }
                    on_delete={ link.callback(PostMsg::DeleteComment) }
                />
                { comment_form(&self.view, link) }
            </div>
        }
    }
}

fn comment_form(view: &PostView, link: &yew::html::Scope<Post>) -> Html {
    html! {
        <form
            class="comment-form"
            onsubmit={ link.callback(|e: SubmitEvent| {
                e.prevent_default();
                PostMsg::SubmitComment
            }) }
        >
            <input
                type="text"
                value={ view.comment_draft().to_string() }
                oninput={ link.callback(|e: InputEvent| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    PostMsg::DraftChanged(input.value())
                }) }
                disabled={ !view.comment_input_enabled() }
            />
        </form>
    }
}
