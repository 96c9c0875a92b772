use picfeed_client::{FeedView, PageRequest, PageResponse};
use yew::prelude::*;

use crate::{api::Services, ui, util};

#[derive(Clone, PartialEq, Properties)]
pub struct FeedProps {
    pub url: String,
    pub services: Services,
}

pub enum FeedMsg {
    ReceivedPage(PageResponse),
    LoadMore,
}

pub struct Feed {
    view: FeedView,

    // Set when the last page moved the cursor. A failed page leaves it unset,
    // so the next attempt waits for the user to scroll.
    cursor_advanced: bool,

    _scroll: util::ScrollListener,
}

impl Feed {
    fn fetch(&self, ctx: &Context<Self>, req: PageRequest) {
        tracing::debug!(url = %req.url, "fetching feed page");
        let backend = ctx.props().services.backend.clone();
        ctx.link().send_future(async move {
            FeedMsg::ReceivedPage(FeedView::fetch(&*backend, req).await)
        });
    }
}

impl Component for Feed {
    type Message = FeedMsg;
    type Properties = FeedProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut this = Feed {
            view: FeedView::new(),
            cursor_advanced: false,
            _scroll: util::ScrollListener::new(ctx.link().callback(|_| FeedMsg::LoadMore)),
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
        match msg {
            FeedMsg::ReceivedPage(resp) => {
                let cursor = self.view.next_url().to_string();
                let changed = self
                    .view
                    .complete(resp, &*ctx.props().services.diagnostics);
                self.cursor_advanced = changed && self.view.next_url() != cursor;
                changed
            }
            FeedMsg::LoadMore => match self.view.load_more() {
                Some(req) => {
                    self.fetch(ctx, req);
                    true
                }
                None => false,
            },
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        // a short page may not be scrollable at all
        if std::mem::take(&mut self.cursor_advanced)
            && self.view.has_more()
            && !self.view.is_loading()
            && util::near_bottom()
        {
            ctx.link().send_message(FeedMsg::LoadMore);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.view.teardown();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let posts = self.view.posts().iter().map(|p| {
            html! {
                <ui::Post
                    key={ p.postid.to_string() }
                    url={ p.url.clone() }
                    services={ ctx.props().services.clone() }
                />
            }
        });
        let loader = (self.view.has_more() || self.view.is_loading())
            .then(|| html! { <h4>{ "Loading..." }</h4> });
        html! {
            <div class="feed">
                { for posts }
                { for loader }
            </div>
        }
    }
}
