use yew::prelude::*;

use crate::{api::Services, ui};

#[derive(Clone, PartialEq, Properties)]
pub struct AppProps {
    pub feed_url: String,
}

pub struct App {
    services: Services,
}

impl Component for App {
    type Message = ();
    type Properties = AppProps;

    fn create(_ctx: &Context<Self>) -> Self {
        App {
            services: Services::for_page_origin(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <ui::Feed
                url={ ctx.props().feed_url.clone() }
                services={ self.services.clone() }
            />
        }
    }
}
