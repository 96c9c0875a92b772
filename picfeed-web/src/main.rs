use picfeed_client::api::endpoints;

mod api;
mod ui;
mod util;

lazy_static::lazy_static! {
    pub static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

// Element the feed gets mounted in, if the page provides one
const ROOT_ID: &str = "feed";

fn main() {
    tracing_wasm::set_as_global_default();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .expect("running outside of a browser document");
    match document.get_element_by_id(ROOT_ID) {
        Some(root) => {
            let feed_url = root
                .get_attribute("data-feed-url")
                .unwrap_or_else(|| String::from(endpoints::FEED));
            tracing::info!(%feed_url, "mounting feed");
            yew::Renderer::<ui::App>::with_root_and_props(root, ui::AppProps { feed_url }).render();
        }
        None => {
            tracing::info!(feed_url = endpoints::FEED, "mounting feed on document body");
            yew::Renderer::<ui::App>::with_props(ui::AppProps {
                feed_url: String::from(endpoints::FEED),
            })
            .render();
        }
    }
}
