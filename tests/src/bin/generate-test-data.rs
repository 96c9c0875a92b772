//! Dump what a populated backend answers, as JSON, for frontend development

use futures::executor::block_on;
use picfeed_client::{api::endpoints, Backend};
use rand::SeedableRng;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let fixture = tests::generate(&mut rng, &tests::Config::default());

    let mut pages = Vec::new();
    let mut posts = Vec::new();
    let mut url = String::from(endpoints::FEED);
    loop {
        let page = block_on(fixture.server.fetch_feed(&url)).expect("fetching generated feed");
        for p in &page.results {
            posts.push(block_on(fixture.server.fetch_post(&p.url)).expect("fetching generated post"));
        }
        let next = page.next.clone();
        pages.push(page);
        if next.is_empty() {
            break;
        }
        url = next;
    }

    let dump = serde_json::json!({
        "feed": pages,
        "posts": posts,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&dump).expect("serializing generated data")
    );
}
