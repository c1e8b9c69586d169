use dioxus::prelude::*;

mod api;
mod components;
mod config;
mod prefs;
mod routes;
mod sync;

use api::KaraokeClient;
use config::ApiConfig;
use prefs::load_prefs;
use routes::Route;

const APP_CSS: Asset = asset!("/assets/styling/app.css");
const TAILWIND_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let client = use_hook(|| KaraokeClient::new(ApiConfig::from_environment()));
    let prefs = use_signal(load_prefs);

    use_context_provider(|| client);
    use_context_provider(|| prefs);

    rsx! {
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Meta { name: "theme-color", content: "#09090b" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Title { "Karaoke Remote" }

        document::Stylesheet { href: TAILWIND_CSS }
        document::Stylesheet { href: APP_CSS }

        Router::<Route> {}
    }
}
