use super::super::{Model, Msg, Page};
use yew::prelude::*;

/// Renders the fixed navigation bar
pub fn render_header(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <header class="navbar">
            <div class="service-number">{"Service Number: 1234567890"}</div>
            <div class="brand-name">{"AnSkin"}</div>
            <nav class="right-section">
                <button
                    class={classes!("nav-link", (model.page == Page::Landing).then_some("active"))}
                    onclick={link.callback(|_| Msg::Navigate(Page::Landing))}
                >
                    {"Home"}
                </button>
                <button
                    class={classes!("nav-link", (model.page == Page::Analyze).then_some("active"))}
                    onclick={link.callback(|_| Msg::Navigate(Page::Analyze))}
                >
                    {"Analyse"}
                </button>
            </nav>
        </header>
    }
}
