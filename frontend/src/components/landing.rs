use super::super::{Model, Msg, Page};
use yew::prelude::*;

/// Static marketing content; the Browse and Capture buttons both lead to
/// the analysis page.
pub fn render_landing(ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <>
            <section class="hero-section">
                <div class="brand-overlay">{"ANSKIN"}</div>
                <div class="skin-analysis-text">
                    <p>
                        {"Analyse your skin problems and skin types"}<br/>
                        {"and know your right skincare routine"}
                    </p>
                    <button
                        class="browse-button"
                        onclick={link.callback(|_| Msg::Navigate(Page::Analyze))}
                    >
                        {"Browse"}
                    </button>
                </div>
                <div class="quote-overlay">
                    <p>
                        {"The best makeup foundation"}<br/>
                        {"you can wear is glowing skin"}
                    </p>
                </div>
            </section>

            <section class="capture-section">
                <button
                    class="capture-button"
                    onclick={link.callback(|_| Msg::Navigate(Page::Analyze))}
                >
                    {"Capture"}
                </button>
            </section>
        </>
    }
}
