use super::super::{Model, Msg};
use super::utils::{debounce, format_price};
use shared::{PageNav, ProductCard, ProductPageView};
use yew::prelude::*;

/// One recommended-products panel: a window of up to three cards with
/// wraparound prev/next navigation. A category with no products renders
/// nothing at all.
pub fn render_product_panel(model: &Model, ctx: &Context<Model>, panel: &ProductPageView) -> Html {
    if panel.total == 0 {
        return html! {};
    }

    let link = ctx.link().clone();
    let category_id = panel.category_id;
    let busy = model.paging_category == Some(category_id);

    let prev = debounce(300, {
        let link = link.clone();
        move || link.send_message(Msg::PanelNav(category_id, PageNav::Prev))
    });
    let next = debounce(300, {
        let link = link.clone();
        move || link.send_message(Msg::PanelNav(category_id, PageNav::Next))
    });

    let shown_to = (panel.offset + panel.items.len()).min(panel.total);

    html! {
        <div class="product-panel">
            <h3>{"Recommended Products"}</h3>
            <div class="panel-nav">
                <button class="nav-btn" disabled={busy} onclick={prev}>
                    <i class="fa-solid fa-arrow-left"></i>
                </button>
                <span class="page-indicator">
                    { format!("{}-{} of {}", panel.offset + 1, shown_to, panel.total) }
                </span>
                <button class="nav-btn" disabled={busy} onclick={next}>
                    <i class="fa-solid fa-arrow-right"></i>
                </button>
            </div>
            <div class="product-row">
                { for panel.items.iter().map(render_product_card) }
            </div>
        </div>
    }
}

fn render_product_card(product: &ProductCard) -> Html {
    html! {
        <div class="product-card">
            <strong>{ &product.name }</strong>
            <img src={product.image_url.clone()} width="150" alt={product.name.clone()} />
            <p>{ &product.description }</p>
            <p class="price">{ format!("Price: {}", format_price(product.price)) }</p>
            <a class="buy-link" href={product.product_url.clone()} target="_blank">
                {"Buy Now"}
            </a>
        </div>
    }
}
