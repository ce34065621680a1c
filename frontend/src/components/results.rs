use super::super::Model;
use super::products;
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(report) = &model.report else {
        return html! {};
    };

    html! {
        <div class="results-container">
            <h2>{"Analysis Summary"}</h2>
            <div class="summary-columns">
                <div class="skin-type-card">
                    <h3>{"Skin Type"}</h3>
                    <p class="skin-type-value">{ &report.skin_type }</p>
                </div>
                <div class="skin-problems-card">
                    <h3>{"Skin Problems"}</h3>
                    { render_problem_list(&report.skin_problems) }
                </div>
            </div>

            { for report.overlays.iter().map(|overlay| {
                let panel = report
                    .panels
                    .iter()
                    .find(|panel| panel.category_id == overlay.category_id);

                html! {
                    <div class="condition-row" key={overlay.category_id.to_string()}>
                        <div class="overlay-column">
                            <h3>{ format!("Segmented Image for {}", overlay.label) }</h3>
                            <img
                                class="overlay-image"
                                src={format!("data:image/png;base64,{}", overlay.image_base64)}
                                alt={overlay.label.clone()}
                            />
                        </div>
                        <div class="products-column">
                            {
                                panel
                                    .map(|panel| products::render_product_panel(model, ctx, panel))
                                    .unwrap_or_default()
                            }
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

fn render_problem_list(problems: &[String]) -> Html {
    if problems.is_empty() {
        return html! {
            <p class="no-problems">{"No major skin problems detected!"}</p>
        };
    }

    html! {
        <ul class="problem-list">
            { for problems.iter().map(|problem| html! { <li>{ problem }</li> }) }
        </ul>
    }
}
