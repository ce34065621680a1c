mod api;
mod components;

use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{AnalysisReport, PageNav, ProductPageView};
use web_sys::DragEvent;
use yew::prelude::*;

use components::{handlers, header, landing, results, upload_section, utils};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Analyze,
}

#[derive(Clone)]
pub struct FileData {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
}

pub enum Msg {
    // Navigation
    Navigate(Page),

    // File operations
    FilesAdded(Vec<GlooFile>),
    RemoveFile,

    // Analysis
    Analyze,
    ReportReady(Box<AnalysisReport>),

    // Product pagination
    PanelNav(u32, PageNav),
    PanelUpdated(Box<ProductPageView>),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
}

pub struct Model {
    pub page: Page,
    pub file: Option<FileData>,
    pub report: Option<AnalysisReport>,
    pub loading: bool,
    /// Category currently fetching a product page, if any.
    pub paging_category: Option<u32>,
    pub error: Option<String>,
    pub is_dragging: bool,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            page: Page::Landing,
            file: None,
            report: None,
            loading: false,
            paging_category: None,
            error: None,
            is_dragging: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => handlers::handle_navigate(self, page),

            Msg::FilesAdded(files) => handlers::handle_files_added(self, files),
            Msg::RemoveFile => handlers::handle_remove_file(self),

            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::ReportReady(report) => handlers::handle_report_ready(self, report),

            Msg::PanelNav(category_id, nav) => {
                handlers::handle_panel_nav(self, ctx, category_id, nav)
            }
            Msg::PanelUpdated(panel) => handlers::handle_panel_updated(self, panel),

            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                self.paging_category = None;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header(self, ctx) }

                <main class="main-content">
                    {
                        match self.page {
                            Page::Landing => landing::render_landing(ctx),
                            Page::Analyze => html! {
                                <>
                                    { upload_section::render_upload_section(self, ctx) }
                                    { utils::render_error_message(self) }
                                    { results::render_results(self, ctx) }
                                </>
                            },
                        }
                    }
                </main>

                <footer class="app-footer">
                    <p>{"AnSkin | Skin analysis & skincare recommendations"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
