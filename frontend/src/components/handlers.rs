use super::super::{FileData, Model, Msg, Page};
use crate::api;
use crate::components::utils::extract_image_files;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{AnalysisReport, PageNav, ProductPageRequest, ProductPageView};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_navigate(model: &mut Model, page: Page) -> bool {
    model.page = page;
    model.error = None;
    true
}

pub fn handle_files_added(model: &mut Model, files: Vec<GlooFile>) -> bool {
    // Analysis runs over exactly one image; the latest pick wins.
    let Some(file) = files.into_iter().next() else {
        model.error = Some("No valid image files selected.".into());
        return true;
    };

    let preview_url = ObjectUrl::from(file.clone());
    model.file = Some(FileData { file, preview_url });
    model.report = None;
    model.error = None;
    true
}

pub fn handle_remove_file(model: &mut Model) -> bool {
    model.file = None;
    model.report = None;
    model.error = None;
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(file_data) = &model.file else {
        model.error = Some("No file selected for analysis.".into());
        return true;
    };

    model.loading = true;
    model.error = None;

    let file = file_data.file.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        match api::analyze(file).await {
            Ok(report) => link.send_message(Msg::ReportReady(Box::new(report))),
            Err(e) => link.send_message(Msg::SetError(Some(e))),
        }
    });
    true
}

pub fn handle_report_ready(model: &mut Model, report: Box<AnalysisReport>) -> bool {
    log::info!(
        "Analysis complete: {} condition(s) detected",
        report.detected.len()
    );
    model.report = Some(*report);
    model.loading = false;
    true
}

pub fn handle_panel_nav(
    model: &mut Model,
    ctx: &Context<Model>,
    category_id: u32,
    nav: PageNav,
) -> bool {
    let Some(report) = &model.report else {
        return false;
    };

    model.paging_category = Some(category_id);
    let request = ProductPageRequest {
        session_id: report.session_id.clone(),
        category_id,
        nav,
    };

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::product_page(request).await {
            Ok(page) => link.send_message(Msg::PanelUpdated(Box::new(page))),
            Err(e) => link.send_message(Msg::SetError(Some(e))),
        }
    });
    true
}

pub fn handle_panel_updated(model: &mut Model, panel: Box<ProductPageView>) -> bool {
    model.paging_category = None;
    if let Some(report) = &mut model.report {
        if let Some(existing) = report
            .panels
            .iter_mut()
            .find(|p| p.category_id == panel.category_id)
        {
            *existing = *panel;
            return true;
        }
    }
    false
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            let files = extract_image_files(&file_list);
            if !files.is_empty() {
                ctx.link().send_message(Msg::FilesAdded(files));
            }
        }
    }

    true
}
