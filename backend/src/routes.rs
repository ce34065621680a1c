use actix_files::Files;
use actix_multipart::Multipart;
use actix_web::{Error, HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{error, info};
use serde_json::json;
use shared::{
    AnalysisReport, Category, ErrorResponse, OverlayView, PageNav, ProductPageRequest,
    ProductPageView,
};
use std::io::Write;
use uuid::Uuid;

use crate::analysis::{aggregator, filter, overlay};
use crate::db::product_repository::ProductRepository;
use crate::inference::config::AnalysisConfig;
use crate::inference::model::SkinModels;
use crate::session::paginator;
use crate::session::store::SessionStore;

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    cfg.service(web::resource("/api/analyze").route(web::post().to(handle_analyze)))
        .service(web::resource("/api/products/page").route(web::post().to(handle_product_page)))
        .service(Files::new("/static", frontend_dir).show_files_listing());
}

async fn handle_analyze(
    models: web::Data<SkinModels>,
    products: web::Data<ProductRepository>,
    sessions: web::Data<SessionStore>,
    config: web::Data<AnalysisConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    let mut image_data = Vec::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            image_data.write_all(&data)?;
        }
        // One upload per analysis; ignore any extra parts.
        if !image_data.is_empty() {
            break;
        }
    }

    if image_data.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "error": "No image uploaded"
        })));
    }

    let image = match image::load_from_memory(&image_data) {
        Ok(decoded) => decoded.to_rgb8(),
        Err(e) => {
            error!("Failed to decode uploaded image: {}", e);
            return Ok(HttpResponse::BadRequest().json(json!({
                "error": format!("Could not decode uploaded image: {}", e)
            })));
        }
    };

    let skin_type = match models.classify(&image) {
        Ok(label) => label,
        Err(e) => {
            error!("Skin type classification failed: {:?}", e);
            return Ok(analysis_unavailable());
        }
    };

    let detections = match models.segment(&image) {
        Ok(detections) => detections,
        Err(e) => {
            error!("Skin problem segmentation failed: {:?}", e);
            return Ok(analysis_unavailable());
        }
    };

    let aggregation = aggregator::aggregate(&detections, image.width(), image.height());
    let problems = filter::skin_problems(&aggregation.detected);

    let session_id = sessions.begin();
    let mut overlays = Vec::new();
    let mut panels = Vec::new();

    for &category_id in &aggregation.detected {
        let mask = &aggregation.masks[&category_id];
        let blended = overlay::composite(
            &image,
            mask,
            config.overlay.base_weight,
            config.overlay.mask_weight,
        );
        let encoded = match overlay::to_png_base64(&blended) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Failed to encode overlay for category {}: {}", category_id, e);
                return Ok(analysis_unavailable());
            }
        };

        let label = Category::from_id(category_id)
            .map(|category| category.display_name().to_string())
            .unwrap_or_else(|| format!("Category {}", category_id));
        overlays.push(OverlayView {
            category_id,
            label,
            image_base64: encoded,
        });

        // Product panels exist only for conditions the store can be
        // asked about by display name.
        let Some(category) = Category::from_id(category_id) else {
            continue;
        };
        let items = match products.products_for(category.display_name()).await {
            Ok(items) => items,
            Err(e) => {
                error!(
                    "Product lookup failed for {}: {:?}",
                    category.display_name(),
                    e
                );
                return Ok(analysis_unavailable());
            }
        };

        let total = items.len();
        let offset = sessions
            .navigate(session_id, category_id, PageNav::Stay, total)
            .unwrap_or(0);
        panels.push(ProductPageView {
            category_id,
            items: items[paginator::window(offset, total)].to_vec(),
            offset,
            total,
        });
    }

    info!(
        "Analyzed upload: skin type '{}', {} condition(s) detected",
        skin_type,
        aggregation.detected.len()
    );

    Ok(HttpResponse::Ok().json(AnalysisReport {
        session_id: session_id.to_string(),
        skin_type,
        detected: aggregation.detected.iter().copied().collect(),
        skin_problems: problems
            .iter()
            .map(|category| category.display_name().to_string())
            .collect(),
        overlays,
        panels,
    }))
}

async fn handle_product_page(
    products: web::Data<ProductRepository>,
    sessions: web::Data<SessionStore>,
    request: web::Json<ProductPageRequest>,
) -> HttpResponse {
    let request = request.into_inner();

    let session_id = match Uuid::parse_str(&request.session_id) {
        Ok(uuid) => uuid,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid session id".into(),
            });
        }
    };

    let Some(category) = Category::from_id(request.category_id) else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("Unknown category id {}", request.category_id),
        });
    };

    let items = match products.products_for(category.display_name()).await {
        Ok(items) => items,
        Err(e) => {
            error!(
                "Product lookup failed for {}: {:?}",
                category.display_name(),
                e
            );
            return analysis_unavailable();
        }
    };

    let total = items.len();
    let Some(offset) = sessions.navigate(session_id, request.category_id, request.nav, total)
    else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Unknown session".into(),
        });
    };

    HttpResponse::Ok().json(ProductPageView {
        category_id: request.category_id,
        items: items[paginator::window(offset, total)].to_vec(),
        offset,
        total,
    })
}

fn analysis_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "Analysis unavailable".into(),
    })
}
