use gloo_console::error;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use shared::{AnalysisReport, ProductPageRequest, ProductPageView};

/// Uploads one image to the analysis endpoint and returns the report.
pub async fn analyze(file: GlooFile) -> Result<AnalysisReport, String> {
    let form_data = web_sys::FormData::new()
        .map_err(|_| "Failed to build form data".to_string())?;
    form_data
        .append_with_blob("image", file.as_ref())
        .map_err(|_| "Failed to attach image".to_string())?;

    let request = Request::post("/api/analyze")
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    match request.send().await {
        Ok(response) if response.ok() => response
            .json::<AnalysisReport>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e)),
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(format!("Server error: {} - {}", status, body))
        }
        Err(e) => {
            error!(format!("Network error: {:?}", e));
            Err(format!("Network error: {}", e))
        }
    }
}

/// Fetches one product page for a category within the current session.
pub async fn product_page(page_request: ProductPageRequest) -> Result<ProductPageView, String> {
    let request = Request::post("/api/products/page")
        .json(&page_request)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    match request.send().await {
        Ok(response) if response.ok() => response
            .json::<ProductPageView>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e)),
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(format!("Server error: {} - {}", status, body))
        }
        Err(e) => {
            error!(format!("Network error: {:?}", e));
            Err(format!("Network error: {}", e))
        }
    }
}
