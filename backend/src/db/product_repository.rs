use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use shared::ProductCard;

/// Read-only access to the product recommendations table. Items carry a
/// `Problem` attribute matching a category display name.
#[derive(Clone)]
pub struct ProductRepository {
    client: Client,
    table: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
    #[error("Invalid data format: {0}")]
    InvalidData(String),
}

impl ProductRepository {
    pub fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }

    /// All products recommended for one skin problem, sorted by name so
    /// pagination sees a stable order across requests.
    pub async fn products_for(&self, problem: &str) -> Result<Vec<ProductCard>, RepositoryError> {
        let result = self
            .client
            .scan()
            .table_name(&self.table)
            .filter_expression("Problem = :problem")
            .expression_attribute_values(":problem", AttributeValue::S(problem.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::DynamoDb(e.to_string()))?;

        let mut products = Vec::new();
        if let Some(items) = result.items {
            for item in items {
                products.push(parse_product_from_item(item)?);
            }
        }

        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

fn parse_product_from_item(
    item: HashMap<String, AttributeValue>,
) -> Result<ProductCard, RepositoryError> {
    let name = item
        .get("Product")
        .and_then(|v| v.as_s().ok())
        .ok_or_else(|| RepositoryError::InvalidData("Invalid Product name".to_string()))?
        .clone();

    let description = item
        .get("Description")
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_else(|| "No description available.".to_string());

    let price = item
        .get("Price")
        .and_then(|v| v.as_n().ok())
        .and_then(|s| s.parse::<f64>().ok());

    let image_url = item
        .get("Img_URL")
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default();

    let product_url = item
        .get("Prod_URL")
        .and_then(|v| v.as_s().ok())
        .cloned()
        .unwrap_or_default();

    Ok(ProductCard {
        name,
        description,
        price,
        image_url,
        product_url,
    })
}
