//! Products renderer.

use askama::Template;
use askama_web::WebTemplate;
use recdash_core::Product;

use super::{Layout, format_price};
use crate::store::Snapshot;

/// Product card for templates. Also used inside recommendation cards.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub price: String,
    pub rating: String,
    pub review_count: u64,
    /// Badge text, only for discounted products.
    pub discount: Option<String>,
    pub featured: bool,
    pub stock: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            subcategory: product.subcategory.clone(),
            price: format_price(product.price),
            rating: format!("{:.1}", product.rating),
            review_count: product.review_count,
            discount: product
                .has_discount()
                .then(|| format!("{}% off", product.discount_percentage)),
            featured: product.is_featured,
            stock: product.stock_quantity.map(|qty| match qty {
                0 => "Out of stock".to_string(),
                n => format!("{n} in stock"),
            }),
        }
    }
}

/// Products page template.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub layout: Layout,
    pub products: Vec<ProductCardView>,
}

impl ProductsTemplate {
    pub(super) fn build(layout: Layout, snapshot: &Snapshot) -> Self {
        Self {
            layout,
            products: snapshot.products.iter().map(ProductCardView::from).collect(),
        }
    }
}
