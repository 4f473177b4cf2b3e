use agrolead_lead::Product;

use crate::{ContentQuery, ContentSource};

const PRODUCT_BY_SLUG: &str =
    r#"*[_type == "product" && slug.current == $slug][0]{ leadProduct }"#;

pub fn product_query(slug: &str, revalidate_secs: u64) -> ContentQuery {
    ContentQuery::new(PRODUCT_BY_SLUG)
        .param("slug", slug)
        .revalidate(revalidate_secs)
        .tag("product")
        .tag(format!("product:{slug}"))
}

/// Product to pre-fill on lead forms opened from a product page.
///
/// The form must stay usable when the CMS is down, so every failure yields
/// `None`.
pub async fn preselected_product<S: ContentSource + ?Sized>(
    source: &S,
    slug: &str,
    revalidate_secs: u64,
) -> Option<Product> {
    let document = match source.fetch(&product_query(slug, revalidate_secs)).await {
        Ok(document) => document?,
        Err(e) => {
            tracing::warn!(slug, error = %e, "unable to load product document");
            return None;
        }
    };

    let value = document.get("leadProduct")?.as_str()?;
    match value.parse() {
        Ok(product) => Some(product),
        Err(_) => {
            tracing::warn!(slug, value, "product document references an unknown lead product");
            None
        }
    }
}
