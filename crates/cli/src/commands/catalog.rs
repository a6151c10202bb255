//! Catalog browsing commands. None of these need a session.

use pasta_house_core::ProductId;
use pasta_house_storefront::models::{
    LatestProductsQuery, Product, ProductQuery, ReviewQuery,
};
use pasta_house_storefront::{ApiClient, ApiError};

/// One product per line: ID, name, price, stock.
#[allow(clippy::print_stdout)]
fn print_product_row(product: &Product) {
    let stock = if product.in_stock {
        format!("{} in stock", product.quantity)
    } else {
        "sold out".to_string()
    };
    println!(
        "{:>6}  {:<32}  {:>8}  {stock}",
        product.id, product.name, product.price
    );
}

/// # Errors
///
/// Returns the API error.
#[allow(clippy::print_stdout)]
pub async fn products(api: &ApiClient, query: &ProductQuery) -> Result<(), ApiError> {
    let list = api.products().list(query).await?;

    for product in &list.products {
        print_product_row(product);
    }
    println!(
        "page {} ({} per page), {} products",
        list.pagination.page, list.pagination.limit, list.pagination.total
    );
    Ok(())
}

/// # Errors
///
/// Returns the API error (404 for unknown IDs).
#[allow(clippy::print_stdout)]
pub async fn product(api: &ApiClient, id: ProductId) -> Result<(), ApiError> {
    let product = api.products().get(id).await?;

    println!("{} (#{})", product.name, product.id);
    println!("  price:    {}", product.price);
    println!("  rating:   {}", product.rating);
    println!("  stock:    {}", product.quantity);
    if let Some(category) = &product.category {
        println!("  category: {}", category.name);
    }
    if !product.tags.is_empty() {
        let tags: Vec<&str> = product.tags.iter().map(|t| t.name.as_str()).collect();
        println!("  tags:     {}", tags.join(", "));
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
    Ok(())
}

/// # Errors
///
/// Returns the API error.
pub async fn latest(api: &ApiClient, count: Option<u32>) -> Result<(), ApiError> {
    let products = api
        .products()
        .latest(&LatestProductsQuery { count })
        .await?;
    for product in &products {
        print_product_row(product);
    }
    Ok(())
}

/// # Errors
///
/// Returns the API error.
#[allow(clippy::print_stdout)]
pub async fn categories(api: &ApiClient) -> Result<(), ApiError> {
    for category in api.products().categories().await? {
        println!("{:>6}  {}", category.id, category.name);
    }
    Ok(())
}

/// # Errors
///
/// Returns the API error.
#[allow(clippy::print_stdout)]
pub async fn tags(api: &ApiClient) -> Result<(), ApiError> {
    for tag in api.products().tags().await? {
        println!("{:>6}  {}", tag.id, tag.name);
    }
    Ok(())
}

/// # Errors
///
/// Returns the API error.
#[allow(clippy::print_stdout)]
pub async fn reviews(api: &ApiClient, product: ProductId, page: Option<u32>) -> Result<(), ApiError> {
    let list = api
        .reviews()
        .list(product, &ReviewQuery { page, limit: None })
        .await?;

    for review in &list.reviews {
        println!("{}/5  {}", review.rating, review.comment);
    }
    println!("{} reviews", list.pagination.total);
    Ok(())
}
