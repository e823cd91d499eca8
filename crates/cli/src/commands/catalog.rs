//! Catalog browsing commands.

use shopfront_client::catalog::{ProductFilters, SortBy};
use shopfront_client::{Result, Storefront};
use shopfront_core::{CategoryId, Page, Product, ProductId};

pub async fn list(
    app: &Storefront,
    category: Option<i64>,
    search: Option<String>,
    sort: Option<SortBy>,
    in_stock: bool,
    page: u32,
    size: u32,
) -> Result<()> {
    let filters = ProductFilters {
        category_id: category.map(CategoryId::new),
        search,
        sort_by: sort,
        in_stock,
        page: Some(page),
        size: Some(size),
    };
    let listing = app.catalog().list(&filters).await?;
    print_listing(&listing);
    Ok(())
}

pub async fn show(app: &Storefront, id: i64) -> Result<()> {
    let product = app.catalog().get(ProductId::new(id)).await?;
    print_product(&product);
    Ok(())
}

fn print_listing(listing: &Page<Product>) {
    if listing.content.is_empty() {
        println!("No products found.");
        return;
    }

    for product in &listing.content {
        let stock = if product.in_stock() { "" } else { "  [out of stock]" };
        println!(
            "{:>6}  {:<40}  {:>10.2}{stock}",
            product.id.as_i64(),
            product.name,
            product.price
        );
    }
    println!(
        "page {}/{} ({} products)",
        listing.number + 1,
        listing.total_pages.max(1),
        listing.total_elements
    );
}

fn print_product(product: &Product) {
    println!("{} (#{})", product.name, product.id);
    println!("  price: {:.2}", product.price);
    if let Some(description) = &product.description {
        println!("  {description}");
    }
    match product.stock_quantity {
        Some(0) => println!("  out of stock"),
        Some(n) => println!("  {n} in stock"),
        None => {}
    }
}
