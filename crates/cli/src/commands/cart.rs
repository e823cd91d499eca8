//! Cart commands.
//!
//! Mutations go through the synchronizer, so they work identically for
//! guests (local, persisted) and logged-in sessions (remote).

use shopfront_client::{Result, Storefront};
use shopfront_core::ProductId;

pub fn show(app: &Storefront) {
    let snapshot = app.cart().store().snapshot();
    if snapshot.items.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for item in &snapshot.items {
        println!(
            "{:>6}  {:<40}  {:>3} x {:>8.2}  =  {:>10.2}",
            item.product_id.as_i64(),
            item.product_name,
            item.quantity,
            item.product_price,
            item.subtotal
        );
    }
    println!("total: {:.2}", snapshot.total_amount);
    if let Some(error) = &snapshot.error {
        println!("last error: {error}");
    }
}

pub async fn add(app: &Storefront, id: i64, quantity: u32) -> Result<()> {
    // The synchronizer needs the product's display fields for the guest
    // path, so resolve the product first either way.
    let product = app.catalog().get(ProductId::new(id)).await?;
    if !product.in_stock() {
        println!("{} is out of stock.", product.name);
        return Ok(());
    }

    app.cart().add_item(&product, quantity).await?;
    show(app);
    Ok(())
}

pub async fn remove(app: &Storefront, id: i64) -> Result<()> {
    app.cart().remove_item(ProductId::new(id)).await?;
    show(app);
    Ok(())
}

pub async fn set(app: &Storefront, id: i64, quantity: u32) -> Result<()> {
    if quantity == 0 {
        println!("Quantity must be at least 1; use `cart remove` instead.");
        return Ok(());
    }

    app.cart().update_quantity(ProductId::new(id), quantity).await?;
    show(app);
    Ok(())
}

pub async fn clear(app: &Storefront) -> Result<()> {
    app.cart().clear().await?;
    Ok(())
}
