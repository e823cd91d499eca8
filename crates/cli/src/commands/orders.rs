//! Checkout and order history commands.

use shopfront_client::{Result, Storefront};
use shopfront_core::{CheckoutRequest, Order, OrderId};

pub async fn checkout(
    app: &Storefront,
    address: String,
    payment_method: Option<String>,
) -> Result<()> {
    let order = app
        .checkout(&CheckoutRequest {
            shipping_address: address,
            payment_method_id: payment_method,
        })
        .await?;
    print_order(&order);
    Ok(())
}

pub async fn list(app: &Storefront) -> Result<()> {
    let orders = app.orders().list().await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in &orders {
        let placed = order
            .created_at
            .map_or_else(String::new, |at| at.format("  %Y-%m-%d").to_string());
        println!(
            "{:>6}  {:<10}  {:>10.2}{placed}",
            order.id.as_i64(),
            order.status.label(),
            order.total_amount
        );
    }
    Ok(())
}

pub async fn show(app: &Storefront, id: i64) -> Result<()> {
    let order = app.orders().get(OrderId::new(id)).await?;
    print_order(&order);
    Ok(())
}

fn print_order(order: &Order) {
    println!("Order #{} - {}", order.id, order.status.label());
    for item in &order.items {
        println!(
            "  {:<40}  {:>3} x {:>8.2}  =  {:>10.2}",
            item.product_name, item.quantity, item.unit_price, item.subtotal
        );
    }
    println!("  total: {:.2}", order.total_amount);
    if let Some(address) = &order.shipping_address {
        println!("  ship to: {address}");
    }
}
