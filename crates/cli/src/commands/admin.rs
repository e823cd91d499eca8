//! Admin commands. The backend enforces the admin role.

use rust_decimal::Decimal;
use shopfront_client::admin::ProductInput;
use shopfront_client::auth::RegisterRequest;
use shopfront_client::{Result, Storefront};
use shopfront_core::{CategoryId, OrderId, OrderStatus, ProductId, UserId};

pub async fn create_product(
    app: &Storefront,
    name: String,
    description: Option<String>,
    price: Decimal,
    category: Option<i64>,
    stock: Option<u32>,
) -> Result<()> {
    let product = app
        .admin()
        .create_product(&ProductInput {
            name,
            description,
            price,
            image_url: None,
            category_id: category.map(CategoryId::new),
            stock_quantity: stock,
        })
        .await?;
    println!("Created product #{}: {}", product.id, product.name);
    Ok(())
}

pub async fn update_product(
    app: &Storefront,
    id: i64,
    name: String,
    description: Option<String>,
    price: Decimal,
    category: Option<i64>,
    stock: Option<u32>,
) -> Result<()> {
    let product = app
        .admin()
        .update_product(
            ProductId::new(id),
            &ProductInput {
                name,
                description,
                price,
                image_url: None,
                category_id: category.map(CategoryId::new),
                stock_quantity: stock,
            },
        )
        .await?;
    println!("Updated product #{}: {}", product.id, product.name);
    Ok(())
}

pub async fn delete_product(app: &Storefront, id: i64) -> Result<()> {
    app.admin().delete_product(ProductId::new(id)).await?;
    println!("Deleted product #{id}");
    Ok(())
}

pub async fn list_orders(app: &Storefront, page: u32, size: u32) -> Result<()> {
    let orders = app.admin().list_orders(page, size).await?;
    for order in &orders.content {
        println!(
            "{:>6}  {:<10}  {:>10.2}",
            order.id.as_i64(),
            order.status.label(),
            order.total_amount
        );
    }
    println!(
        "page {}/{} ({} orders)",
        orders.number + 1,
        orders.total_pages.max(1),
        orders.total_elements
    );
    Ok(())
}

pub async fn set_order_status(app: &Storefront, id: i64, status: OrderStatus) -> Result<()> {
    let order = app
        .admin()
        .update_order_status(OrderId::new(id), status)
        .await?;
    println!("Order #{} is now {}", order.id, order.status.label());
    Ok(())
}

pub async fn list_users(app: &Storefront, page: u32, size: u32) -> Result<()> {
    let users = app.admin().list_users(page, size).await?;
    for user in &users.content {
        let state = if user.enabled { "" } else { "  [disabled]" };
        println!(
            "{:>6}  {:<30}  {}{state}",
            user.id.as_i64(),
            user.email,
            user.display_name()
        );
    }
    println!(
        "page {}/{} ({} users)",
        users.number + 1,
        users.total_pages.max(1),
        users.total_elements
    );
    Ok(())
}

pub async fn set_user_enabled(app: &Storefront, id: i64, enabled: bool) -> Result<()> {
    let user = app
        .admin()
        .update_user_status(UserId::new(id), enabled)
        .await?;
    let state = if user.enabled { "enabled" } else { "disabled" };
    println!("User {} is now {state}", user.email);
    Ok(())
}

pub async fn register_admin(
    app: &Storefront,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    let user = app
        .admin()
        .register_admin(&RegisterRequest {
            email,
            password,
            first_name,
            last_name,
        })
        .await?;
    println!("Created admin account {} (#{})", user.email, user.id);
    Ok(())
}
