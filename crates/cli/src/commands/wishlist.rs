//! Wishlist commands. All of them require a logged-in session.

use shopfront_client::wishlist::Wishlist;
use shopfront_client::{Result, Storefront};
use shopfront_core::ProductId;

pub async fn show(app: &Storefront) -> Result<()> {
    let wishlist = app.wishlist().fetch().await?;
    print_wishlist(&wishlist);
    Ok(())
}

pub async fn add(app: &Storefront, id: i64) -> Result<()> {
    let wishlist = app.wishlist().add(ProductId::new(id)).await?;
    print_wishlist(&wishlist);
    Ok(())
}

pub async fn remove(app: &Storefront, id: i64) -> Result<()> {
    let wishlist = app.wishlist().remove(ProductId::new(id)).await?;
    print_wishlist(&wishlist);
    Ok(())
}

fn print_wishlist(wishlist: &Wishlist) {
    if wishlist.items.is_empty() {
        println!("Your wishlist is empty.");
        return;
    }

    for product in &wishlist.items {
        println!(
            "{:>6}  {:<40}  {:>10.2}",
            product.id.as_i64(),
            product.name,
            product.price
        );
    }
}
