//! Session and account commands.

use shopfront_client::auth::RegisterRequest;
use shopfront_client::{Result, Storefront};

pub async fn login(app: &Storefront, email: &str, password: &str) -> Result<()> {
    let user = app.login(email, password).await?;
    println!("Logged in as {}", user.display_name());
    Ok(())
}

pub async fn register(
    app: &Storefront,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<()> {
    let user = app
        .register(&RegisterRequest {
            email,
            password,
            first_name,
            last_name,
        })
        .await?;
    println!("Registered as {}", user.display_name());
    Ok(())
}

pub async fn logout(app: &Storefront) {
    app.logout().await;
}

pub fn whoami(app: &Storefront) {
    match app.session().user() {
        Some(user) => {
            let role = if user.is_admin() { " (admin)" } else { "" };
            println!("{} <{}>{role}", user.display_name(), user.email);
        }
        None => println!("Not logged in (guest cart active)."),
    }
}
