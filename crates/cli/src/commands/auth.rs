//! Session commands.

use nexus_shop_client::store::StoreAction;
use nexus_shop_core::Email;
use secrecy::ExposeSecret;
use tracing::info;

use super::{CommandError, Context};

/// Log in, persisting the token and session user.
pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(e.to_string()))?;
    let session = ctx.client.login(email.as_str(), password).await?;

    ctx.tokens.save(session.token.expose_secret())?;
    let mut store = ctx.open_store();
    store.dispatch(StoreAction::SetUser(Some(session.user.clone())));

    info!("Logged in as {} ({})", session.user.name, session.user.role);
    Ok(())
}

/// Register a new account and log in as it.
pub async fn register(
    ctx: &Context,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(e.to_string()))?;
    let session = ctx.client.register(email.as_str(), password, name).await?;

    ctx.tokens.save(session.token.expose_secret())?;
    let mut store = ctx.open_store();
    store.dispatch(StoreAction::SetUser(Some(session.user.clone())));

    info!("Registered and logged in as {}", session.user.name);
    Ok(())
}

/// Log out: drop the token and clear session state, cart included.
pub fn logout(ctx: &Context) -> Result<(), CommandError> {
    ctx.tokens.clear()?;
    ctx.client.clear_auth_token();

    let mut store = ctx.open_store();
    store.dispatch(StoreAction::Logout);

    info!("Logged out");
    Ok(())
}

/// Show the user behind the current token.
pub async fn me(ctx: &Context) -> Result<(), CommandError> {
    let user = ctx.client.me().await?;
    info!("#{} {} <{}> role {}", user.id, user.name, user.email, user.role);
    Ok(())
}
