//! Sign in, sign up, sign out and the current account.

use clap::Args;

use storefront_client::Store;
use storefront_core::types::{Credentials, Registration};
use storefront_core::validation::{validate_email, validate_name, validate_password, validate_required};

use super::{failed, invalid, signed_in};
use crate::views::notify::Notice;

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn login(store: &Store, args: LoginArgs) -> anyhow::Result<()> {
    validate_email(&args.email).map_err(invalid)?;
    validate_required("password", &args.password).map_err(invalid)?;

    store
        .login(Credentials {
            email: args.email.trim().to_string(),
            password: args.password,
        })
        .await
        .map_err(failed)?;

    let name = store
        .state()
        .auth
        .user
        .as_ref()
        .map(|user| user.name.clone())
        .unwrap_or_default();
    Notice::success(format!("Welcome back, {name}")).emit();
    Ok(())
}

pub async fn register(store: &Store, args: RegisterArgs) -> anyhow::Result<()> {
    validate_name("name", &args.name).map_err(invalid)?;
    validate_email(&args.email).map_err(invalid)?;
    validate_password(&args.password).map_err(invalid)?;

    store
        .register(Registration {
            name: args.name.trim().to_string(),
            email: args.email.trim().to_string(),
            password: args.password,
        })
        .await
        .map_err(failed)?;

    Notice::success("Account created. Please log in.").emit();
    Ok(())
}

pub fn logout(store: &Store) {
    store.logout();
    Notice::success("Signed out").emit();
}

pub async fn whoami(store: &Store) -> anyhow::Result<()> {
    if !signed_in(store) {
        return Ok(());
    }
    let missing = store.state().auth.user.is_none();
    if missing {
        store.fetch_current_user().await.map_err(failed)?;
    }

    let state = store.state();
    if let Some(user) = &state.auth.user {
        println!("{} <{}>", user.name, user.email);
        println!("Role: {}", user.role);
        if let Some(since) = user.created_at {
            println!("Member since {}", since.format("%Y-%m-%d"));
        }
    }
    Ok(())
}
