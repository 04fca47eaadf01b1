//! Login, registration, logout, and identity commands.

#![allow(clippy::print_stdout)]

use saahaz_client::api::types::{ProfileUpdate, RegisterRequest};
use saahaz_client::store::{Store, StoreError};

/// Log in and persist the credential.
pub async fn login(store: &mut Store, email: &str, password: &str) -> Result<(), StoreError> {
    let user = store.login(email, password).await?;
    println!("Logged in as {} <{}>", user.name, user.email);
    if user.is_admin {
        println!("(admin account)");
    }
    Ok(())
}

/// Register a new account; on success behaves like login.
pub async fn register(
    store: &mut Store,
    email: String,
    password: String,
    name: String,
    address: Option<String>,
    phone: Option<String>,
) -> Result<(), StoreError> {
    let request = RegisterRequest {
        email,
        password,
        name,
        address,
        phone,
    };
    let user = store.register(&request).await?;
    println!("Registered and logged in as {} <{}>", user.name, user.email);
    Ok(())
}

/// Log out; the cart does not survive logout.
pub fn logout(store: &mut Store) {
    store.logout();
    println!("Logged out; cart cleared");
}

/// Show the profile, or update the fields that were given.
pub async fn profile(
    store: &mut Store,
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
) -> Result<(), StoreError> {
    if name.is_none() && phone.is_none() && address.is_none() {
        match store.session().user() {
            Some(user) => {
                println!("{} <{}>", user.name, user.email);
                if let Some(address) = &user.address {
                    println!("  Address: {address}");
                }
                if let Some(phone) = &user.phone {
                    println!("  Phone: {phone}");
                }
            }
            None => println!("Not logged in"),
        }
        return Ok(());
    }

    let update = ProfileUpdate {
        name,
        phone,
        address,
    };
    let user = store.update_profile(&update).await?;
    println!("Profile updated for {} <{}>", user.name, user.email);
    Ok(())
}

/// Show the logged-in user, if any.
pub fn whoami(store: &Store) {
    match store.session().user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            if user.is_admin {
                println!("(admin account)");
            }
        }
        None => println!("Not logged in"),
    }
}
