use std::io::{BufRead, Write};

use crate::config::DuplicatePolicy;
use crate::error::Result;
use crate::models::User;
use crate::store::UserStore;
use crate::validation::{
    validate_confirm_password, validate_credit_card, validate_email, validate_id, validate_login,
    validate_password, validate_phone, Rules, ValidationError,
};
use crate::workflow::Console;

/// Register a new user
///
/// Prompts for each field in a fixed order: Id, login, password, confirm
/// password, email, credit card, phone. Every prompt repeats, printing the
/// field's rule, until its value is accepted. There is no way back to an
/// earlier field.
///
/// Returns the stored user.
///
/// # Duplicate Ids
/// - `Reject`: an Id already in the store is refused at the Id prompt
/// - `Overwrite`: the stored record is replaced once the new one is complete
pub fn register_user<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    store: &mut UserStore,
    rules: &Rules,
    policy: DuplicatePolicy,
) -> Result<User> {
    let id = loop {
        let input = console.prompt("Enter Id: ")?;
        match validate_id(&input) {
            Ok(id) if policy == DuplicatePolicy::Reject && store.contains(id) => {
                tracing::info!("Registration refused duplicate Id {}", id);
                console.println(format!("User with Id {id} already exists."))?;
            }
            Ok(id) => break id,
            Err(e) => console.println(e)?,
        }
    };

    let login = prompt_until(console, "Enter login: ", validate_login)?;
    let password = prompt_until(console, "Enter password: ", validate_password)?;
    let confirm_password = prompt_until(console, "Enter confirm password: ", |input| {
        validate_confirm_password(&password, input)
    })?;
    let email = prompt_until(console, "Enter email: ", validate_email)?;
    let credit_card = prompt_until(console, "Enter credit card: ", |input| {
        validate_credit_card(input, rules.enforce_luhn)
    })?;
    let phone = prompt_until(console, "Enter phone: ", |input| {
        validate_phone(input, rules.phone_rule)
    })?;

    let user = User {
        id,
        login,
        password,
        confirm_password,
        email,
        credit_card,
        phone,
    };

    match policy {
        DuplicatePolicy::Reject => store.insert(user.clone())?,
        DuplicatePolicy::Overwrite => {
            if store.upsert(user.clone()).is_some() {
                tracing::info!("Replaced existing user {}", user.id);
            }
        }
    }

    tracing::info!("New user registered: {}", user.id);
    console.println("User registered successfully")?;

    Ok(user)
}

/// Keep prompting until `check` accepts the line, then return it
fn prompt_until<R, W, F>(console: &mut Console<R, W>, prompt: &str, check: F) -> Result<String>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> std::result::Result<(), ValidationError>,
{
    loop {
        let input = console.prompt(prompt)?;
        match check(&input) {
            Ok(()) => return Ok(input),
            Err(e) => console.println(e)?,
        }
    }
}
