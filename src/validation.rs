//! Field rules for user records
//!
//! Every rule is a pure predicate returning a [`ValidationError`] that carries
//! the message shown to the user. The interactive retry loops live in
//! [`crate::workflow::register`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::constants::*;
use crate::models::User;

static LOGIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(LOGIN_PATTERN).unwrap());
static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(PASSWORD_PATTERN).unwrap());
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).unwrap());
static CREDIT_CARD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CREDIT_CARD_PATTERN).unwrap());
static PHONE_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_DIGITS_PATTERN).unwrap());
static PHONE_INTERNATIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_INTERNATIONAL_PATTERN).unwrap());

/// User record fields, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Login,
    Password,
    ConfirmPassword,
    Email,
    CreditCard,
    Phone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Id => "Id",
            Field::Login => "Login",
            Field::Password => "Password",
            Field::ConfirmPassword => "ConfirmPassword",
            Field::Email => "Email",
            Field::CreditCard => "CreditCard",
            Field::Phone => "Phone",
        };
        f.write_str(name)
    }
}

/// A rejected field value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Which phone format is accepted.
///
/// The two formats disagree: interactive registration historically took
/// plain digits while the record annotations demanded `+38-0NN-NNN-NN-NN`.
/// Neither is implied; the active one is picked in [`crate::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneRule {
    /// 10 to 12 digits, nothing else
    #[default]
    Digits,
    /// `+38-0NN-NNN-NN-NN`
    International,
}

impl PhoneRule {
    pub fn pattern(&self) -> &'static str {
        match self {
            PhoneRule::Digits => PHONE_DIGITS_PATTERN,
            PhoneRule::International => PHONE_INTERNATIONAL_PATTERN,
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            PhoneRule::Digits => &*PHONE_DIGITS_RE,
            PhoneRule::International => &*PHONE_INTERNATIONAL_RE,
        }
    }
}

impl FromStr for PhoneRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "digits" => Ok(PhoneRule::Digits),
            "international" => Ok(PhoneRule::International),
            other => Err(format!("Unknown phone rule: {other}")),
        }
    }
}

/// Parse an Id and check it lies in 1000..=9999
pub fn validate_id(input: &str) -> Result<u16, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| (i64::from(MIN_USER_ID)..=i64::from(MAX_USER_ID)).contains(id))
        .map(|id| id as u16)
        .ok_or(ValidationError::new(Field::Id, ERR_INVALID_ID))
}

pub fn validate_login(input: &str) -> Result<(), ValidationError> {
    check(&LOGIN_RE, input, Field::Login, ERR_INVALID_LOGIN)
}

pub fn validate_password(input: &str) -> Result<(), ValidationError> {
    check(&PASSWORD_RE, input, Field::Password, ERR_INVALID_PASSWORD)
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::new(
            Field::ConfirmPassword,
            ERR_PASSWORD_MISMATCH,
        ))
    }
}

pub fn validate_email(input: &str) -> Result<(), ValidationError> {
    check(&EMAIL_RE, input, Field::Email, ERR_INVALID_EMAIL)
}

/// 13 to 16 digits, optionally followed by the Luhn checksum
pub fn validate_credit_card(input: &str, enforce_luhn: bool) -> Result<(), ValidationError> {
    check(&CREDIT_CARD_RE, input, Field::CreditCard, ERR_INVALID_CREDIT_CARD)?;
    if enforce_luhn && !luhn_check(input) {
        return Err(ValidationError::new(
            Field::CreditCard,
            ERR_INVALID_CREDIT_CARD,
        ));
    }
    Ok(())
}

pub fn validate_phone(input: &str, rule: PhoneRule) -> Result<(), ValidationError> {
    check(rule.regex(), input, Field::Phone, ERR_INVALID_PHONE)
}

/// Luhn mod-10 checksum over the digits of `input`.
///
/// Non-digit characters are skipped, so `4111-1111-1111-1111` checks the same
/// as `4111111111111111`. Input without any digits sums to zero and passes.
pub fn luhn_check(input: &str) -> bool {
    let sum: u32 = input
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

fn check(
    re: &Regex,
    input: &str,
    field: Field,
    message: &'static str,
) -> Result<(), ValidationError> {
    if re.is_match(input) {
        Ok(())
    } else {
        tracing::debug!("Rejected {} value", field);
        Err(ValidationError::new(field, message))
    }
}

/// The active rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    pub phone_rule: PhoneRule,
    pub enforce_luhn: bool,
}

impl Rules {
    /// Check every field of an already-assembled record.
    ///
    /// Collects all violations instead of stopping at the first one.
    pub fn validate_user(&self, user: &User) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !(MIN_USER_ID..=MAX_USER_ID).contains(&user.id) {
            errors.push(ValidationError::new(Field::Id, ERR_INVALID_ID));
        }

        let results = [
            validate_login(&user.login),
            validate_password(&user.password),
            validate_confirm_password(&user.password, &user.confirm_password),
            validate_email(&user.email),
            validate_credit_card(&user.credit_card, self.enforce_luhn),
            validate_phone(&user.phone, self.phone_rule),
        ];
        errors.extend(results.into_iter().filter_map(|r| r.err()));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
