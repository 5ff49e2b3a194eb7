//! Validated input wrappers for the form layer. The stores accept whatever
//! they are given; presence and shape checks happen here, at the prompts.

use derive_more::derive::Display;
use inquire::Text;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Failed to compile email regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9 \-]{6,14}$").expect("Failed to compile phone regex")
});

#[derive(Debug, Clone, Copy, Display, Error)]
#[display("invalid input")]
pub struct InvalidInput;

/// Wrapper type for an email address that has been shape-checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct EmailAddress(String);

impl TryFrom<String> for EmailAddress {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if EMAIL_REGEX.is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(InvalidInput)
        }
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = InvalidInput;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wrapper type for a phone number that has been shape-checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display)]
pub struct Phone(String);

impl TryFrom<String> for Phone {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if PHONE_REGEX.is_match(trimmed) {
            Ok(Self(trimmed.to_owned()))
        } else {
            Err(InvalidInput)
        }
    }
}

impl TryFrom<&str> for Phone {
    type Error = InvalidInput;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_owned())
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prompts until a well-formed email address is entered.
pub fn email_input(message: &str) -> EmailAddress {
    loop {
        let raw = Text::new(message).prompt().unwrap_or_default();
        match EmailAddress::try_from(raw) {
            Ok(email) => return email,
            Err(_) => println!("Please enter a valid email address, e.g. name@example.com"),
        }
    }
}

/// Prompts until a plausible phone number is entered.
pub fn phone_input(message: &str) -> Phone {
    loop {
        let raw = Text::new(message).prompt().unwrap_or_default();
        match Phone::try_from(raw) {
            Ok(phone) => return phone,
            Err(_) => println!("Please enter a phone number of 7 to 15 digits"),
        }
    }
}
