//! Username validation and generation for the register flow.

use rand::prelude::IndexedRandom;
use thiserror::Error;

pub const MIN_LEN: usize = 8;
pub const MAX_LEN: usize = 40;

/// Characters a username may never contain.
const SPECIAL_CHARS: &[char] = &['!', '@', '#', '$', '%', '&', '*'];

/// Alphabet for generated usernames.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const GENERATED_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username must be at least {MIN_LEN} characters")]
    TooShort,
    #[error("username must be at most {MAX_LEN} characters")]
    TooLong,
    #[error("username must not contain '{0}'")]
    SpecialChar(char),
    #[error("username must include at least one number")]
    NoDigit,
}

pub fn validate(username: &str) -> Result<(), UsernameError> {
    let length = username.chars().count();
    if length < MIN_LEN {
        return Err(UsernameError::TooShort);
    }
    if length > MAX_LEN {
        return Err(UsernameError::TooLong);
    }
    if let Some(c) = username.chars().find(|c| SPECIAL_CHARS.contains(c)) {
        return Err(UsernameError::SpecialChar(c));
    }
    if !username.chars().any(|c| c.is_ascii_digit()) {
        return Err(UsernameError::NoDigit);
    }
    Ok(())
}

/// Generate an 8-character username of uppercase letters and digits.
/// Redraws on the rare all-letter result so the output always validates.
pub fn generate() -> String {
    let mut rng = rand::rng();
    loop {
        let candidate: String = (0..GENERATED_LEN)
            .map(|_| *ALPHABET.choose(&mut rng).expect("alphabet not empty") as char)
            .collect();
        if validate(&candidate).is_ok() {
            return candidate;
        }
    }
}
