// Field validation — applied before any URL is built or contact saved
//
// Phone rules apply to the FULL number (dial code already prepended).

use thiserror::Error;

pub const PHONE_MIN_LEN: usize = 7;
pub const PHONE_MAX_LEN: usize = 20;
pub const MESSAGE_MAX_LEN: usize = 500;
pub const NAME_MAX_LEN: usize = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("phone number is required")]
    PhoneRequired,

    #[error("phone number must be at least {PHONE_MIN_LEN} digits")]
    PhoneTooShort,

    #[error("phone number must be at most {PHONE_MAX_LEN} digits")]
    PhoneTooLong,

    #[error("phone number must contain only numbers, +, spaces, or -")]
    PhoneInvalidChars,

    #[error("message must be at most {MESSAGE_MAX_LEN} characters")]
    MessageTooLong,

    #[error("message text is required")]
    MessageRequired,

    #[error("name is required")]
    NameRequired,

    #[error("name must be at most {NAME_MAX_LEN} characters")]
    NameTooLong,
}

/// Validate a full phone number (`+` prefix and separators allowed).
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::PhoneRequired);
    }
    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == ' ' || c == '-')
    {
        return Err(ValidationError::PhoneInvalidChars);
    }
    let len = phone.chars().count();
    if len < PHONE_MIN_LEN {
        return Err(ValidationError::PhoneTooShort);
    }
    if len > PHONE_MAX_LEN {
        return Err(ValidationError::PhoneTooLong);
    }
    Ok(())
}

/// Validate an optional chat message.
pub fn validate_message(message: &str) -> Result<(), ValidationError> {
    if message.chars().count() > MESSAGE_MAX_LEN {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(())
}

/// Validate a contact name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_boundaries() {
        assert_eq!(validate_phone(""), Err(ValidationError::PhoneRequired));
        assert_eq!(validate_phone("123456"), Err(ValidationError::PhoneTooShort));
        assert!(validate_phone("1234567").is_ok());
        assert!(validate_phone("+3461234567890123456").is_ok()); // 20 chars
        assert_eq!(
            validate_phone("+34612345678901234567"), // 21 chars
            Err(ValidationError::PhoneTooLong)
        );
    }

    #[test]
    fn test_phone_charset() {
        assert!(validate_phone("+34 612-345-678").is_ok());
        assert_eq!(
            validate_phone("+34(612)345"),
            Err(ValidationError::PhoneInvalidChars)
        );
        assert_eq!(
            validate_phone("phone123"),
            Err(ValidationError::PhoneInvalidChars)
        );
    }

    #[test]
    fn test_message_boundary() {
        assert!(validate_message("").is_ok());
        assert!(validate_message(&"x".repeat(500)).is_ok());
        assert_eq!(
            validate_message(&"x".repeat(501)),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_name_boundaries() {
        assert_eq!(validate_name("   "), Err(ValidationError::NameRequired));
        assert!(validate_name("Alice").is_ok());
        assert!(validate_name(&"a".repeat(50)).is_ok());
        assert_eq!(
            validate_name(&"a".repeat(51)),
            Err(ValidationError::NameTooLong)
        );
    }
}
