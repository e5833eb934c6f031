/// Lowest accepted user Id (inclusive)
pub const MIN_USER_ID: u16 = 1000;

/// Highest accepted user Id (inclusive)
pub const MAX_USER_ID: u16 = 9999;

/// Default location of the persisted registry
pub const DEFAULT_REGISTRY_FILE: &str = "users.json";

/// Version written into every saved document
pub const DOCUMENT_VERSION: u32 = 1;

// =============================================================================
// Validation Patterns
// =============================================================================

pub const LOGIN_PATTERN: &str = r"^[a-zA-Z0-9]+$";

pub const PASSWORD_PATTERN: &str = r"^[a-zA-Z0-9]{8,}$";

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

pub const CREDIT_CARD_PATTERN: &str = r"^[0-9]{13,16}$";

/// Digit-only phone rule used by interactive registration
pub const PHONE_DIGITS_PATTERN: &str = r"^[0-9]{10,12}$";

/// Formatted Ukrainian phone rule from the declarative record annotations
pub const PHONE_INTERNATIONAL_PATTERN: &str = r"^\+38-0\d{2}-\d{3}-\d{2}-\d{2}$";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_INVALID_ID: &str = "Invalid Id. Id must be between 1000 and 9999.";

pub const ERR_INVALID_LOGIN: &str = "Login can only contain letters and numbers";

pub const ERR_INVALID_PASSWORD: &str =
    "Password must be at least 8 characters long and contain only letters and numbers";

pub const ERR_PASSWORD_MISMATCH: &str = "Password and confirm password do not match";

pub const ERR_INVALID_EMAIL: &str = "Invalid email address";

pub const ERR_INVALID_CREDIT_CARD: &str = "Invalid credit card number";

pub const ERR_INVALID_PHONE: &str = "Invalid phone number";

pub const MSG_INVALID_CHOICE: &str = "Invalid choice";
