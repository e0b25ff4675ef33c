//! Unified error codes for the tea shop platform
//!
//! This module defines all error codes shared by the API server and the
//! storefront / back office clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Cart errors
//! - 4xxx: Order errors
//! - 5xxx: Discount errors
//! - 6xxx: Catalog errors
//! - 7xxx: Shipping and address errors
//! - 8xxx: Content errors (blog, landing page)
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Email is already registered
    EmailAlreadyRegistered = 1006,
    /// Password too short
    PasswordTooShort = 1007,
    /// Too many login / register attempts
    TooManyAttempts = 1008,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Admins cannot demote or disable themselves
    CannotModifySelf = 2003,

    // ==================== 3xxx: Cart ====================
    /// Cart item not found
    CartItemNotFound = 3001,
    /// Cart is empty
    CartEmpty = 3002,
    /// Cart quantity out of range
    CartQuantityInvalid = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Order status transition not allowed
    InvalidStatusTransition = 4003,
    /// Order can no longer be cancelled
    OrderNotCancellable = 4004,
    /// Not enough stock for a SKU
    InsufficientStock = 4006,

    // ==================== 5xxx: Discount ====================
    /// Discount code not found
    DiscountNotFound = 5001,
    /// Discount code already exists
    DiscountCodeExists = 5002,
    /// Discount is disabled
    DiscountInactive = 5003,
    /// Discount validity window has not started
    DiscountNotStarted = 5004,
    /// Discount validity window has ended
    DiscountExpired = 5005,
    /// Discount usage limit reached
    DiscountUsageLimitReached = 5006,
    /// Order value below discount minimum
    DiscountMinOrderNotMet = 5007,
    /// Per-user usage limit reached
    DiscountUserLimitReached = 5008,
    /// End date is not after start date
    DiscountInvalidDateRange = 5009,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// SKU not found
    SkuNotFound = 6002,
    /// SKU is not available for sale
    SkuInactive = 6003,
    /// SKU code already exists
    SkuCodeExists = 6004,
    /// Product slug already exists
    ProductSlugExists = 6005,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category still has products
    CategoryHasProducts = 6102,
    /// Category name already exists
    CategoryNameExists = 6103,

    // ==================== 7xxx: Shipping / Address ====================
    /// Shipping config not found
    ShipConfigNotFound = 7001,
    /// No active shipping config
    NoActiveShipConfig = 7002,
    /// Province not found
    ProvinceNotFound = 7101,
    /// District not found
    DistrictNotFound = 7102,
    /// Ward not found
    WardNotFound = 7103,
    /// Ward/district/province do not belong together
    AddressMismatch = 7104,

    // ==================== 8xxx: Content ====================
    /// Blog post not found
    BlogNotFound = 8001,
    /// Blog slug already exists
    BlogSlugExists = 8002,
    /// Landing section not found
    LandingSectionNotFound = 8101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::EmailAlreadyRegistered => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password is too short",
            ErrorCode::TooManyAttempts => "Too many attempts, try again later",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Administrator role is required",
            ErrorCode::CannotModifySelf => "Cannot change your own role or status",

            // Cart
            ErrorCode::CartItemNotFound => "Cart item not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::CartQuantityInvalid => "Cart quantity is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no items",
            ErrorCode::InvalidStatusTransition => "Order status transition is not allowed",
            ErrorCode::OrderNotCancellable => "Order can no longer be cancelled",
            ErrorCode::InsufficientStock => "Insufficient stock",

            // Discount
            ErrorCode::DiscountNotFound => "Discount code not found",
            ErrorCode::DiscountCodeExists => "Discount code already exists",
            ErrorCode::DiscountInactive => "Discount code is not active",
            ErrorCode::DiscountNotStarted => "Discount code is not valid yet",
            ErrorCode::DiscountExpired => "Discount code has expired",
            ErrorCode::DiscountUsageLimitReached => "Discount code usage limit reached",
            ErrorCode::DiscountMinOrderNotMet => "Order value is below the discount minimum",
            ErrorCode::DiscountUserLimitReached => "You have already used this discount code",
            ErrorCode::DiscountInvalidDateRange => "End date must be after start date",

            // Catalog
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::SkuNotFound => "SKU not found",
            ErrorCode::SkuInactive => "SKU is not available",
            ErrorCode::SkuCodeExists => "SKU code already exists",
            ErrorCode::ProductSlugExists => "Product slug already exists",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category still has products",
            ErrorCode::CategoryNameExists => "Category name already exists",

            // Shipping / Address
            ErrorCode::ShipConfigNotFound => "Shipping config not found",
            ErrorCode::NoActiveShipConfig => "No active shipping config",
            ErrorCode::ProvinceNotFound => "Province not found",
            ErrorCode::DistrictNotFound => "District not found",
            ErrorCode::WardNotFound => "Ward not found",
            ErrorCode::AddressMismatch => "Address components do not match",

            // Content
            ErrorCode::BlogNotFound => "Blog post not found",
            ErrorCode::BlogSlugExists => "Blog slug already exists",
            ErrorCode::LandingSectionNotFound => "Landing section not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::AccountDisabled),
            1006 => Ok(ErrorCode::EmailAlreadyRegistered),
            1007 => Ok(ErrorCode::PasswordTooShort),
            1008 => Ok(ErrorCode::TooManyAttempts),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::AdminRequired),
            2003 => Ok(ErrorCode::CannotModifySelf),

            // Cart
            3001 => Ok(ErrorCode::CartItemNotFound),
            3002 => Ok(ErrorCode::CartEmpty),
            3003 => Ok(ErrorCode::CartQuantityInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::InvalidStatusTransition),
            4004 => Ok(ErrorCode::OrderNotCancellable),
            4006 => Ok(ErrorCode::InsufficientStock),

            // Discount
            5001 => Ok(ErrorCode::DiscountNotFound),
            5002 => Ok(ErrorCode::DiscountCodeExists),
            5003 => Ok(ErrorCode::DiscountInactive),
            5004 => Ok(ErrorCode::DiscountNotStarted),
            5005 => Ok(ErrorCode::DiscountExpired),
            5006 => Ok(ErrorCode::DiscountUsageLimitReached),
            5007 => Ok(ErrorCode::DiscountMinOrderNotMet),
            5008 => Ok(ErrorCode::DiscountUserLimitReached),
            5009 => Ok(ErrorCode::DiscountInvalidDateRange),

            // Catalog
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::SkuNotFound),
            6003 => Ok(ErrorCode::SkuInactive),
            6004 => Ok(ErrorCode::SkuCodeExists),
            6005 => Ok(ErrorCode::ProductSlugExists),
            6101 => Ok(ErrorCode::CategoryNotFound),
            6102 => Ok(ErrorCode::CategoryHasProducts),
            6103 => Ok(ErrorCode::CategoryNameExists),

            // Shipping / Address
            7001 => Ok(ErrorCode::ShipConfigNotFound),
            7002 => Ok(ErrorCode::NoActiveShipConfig),
            7101 => Ok(ErrorCode::ProvinceNotFound),
            7102 => Ok(ErrorCode::DistrictNotFound),
            7103 => Ok(ErrorCode::WardNotFound),
            7104 => Ok(ErrorCode::AddressMismatch),

            // Content
            8001 => Ok(ErrorCode::BlogNotFound),
            8002 => Ok(ErrorCode::BlogSlugExists),
            8101 => Ok(ErrorCode::LandingSectionNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
