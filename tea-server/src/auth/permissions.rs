//! Permission Definitions
//!
//! Role based permissions. Admins get `all`, staff get the day-to-day
//! back-office modules, customers get nothing beyond their own resources.

/// Permissions checked by route groups
pub const ALL_PERMISSIONS: &[&str] = &[
    "catalog:manage",   // categories, products, SKUs
    "orders:manage",    // order list, detail, status changes
    "discounts:manage", // coupon CRUD
    "settings:manage",  // shipping configs, company info
    "blogs:manage",     // blog posts incl. drafts
    "content:manage",   // landing page sections
    "dashboard:view",   // back-office statistics
];

pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["all"];

pub const DEFAULT_STAFF_PERMISSIONS: &[&str] = &[
    "orders:manage",
    "blogs:manage",
    "content:manage",
    "dashboard:view",
];

/// Get permissions for a role
pub fn get_default_permissions(role: shared::models::UserRole) -> Vec<String> {
    use shared::models::UserRole;

    let list: &[&str] = match role {
        UserRole::Admin => DEFAULT_ADMIN_PERMISSIONS,
        UserRole::Staff => DEFAULT_STAFF_PERMISSIONS,
        UserRole::Customer => &[],
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Validate if a permission string is known
pub fn is_valid_permission(permission: &str) -> bool {
    permission == "all" || ALL_PERMISSIONS.contains(&permission) || permission.ends_with(":*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserRole;

    #[test]
    fn test_role_defaults() {
        assert_eq!(get_default_permissions(UserRole::Admin), vec!["all"]);
        let staff = get_default_permissions(UserRole::Staff);
        assert!(staff.contains(&"orders:manage".to_string()));
        assert!(!staff.contains(&"discounts:manage".to_string()));
        assert!(get_default_permissions(UserRole::Customer).is_empty());
    }

    #[test]
    fn test_defaults_are_valid() {
        for p in DEFAULT_STAFF_PERMISSIONS {
            assert!(is_valid_permission(p));
        }
        assert!(is_valid_permission("orders:*"));
        assert!(!is_valid_permission("menu:manage"));
    }
}
