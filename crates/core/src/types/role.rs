//! Staff role enumeration.

/// Management roles assigned to employees.
///
/// The backend stores an employee's role as a free-form display name. The
/// storefront only ever branches on the five roles below, so they are kept
/// as a closed enumeration; any other role name fails to parse and callers
/// must decide an explicit fallback instead of string-matching their way
/// through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaffRole {
    /// Manages employee accounts.
    StaffManager,
    /// Manages warehouse stock and receipts.
    InventoryManager,
    /// Manages the product catalog.
    CatalogManager,
    /// Manages customer orders.
    OrderManager,
    /// Full administrative access.
    Administrator,
}

impl StaffRole {
    /// All roles, in display order.
    pub const ALL: [Self; 5] = [
        Self::StaffManager,
        Self::InventoryManager,
        Self::CatalogManager,
        Self::OrderManager,
        Self::Administrator,
    ];
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaffManager => write!(f, "Staff Manager"),
            Self::InventoryManager => write!(f, "Inventory Manager"),
            Self::CatalogManager => write!(f, "Catalog Manager"),
            Self::OrderManager => write!(f, "Order Manager"),
            Self::Administrator => write!(f, "Administrator"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Staff Manager" => Ok(Self::StaffManager),
            "Inventory Manager" => Ok(Self::InventoryManager),
            "Catalog Manager" => Ok(Self::CatalogManager),
            "Order Manager" => Ok(Self::OrderManager),
            "Administrator" => Ok(Self::Administrator),
            _ => Err(format!("unrecognized staff role: {s}")),
        }
    }
}
