//! # Layout Composer
//!
//! Pure `(path, params) -> LayoutModel`. Nothing here is cached; layouts
//! call [`compose_layout`] on every render and the suppression rules are
//! re-evaluated each time.
//!
//! ## Sections
//! ```text
//! path prefix                      section           submenu shown when
//! ───────────────────────────────  ───────────────   ─────────────────────────
//! /pos, /pos-list                  Pos               path is exactly one of them
//! /staff                           Staff             always
//! /inventory                       Inventory         always
//! /menu-management                 Menu              always
//! /settings                        Settings          always
//! /analytics                       Analytics         always
//! /branch/:branchId/pos            BranchPos         branchId present
//! /branch/:branchId/staff          BranchStaff       branchId present
//! /branch/:branchId/inventory      BranchInventory   branchId present
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::navigation::{get_page_title, normalize_path, path_segments};
use crate::route::{RouteParams, BRANCH_ID};

/// Placeholder substituted with the branch id in section templates.
const BRANCH_PLACEHOLDER: &str = "{branchId}";

/// Paths on which the POS submenu is rendered.
const POS_SUBMENU_PATHS: &[&str] = &["/pos", "/pos-list"];

/// The area of the app a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Section {
    Pos,
    Staff,
    Inventory,
    Menu,
    Settings,
    Analytics,
    BranchPos,
    BranchStaff,
    BranchInventory,
}

impl Section {
    /// Derives the section from the path alone.
    pub fn from_path(path: &str) -> Option<Section> {
        let segments = path_segments(path);
        match segments.as_slice() {
            ["pos" | "pos-list", ..] => Some(Section::Pos),
            ["staff", ..] => Some(Section::Staff),
            ["inventory", ..] => Some(Section::Inventory),
            ["menu-management", ..] => Some(Section::Menu),
            ["settings", ..] => Some(Section::Settings),
            ["analytics", ..] => Some(Section::Analytics),
            ["branch", _, "pos", ..] => Some(Section::BranchPos),
            ["branch", _, "staff", ..] => Some(Section::BranchStaff),
            ["branch", _, "inventory", ..] => Some(Section::BranchInventory),
            _ => None,
        }
    }

    pub fn is_branch_scoped(&self) -> bool {
        matches!(
            self,
            Section::BranchPos | Section::BranchStaff | Section::BranchInventory
        )
    }

    /// `(label, href template)` pairs for the section submenu.
    pub fn items(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Section::Pos => &[("POS", "/pos"), ("Orders", "/pos-list")],
            Section::Staff => &[
                ("Staff List", "/staff/list"),
                ("Attendance", "/staff/attendance"),
                ("Payroll", "/staff/payroll"),
            ],
            Section::Inventory => &[
                ("Stock", "/inventory/stock"),
                ("Suppliers", "/inventory/suppliers"),
                ("Purchase Orders", "/inventory/purchase-orders"),
            ],
            Section::Menu => &[
                ("Menu Items", "/menu-management/items"),
                ("Categories", "/menu-management/categories"),
                ("Add-ons", "/menu-management/add-ons"),
                ("Recipes", "/menu-management/recipes"),
            ],
            Section::Settings => &[
                ("General", "/settings/general"),
                ("Payment Methods", "/settings/payment-methods"),
                ("Taxes", "/settings/taxes"),
            ],
            Section::Analytics => &[
                ("Sales", "/analytics/sales"),
                ("Products", "/analytics/products"),
                ("Staff Performance", "/analytics/staff"),
            ],
            Section::BranchPos => &[
                ("POS", "/branch/{branchId}/pos"),
                ("Orders", "/branch/{branchId}/pos/orders"),
            ],
            Section::BranchStaff => &[
                ("Staff", "/branch/{branchId}/staff"),
                ("Attendance", "/branch/{branchId}/staff/attendance"),
                ("Payroll", "/branch/{branchId}/staff/payroll"),
            ],
            Section::BranchInventory => &[
                ("Inventory", "/branch/{branchId}/inventory"),
                ("Stock", "/branch/{branchId}/inventory/stock"),
                ("Transfers", "/branch/{branchId}/inventory/transfers"),
            ],
        }
    }
}

/// One link of a section submenu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmenuEntry {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// What a layout renders around the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LayoutModel {
    pub section: Option<Section>,
    pub title: String,
    /// `None` when the section has no submenu for this path.
    pub submenu: Option<Vec<SubmenuEntry>>,
}

/// Composes the layout for `path`.
///
/// ```rust
/// use bistro_core::layout::{compose_layout, Section};
/// use bistro_core::route::RouteParams;
///
/// let layout = compose_layout("/pos", &RouteParams::new());
/// assert_eq!(layout.section, Some(Section::Pos));
/// assert!(layout.submenu.is_some());
///
/// // Order detail pages hide the POS submenu.
/// let layout = compose_layout("/pos/orders/12", &RouteParams::new());
/// assert!(layout.submenu.is_none());
/// ```
pub fn compose_layout(path: &str, params: &RouteParams) -> LayoutModel {
    let current = normalize_path(path);
    let section = Section::from_path(current);

    LayoutModel {
        section,
        title: get_page_title(current).to_string(),
        submenu: section.and_then(|s| submenu_for(s, current, params)),
    }
}

fn submenu_for(section: Section, current: &str, params: &RouteParams) -> Option<Vec<SubmenuEntry>> {
    if section == Section::Pos && !POS_SUBMENU_PATHS.contains(&current) {
        return None;
    }

    let branch_id = if section.is_branch_scoped() {
        Some(params.get(BRANCH_ID).filter(|id| !id.is_empty())?)
    } else {
        None
    };

    let entries = section
        .items()
        .iter()
        .map(|(label, template)| {
            let href = match branch_id {
                Some(id) => template.replace(BRANCH_PLACEHOLDER, id),
                None => (*template).to_string(),
            };
            SubmenuEntry {
                label: (*label).to_string(),
                active: href == current,
                href,
            }
        })
        .collect();

    Some(entries)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(layout: &LayoutModel) -> Vec<&str> {
        layout
            .submenu
            .iter()
            .flatten()
            .map(|e| e.label.as_str())
            .collect()
    }

    fn active(layout: &LayoutModel) -> Vec<&str> {
        layout
            .submenu
            .iter()
            .flatten()
            .filter(|e| e.active)
            .map(|e| e.href.as_str())
            .collect()
    }

    #[test]
    fn test_section_from_path() {
        assert_eq!(Section::from_path("/pos-list"), Some(Section::Pos));
        assert_eq!(Section::from_path("/menu-management/items"), Some(Section::Menu));
        assert_eq!(Section::from_path("/branch/2/staff/payroll"), Some(Section::BranchStaff));
        assert_eq!(Section::from_path("/branch/2"), None);
        assert_eq!(Section::from_path("/"), None);
        assert_eq!(Section::from_path("/customers/4"), None);
    }

    #[test]
    fn test_pos_submenu_only_on_exact_paths() {
        let params = RouteParams::new();
        assert_eq!(labels(&compose_layout("/pos", &params)), ["POS", "Orders"]);
        assert_eq!(active(&compose_layout("/pos-list/", &params)), ["/pos-list"]);

        let detail = compose_layout("/pos/orders/12", &params);
        assert_eq!(detail.section, Some(Section::Pos));
        assert_eq!(detail.submenu, None);
    }

    #[test]
    fn test_branch_submenu_substitutes_id() {
        let params = RouteParams::from_path("/branch/9/inventory/stock");
        let layout = compose_layout("/branch/9/inventory/stock", &params);

        assert_eq!(layout.section, Some(Section::BranchInventory));
        let hrefs: Vec<&str> = layout
            .submenu
            .iter()
            .flatten()
            .map(|e| e.href.as_str())
            .collect();
        assert_eq!(
            hrefs,
            [
                "/branch/9/inventory",
                "/branch/9/inventory/stock",
                "/branch/9/inventory/transfers"
            ]
        );
        assert_eq!(active(&layout), ["/branch/9/inventory/stock"]);
    }

    #[test]
    fn test_branch_submenu_requires_branch_id() {
        let layout = compose_layout("/branch/9/pos", &RouteParams::new());
        assert_eq!(layout.section, Some(Section::BranchPos));
        assert_eq!(layout.submenu, None);
    }

    #[test]
    fn test_plain_sections_always_show_submenu() {
        let layout = compose_layout("/staff/42/edit", &RouteParams::new());
        assert_eq!(labels(&layout), ["Staff List", "Attendance", "Payroll"]);
        assert!(active(&layout).is_empty());

        let layout = compose_layout("/settings/payment-methods", &RouteParams::new());
        assert_eq!(active(&layout), ["/settings/payment-methods"]);
        assert_eq!(layout.title, "Payment Methods");
    }

    #[test]
    fn test_no_section() {
        let layout = compose_layout("/financial-reports", &RouteParams::new());
        assert_eq!(layout.section, None);
        assert_eq!(layout.submenu, None);
        assert_eq!(layout.title, "Financial Reports");
    }

    #[test]
    fn test_rules_reevaluated_per_call() {
        let params = RouteParams::new();
        assert!(compose_layout("/pos", &params).submenu.is_some());
        assert!(compose_layout("/pos/new", &params).submenu.is_none());
        assert!(compose_layout("/pos", &params).submenu.is_some());
    }
}
