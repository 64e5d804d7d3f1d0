//! # Navigation Resolver
//!
//! The process-wide navigation tree and the lookups built on it.
//!
//! ## Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  path: /branch/5/staff/payroll                                          │
//! │                                                                         │
//! │  href                              segments matched   result            │
//! │  ────────────────────────────────  ────────────────   ─────────────     │
//! │  /branch                           1 (prefix)                           │
//! │  /branch/:branchId/staff           3 (prefix)                           │
//! │  /branch/:branchId/staff/payroll   4 (exact)          ◄── "Payroll"     │
//! │                                                                         │
//! │  • `:name` segments match any single path segment                       │
//! │  • exact match beats prefix match, longer prefix beats shorter          │
//! │  • ties go to the entry defined first (depth-first order)               │
//! │  • "/" only matches "/"                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The tree is a `'static` constant with no mutation API. Per-user menus
//! are produced with [`filter_navigation`], which returns an owned copy.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Title used when no navigation entry matches.
pub const DEFAULT_PAGE_TITLE: &str = "Dashboard";

/// Builds a `NavigationItem` literal, with an optional list of children.
macro_rules! nav {
    ($label:expr, $href:expr) => {
        NavigationItem {
            label: $label,
            href: $href,
            children: &[],
        }
    };
    ($label:expr, $href:expr, [$($child:expr),* $(,)?] $(,)?) => {
        NavigationItem {
            label: $label,
            href: $href,
            children: &[$($child),*],
        }
    };
}

/// One entry of the navigation tree.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub label: &'static str,
    pub href: &'static str,
    #[serde(skip_serializing_if = "<[NavigationItem]>::is_empty")]
    pub children: &'static [NavigationItem],
}

impl NavigationItem {
    /// Depth-first iterator over this entry and all descendants.
    pub fn walk(&'static self) -> impl Iterator<Item = &'static NavigationItem> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let item = stack.pop()?;
            stack.extend(item.children.iter().rev());
            Some(item)
        })
    }
}

// =============================================================================
// Navigation Tree
// =============================================================================

/// The application's navigation tree.
pub static NAVIGATION: &[NavigationItem] = &[
    nav!("Dashboard", "/"),
    nav!("POS", "/pos"),
    nav!("Orders", "/pos-list"),
    nav!(
        "Menu Management",
        "/menu-management",
        [
            nav!("Menu Items", "/menu-management/items"),
            nav!("Categories", "/menu-management/categories"),
            nav!("Add-ons", "/menu-management/add-ons"),
            nav!("Recipes", "/menu-management/recipes"),
        ],
    ),
    nav!(
        "Inventory",
        "/inventory",
        [
            nav!("Stock", "/inventory/stock"),
            nav!("Suppliers", "/inventory/suppliers"),
            nav!("Purchase Orders", "/inventory/purchase-orders"),
        ],
    ),
    nav!(
        "Staff",
        "/staff",
        [
            nav!("Staff List", "/staff/list"),
            nav!("Attendance", "/staff/attendance"),
            nav!("Payroll", "/staff/payroll"),
        ],
    ),
    nav!(
        "Customers",
        "/customers",
        [nav!("Customer Profile", "/customers/:customerId")],
    ),
    nav!(
        "Branches",
        "/branch",
        [
            nav!(
                "POS",
                "/branch/:branchId/pos",
                [nav!("Orders", "/branch/:branchId/pos/orders")],
            ),
            nav!(
                "Inventory",
                "/branch/:branchId/inventory",
                [
                    nav!("Stock", "/branch/:branchId/inventory/stock"),
                    nav!("Transfers", "/branch/:branchId/inventory/transfers"),
                ],
            ),
            nav!(
                "Staff",
                "/branch/:branchId/staff",
                [
                    nav!("Attendance", "/branch/:branchId/staff/attendance"),
                    nav!("Payroll", "/branch/:branchId/staff/payroll"),
                ],
            ),
        ],
    ),
    nav!("Financial Reports", "/financial-reports"),
    nav!(
        "Analytics",
        "/analytics",
        [
            nav!("Sales", "/analytics/sales"),
            nav!("Products", "/analytics/products"),
            nav!("Staff Performance", "/analytics/staff"),
        ],
    ),
    nav!(
        "Settings",
        "/settings",
        [
            nav!("General", "/settings/general"),
            nav!("Payment Methods", "/settings/payment-methods"),
            nav!("Taxes", "/settings/taxes"),
        ],
    ),
];

// =============================================================================
// Path Helpers
// =============================================================================

/// Strips query string, fragment and trailing slashes.
///
/// An empty result becomes `"/"`.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Non-empty `/`-separated segments of a normalized path.
pub fn path_segments(path: &str) -> Vec<&str> {
    normalize_path(path)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchScore {
    exact: bool,
    segments: usize,
}

impl MatchScore {
    fn beats(&self, other: &MatchScore) -> bool {
        (self.exact && !other.exact) || (self.exact == other.exact && self.segments > other.segments)
    }
}

/// Scores `href` against the path segments, `None` if it does not match.
fn score(href: &str, path: &[&str]) -> Option<MatchScore> {
    let pattern: Vec<&str> = href.split('/').filter(|s| !s.is_empty()).collect();

    if pattern.is_empty() {
        return path.is_empty().then_some(MatchScore {
            exact: true,
            segments: 0,
        });
    }
    if pattern.len() > path.len() {
        return None;
    }

    let all_match = pattern
        .iter()
        .zip(path)
        .all(|(p, s)| p.starts_with(':') || p == s);

    all_match.then_some(MatchScore {
        exact: pattern.len() == path.len(),
        segments: pattern.len(),
    })
}

// =============================================================================
// Lookups
// =============================================================================

/// Finds the best entry for `path` and the chain of its ancestors.
fn find_trail(tree: &'static [NavigationItem], path: &str) -> Vec<&'static NavigationItem> {
    fn visit(
        items: &'static [NavigationItem],
        path: &[&str],
        trail: &mut Vec<&'static NavigationItem>,
        best: &mut Option<(MatchScore, Vec<&'static NavigationItem>)>,
    ) {
        for item in items {
            trail.push(item);
            if let Some(s) = score(item.href, path) {
                if best.as_ref().map_or(true, |(b, _)| s.beats(b)) {
                    *best = Some((s, trail.clone()));
                }
            }
            visit(item.children, path, trail, best);
            trail.pop();
        }
    }

    let segments = path_segments(path);
    let mut best = None;
    visit(tree, &segments, &mut Vec::new(), &mut best);
    best.map(|(_, trail)| trail).unwrap_or_default()
}

/// Finds the navigation entry for the current path in [`NAVIGATION`].
///
/// ```rust
/// use bistro_core::navigation::find_navigation_item;
///
/// let item = find_navigation_item("/branch/5/staff/payroll").unwrap();
/// assert_eq!(item.label, "Payroll");
/// ```
pub fn find_navigation_item(path: &str) -> Option<&'static NavigationItem> {
    find_in(NAVIGATION, path)
}

/// Same as [`find_navigation_item`] against an explicit tree.
pub fn find_in(tree: &'static [NavigationItem], path: &str) -> Option<&'static NavigationItem> {
    find_trail(tree, path).last().copied()
}

/// The matched entry's label, or [`DEFAULT_PAGE_TITLE`].
pub fn get_page_title(path: &str) -> &'static str {
    find_navigation_item(path)
        .map(|item| item.label)
        .unwrap_or(DEFAULT_PAGE_TITLE)
}

/// Entries from the top level down to the match for `path`.
///
/// Empty when nothing matches.
pub fn breadcrumbs(path: &str) -> Vec<&'static NavigationItem> {
    find_trail(NAVIGATION, path)
}

// =============================================================================
// Personalization
// =============================================================================

/// An owned navigation entry, produced by filtering the static tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavNode {
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

/// Builds a personalized copy of `tree` keeping entries that pass `keep`.
///
/// A rejected entry removes its whole subtree. The source tree is never
/// touched.
///
/// ```rust
/// use bistro_core::navigation::{filter_navigation, NAVIGATION};
///
/// // Cashiers do not see settings or reports.
/// let menu = filter_navigation(NAVIGATION, |item| {
///     !item.href.starts_with("/settings") && item.href != "/financial-reports"
/// });
/// assert!(menu.iter().all(|n| n.label != "Settings"));
/// ```
pub fn filter_navigation<F>(tree: &[NavigationItem], keep: F) -> Vec<NavNode>
where
    F: Fn(&NavigationItem) -> bool,
{
    fn copy<F: Fn(&NavigationItem) -> bool>(items: &[NavigationItem], keep: &F) -> Vec<NavNode> {
        items
            .iter()
            .filter(|item| keep(item))
            .map(|item| NavNode {
                label: item.label.to_string(),
                href: item.href.to_string(),
                children: copy(item.children, keep),
            })
            .collect()
    }

    copy(tree, &keep)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    static TIE_TREE: &[NavigationItem] = &[
        nav!("First", "/reports/:id"),
        nav!("Second", "/reports/daily"),
    ];

    #[test]
    fn test_longest_match_wins() {
        let item = find_navigation_item("/branch/5/staff/payroll").unwrap();
        assert_eq!(item.label, "Payroll");
        assert_eq!(item.href, "/branch/:branchId/staff/payroll");
    }

    #[test]
    fn test_prefix_match_resolves_to_parent() {
        let item = find_navigation_item("/branch/5/staff/42/edit").unwrap();
        assert_eq!(item.href, "/branch/:branchId/staff");

        let item = find_navigation_item("/menu-management/items/12").unwrap();
        assert_eq!(item.label, "Menu Items");
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(find_navigation_item("/pos").unwrap().label, "POS");
        assert_eq!(find_navigation_item("/pos-list").unwrap().label, "Orders");
        assert_eq!(find_navigation_item("/").unwrap().label, "Dashboard");
    }

    #[test]
    fn test_segment_boundaries() {
        // "/pos" must not claim "/pos-list" or "/position"
        assert_eq!(find_navigation_item("/position"), None);
    }

    #[test]
    fn test_ties_go_to_first_defined() {
        let item = find_in(TIE_TREE, "/reports/daily").unwrap();
        assert_eq!(item.label, "First");
    }

    #[test]
    fn test_query_and_trailing_slash_ignored() {
        let item = find_navigation_item("/staff/payroll/?month=6#top").unwrap();
        assert_eq!(item.href, "/staff/payroll");
    }

    #[test]
    fn test_page_title() {
        assert_eq!(get_page_title("/settings/payment-methods"), "Payment Methods");
        assert_eq!(get_page_title("/customers/17"), "Customer Profile");
        assert_eq!(get_page_title("/unknown/page"), DEFAULT_PAGE_TITLE);
        assert_eq!(get_page_title(""), "Dashboard");
    }

    #[test]
    fn test_breadcrumbs() {
        let labels: Vec<&str> = breadcrumbs("/branch/3/inventory/transfers")
            .iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, ["Branches", "Inventory", "Transfers"]);
        assert!(breadcrumbs("/nowhere").is_empty());
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/pos/"), "/pos");
        assert_eq!(normalize_path("/pos?tab=1"), "/pos");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_filter_drops_subtrees() {
        let menu = filter_navigation(NAVIGATION, |item| item.label != "Staff");
        assert!(menu.iter().all(|n| n.label != "Staff"));

        let branches = menu.iter().find(|n| n.label == "Branches").unwrap();
        let child_labels: Vec<&str> = branches.children.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(child_labels, ["POS", "Inventory"]);

        // source tree untouched
        assert!(NAVIGATION.iter().any(|n| n.label == "Staff"));
    }

    #[test]
    fn test_nav_macro_accepts_trailing_commas() {
        static TREE: &[NavigationItem] = &[
            nav!("Reports", "/reports", [nav!("Sales", "/reports/sales")],),
            nav!(
                "Help",
                "/help",
                [
                    nav!("FAQ", "/help/faq"),
                ],
            ),
        ];

        assert_eq!(find_in(TREE, "/reports/sales/2024").map(|i| i.label), Some("Sales"));
        assert_eq!(TREE[1].children[0].href, "/help/faq");
    }

    #[test]
    fn test_tree_sections_have_children() {
        for href in ["/menu-management", "/inventory", "/staff", "/branch", "/settings"] {
            let item = NAVIGATION.iter().find(|n| n.href == href).unwrap();
            assert!(!item.children.is_empty(), "{} has no children", href);
        }
    }

    #[test]
    fn test_walk_visits_in_definition_order() {
        let settings = NAVIGATION.iter().find(|n| n.href == "/settings").unwrap();
        let hrefs: Vec<&str> = settings.walk().map(|i| i.href).collect();
        assert_eq!(
            hrefs,
            ["/settings", "/settings/general", "/settings/payment-methods", "/settings/taxes"]
        );
    }
}
