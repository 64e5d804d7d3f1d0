//! # Route Parameters
//!
//! Typed identifiers derived from the current URL, plus the navigation
//! state a page needs on every render.
//!
//! ## Ownership
//! ```text
//! URL ──► RouteParams::from_path ──► use_branch_id / use_customer_id
//!  │                                          │
//!  │      recomputed on every resolve,        ▼
//!  │      never stored                  BranchId(5) / CustomerId(17)
//!  ▼
//! NavigationState::resolve ──► title, breadcrumbs, LayoutModel
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::RouteError;
use crate::layout::{compose_layout, LayoutModel};
use crate::navigation::{breadcrumbs, get_page_title, normalize_path, path_segments};

/// Route parameter holding the branch identifier.
pub const BRANCH_ID: &str = "branchId";

/// Route parameter holding the customer identifier.
pub const CUSTOMER_ID: &str = "customerId";

/// Patterns whose dynamic segments are extracted from any path they prefix.
pub const PARAM_ROUTES: &[&str] = &["/branch/:branchId", "/customers/:customerId"];

// =============================================================================
// Route Params
// =============================================================================

/// Dynamic segments captured from a path, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy in tests and when composing links.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extracts every known parameter from `path`.
    ///
    /// ```rust
    /// use bistro_core::route::RouteParams;
    ///
    /// let params = RouteParams::from_path("/branch/5/staff/payroll");
    /// assert_eq!(params.get("branchId"), Some("5"));
    /// ```
    pub fn from_path(path: &str) -> Self {
        let mut params = RouteParams::new();
        for pattern in PARAM_ROUTES {
            if let Some(found) = match_prefix(pattern, path) {
                params.0.extend(found.0);
            }
        }
        params
    }
}

/// Matches `path` against `pattern` segment by segment, requiring the same
/// number of segments.
///
/// ```rust
/// use bistro_core::route::match_route;
///
/// let params = match_route("/customers/:customerId", "/customers/17").unwrap();
/// assert_eq!(params.get("customerId"), Some("17"));
/// assert!(match_route("/customers/:customerId", "/customers/17/orders").is_none());
/// ```
pub fn match_route(pattern: &str, path: &str) -> Option<RouteParams> {
    let pattern_segs = path_segments(pattern);
    let path_segs = path_segments(path);
    if pattern_segs.len() != path_segs.len() {
        return None;
    }
    capture(&pattern_segs, &path_segs)
}

/// Like [`match_route`] but `path` may continue past the pattern.
pub fn match_prefix(pattern: &str, path: &str) -> Option<RouteParams> {
    let pattern_segs = path_segments(pattern);
    let path_segs = path_segments(path);
    if pattern_segs.len() > path_segs.len() {
        return None;
    }
    capture(&pattern_segs, &path_segs[..pattern_segs.len()])
}

fn capture(pattern: &[&str], path: &[&str]) -> Option<RouteParams> {
    let mut params = RouteParams::new();
    for (p, s) in pattern.iter().zip(path) {
        match p.strip_prefix(':') {
            Some(name) => {
                params.0.insert(name.to_string(), (*s).to_string());
            }
            None if p == s => {}
            None => return None,
        }
    }
    Some(params)
}

/// Substitutes `:name` segments of `pattern` with values from `params`.
///
/// Returns `None` if any placeholder has no value.
pub fn fill_pattern(pattern: &str, params: &RouteParams) -> Option<String> {
    let mut out = String::new();
    for segment in path_segments(pattern) {
        out.push('/');
        match segment.strip_prefix(':') {
            Some(name) => out.push_str(params.get(name)?),
            None => out.push_str(segment),
        }
    }
    if out.is_empty() {
        out.push('/');
    }
    Some(out)
}

// =============================================================================
// Typed Identifiers
// =============================================================================

macro_rules! route_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            pub const fn new(id: u32) -> Self {
                $name(id)
            }

            pub const fn get(&self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map($name)
            }
        }
    };
}

route_id!(
    /// A branch identifier taken from `/branch/:branchId/...`.
    BranchId
);

route_id!(
    /// A customer identifier taken from `/customers/:customerId`.
    CustomerId
);

/// Parses a positive numeric parameter.
fn parse_id<T: FromStr>(params: &RouteParams, name: &str) -> Result<T, RouteError> {
    let raw = params.get(name).ok_or_else(|| RouteError::MissingParam {
        name: name.to_string(),
    })?;

    let invalid = || RouteError::InvalidParam {
        name: name.to_string(),
        value: raw.to_string(),
    };

    match raw.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(_) => raw.parse::<T>().map_err(|_| invalid()),
    }
}

/// The branch the current page is scoped to.
///
/// ```rust
/// use bistro_core::route::{use_branch_id, RouteParams};
///
/// let params = RouteParams::from_path("/branch/5/inventory");
/// assert_eq!(use_branch_id(&params).unwrap().get(), 5);
/// ```
pub fn use_branch_id(params: &RouteParams) -> Result<BranchId, RouteError> {
    parse_id(params, BRANCH_ID)
}

/// The customer whose profile is open.
pub fn use_customer_id(params: &RouteParams) -> Result<CustomerId, RouteError> {
    parse_id(params, CUSTOMER_ID)
}

// =============================================================================
// Navigation State
// =============================================================================

/// Everything a page derives from its URL.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    /// Path without query, fragment or trailing slash.
    pub path: String,
    pub params: RouteParams,
    pub title: String,
    /// Labels from the top-level section down to the current page.
    pub breadcrumbs: Vec<String>,
    pub layout: LayoutModel,
}

impl NavigationState {
    /// Resolves the full state for `path`. Pure; call it on every change.
    pub fn resolve(path: &str) -> Self {
        let params = RouteParams::from_path(path);
        let layout = compose_layout(path, &params);

        NavigationState {
            path: normalize_path(path).to_string(),
            title: get_page_title(path).to_string(),
            breadcrumbs: breadcrumbs(path)
                .into_iter()
                .map(|item| item.label.to_string())
                .collect(),
            params,
            layout,
        }
    }

    pub fn branch_id(&self) -> Result<BranchId, RouteError> {
        use_branch_id(&self.params)
    }

    pub fn customer_id(&self) -> Result<CustomerId, RouteError> {
        use_customer_id(&self.params)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_from_branch_path() {
        let params = RouteParams::from_path("/branch/12/pos/orders?page=2");
        assert_eq!(params.get(BRANCH_ID), Some("12"));
        assert_eq!(params.get(CUSTOMER_ID), None);
    }

    #[test]
    fn test_params_from_unscoped_path() {
        assert!(RouteParams::from_path("/pos").is_empty());
        assert!(RouteParams::from_path("/branch").is_empty());
    }

    #[test]
    fn test_match_route_exact_only() {
        assert!(match_route("/branch/:branchId/pos", "/branch/3/pos").is_some());
        assert!(match_route("/branch/:branchId/pos", "/branch/3/staff").is_none());
        assert!(match_route("/branch/:branchId/pos", "/branch/3").is_none());
    }

    #[test]
    fn test_use_branch_id() {
        let params = RouteParams::new().with(BRANCH_ID, "7");
        assert_eq!(use_branch_id(&params), Ok(BranchId::new(7)));
    }

    #[test]
    fn test_use_branch_id_missing_vs_invalid() {
        assert_eq!(
            use_branch_id(&RouteParams::new()),
            Err(RouteError::MissingParam {
                name: "branchId".to_string()
            })
        );

        for bad in ["abc", "0", "-1", "1.5"] {
            let params = RouteParams::new().with(BRANCH_ID, bad);
            assert_eq!(
                use_branch_id(&params),
                Err(RouteError::InvalidParam {
                    name: "branchId".to_string(),
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn test_use_customer_id() {
        let params = RouteParams::from_path("/customers/17");
        assert_eq!(use_customer_id(&params).unwrap().to_string(), "17");
    }

    #[test]
    fn test_fill_pattern() {
        let params = RouteParams::new().with(BRANCH_ID, "4");
        assert_eq!(
            fill_pattern("/branch/:branchId/staff", &params).as_deref(),
            Some("/branch/4/staff")
        );
        assert_eq!(fill_pattern("/customers/:customerId", &params), None);
        assert_eq!(fill_pattern("/", &params).as_deref(), Some("/"));
    }

    #[test]
    fn test_navigation_state_resolve() {
        let state = NavigationState::resolve("/branch/5/staff/payroll/");
        assert_eq!(state.path, "/branch/5/staff/payroll");
        assert_eq!(state.title, "Payroll");
        assert_eq!(state.breadcrumbs, ["Branches", "Staff", "Payroll"]);
        assert_eq!(state.branch_id(), Ok(BranchId::new(5)));
        assert!(state.customer_id().is_err());
        assert!(state.layout.submenu.is_some());
    }
}
