//! Path-based inference: area ids and one-line descriptions.

use crate::classifier::FileCategory;
use crate::names::{fold, lookup_builtin};
use std::collections::BTreeSet;

/// Directories whose children name a feature.
const CONTAINER_SEGMENTS: &[&str] = &[
    "features", "modules", "domains", "areas", "pages", "app", "routes", "views", "screens",
];

/// Structural directory names that never become an area on their own.
const GENERIC_SEGMENTS: &[&str] = &[
    "src", "app", "lib", "libs", "components", "shared", "common", "utils", "helpers", "hooks",
    "pages", "routes", "views", "screens", "features", "modules", "domains", "areas", "api",
    "server", "client", "services", "store", "stores", "types", "ui", "assets", "styles", "core",
    "internal", "layouts", "context", "providers", "config", "test", "tests", "__tests__",
];

/// Directories to route segments, e.g. `app/(shop)/cart/page.tsx` -> `/cart`.
const ROUTE_ROOTS: &[&str] = &["app", "pages", "routes"];

pub(crate) fn normalize_relative(path: &str) -> String {
    let mut value = path.trim().replace('\\', "/");
    while let Some(rest) = value.strip_prefix("./") {
        value = rest.to_string();
    }
    value.trim_start_matches('/').to_string()
}

fn directory_segments(path: &str) -> Vec<String> {
    let normalized = normalize_relative(path).to_lowercase();
    let mut segments: Vec<String> = normalized
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    segments.pop();
    segments
}

/// Strip route-group parentheses and reject dynamic, private or generic
/// segments.
fn clean_segment(segment: &str) -> Option<String> {
    let unwrapped = segment
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(segment);
    if unwrapped.is_empty()
        || unwrapped.starts_with(['[', '_', '@', '.', '+'])
        || GENERIC_SEGMENTS.contains(&unwrapped)
    {
        return None;
    }
    Some(fold(unwrapped))
}

/// Area ids implied by a file's directories. Empty when nothing qualifies.
pub fn infer_areas(path: &str) -> Vec<String> {
    let dirs = directory_segments(path);
    let mut found = BTreeSet::new();

    for (idx, segment) in dirs.iter().enumerate() {
        if let Some(cleaned) = clean_segment(segment) {
            if let Some(builtin) = lookup_builtin(&cleaned) {
                found.insert(builtin.id.to_string());
            }
        }

        if !CONTAINER_SEGMENTS.contains(&segment.as_str()) {
            continue;
        }
        if let Some(cleaned) = dirs.get(idx + 1).and_then(|next| clean_segment(next)) {
            let id = lookup_builtin(&cleaned).map_or(cleaned, |builtin| builtin.id.to_string());
            found.insert(id);
        }
    }

    found.into_iter().collect()
}

fn route_of(path: &str) -> Option<String> {
    let normalized = normalize_relative(path);
    let mut segments: Vec<&str> = normalized.split('/').collect();
    let file = segments.pop()?;
    let root_idx = segments
        .iter()
        .position(|segment| ROUTE_ROOTS.contains(&segment.to_lowercase().as_str()))?;

    let mut route: Vec<&str> = segments[root_idx + 1..]
        .iter()
        .copied()
        .filter(|segment| !(segment.starts_with('(') && segment.ends_with(')')))
        .collect();

    let stem = file.split('.').next().unwrap_or(file);
    let reserved = matches!(
        stem.to_lowercase().as_str(),
        "page" | "+page" | "layout" | "+layout" | "route" | "+server" | "index" | "_app" | "template"
    );
    if !reserved {
        route.push(stem);
    }
    Some(format!("/{}", route.join("/")))
}

/// Inferred one-line description from category and path.
pub fn infer_description(path: &str, category: FileCategory) -> String {
    let normalized = normalize_relative(path);
    let (dir, file) = normalized.rsplit_once('/').unwrap_or((".", normalized.as_str()));
    let stem = file.split('.').next().unwrap_or(file);

    match category {
        FileCategory::Page | FileCategory::Layout | FileCategory::Route => match route_of(&normalized) {
            Some(route) => format!("{} for {route}", category.label()),
            None => format!("{} `{stem}` in {dir}", category.label()),
        },
        FileCategory::Test => format!("Tests for `{stem}` in {dir}"),
        _ => format!("{} `{stem}` in {dir}", category.label()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn infers_feature_folders() {
        assert_eq!(infer_areas("src/features/cart/CartItem.tsx"), vec!["cart"]);
        assert_eq!(infer_areas("src/modules/Inventory/api.ts"), vec!["inventory"]);
    }

    #[test]
    fn maps_aliases_to_builtin_ids() {
        assert_eq!(infer_areas("src/features/login/Form.tsx"), vec!["auth"]);
        assert_eq!(infer_areas("src/components/checkout/Summary.tsx"), vec!["billing"]);
    }

    #[test]
    fn route_groups_and_nested_builtins() {
        assert_eq!(
            infer_areas("app/(dashboard)/settings/page.tsx"),
            vec!["dashboard", "settings"]
        );
    }

    #[test]
    fn skips_dynamic_and_generic_segments() {
        assert!(infer_areas("app/[id]/page.tsx").is_empty());
        assert!(infer_areas("src/components/Button.tsx").is_empty());
        assert!(infer_areas("src/pages/Home.tsx").is_empty());
        assert!(infer_areas("main.ts").is_empty());
    }

    #[test]
    fn describes_routes_by_url() {
        assert_eq!(
            infer_description("app/(shop)/cart/page.tsx", FileCategory::Page),
            "Page for /cart"
        );
        assert_eq!(
            infer_description("src/pages/settings/Profile.tsx", FileCategory::Page),
            "Page for /settings/Profile"
        );
        assert_eq!(
            infer_description("app/api/users/route.ts", FileCategory::Route),
            "Route handler for /api/users"
        );
    }

    #[test]
    fn describes_other_files_by_location() {
        assert_eq!(
            infer_description("src/hooks/useAuth.ts", FileCategory::Hook),
            "Hook `useAuth` in src/hooks"
        );
        assert_eq!(
            infer_description("src/components/Button.test.tsx", FileCategory::Test),
            "Tests for `Button` in src/components"
        );
        assert_eq!(infer_description("main.ts", FileCategory::Other), "Module `main` in .");
    }
}
