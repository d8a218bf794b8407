use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural role of a file. Exactly one per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Page,
    Layout,
    Route,
    Component,
    Hook,
    Store,
    Service,
    Util,
    Type,
    Config,
    Test,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 12] = [
        FileCategory::Page,
        FileCategory::Layout,
        FileCategory::Route,
        FileCategory::Component,
        FileCategory::Hook,
        FileCategory::Store,
        FileCategory::Service,
        FileCategory::Util,
        FileCategory::Type,
        FileCategory::Config,
        FileCategory::Test,
        FileCategory::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FileCategory::Page => "page",
            FileCategory::Layout => "layout",
            FileCategory::Route => "route",
            FileCategory::Component => "component",
            FileCategory::Hook => "hook",
            FileCategory::Store => "store",
            FileCategory::Service => "service",
            FileCategory::Util => "util",
            FileCategory::Type => "type",
            FileCategory::Config => "config",
            FileCategory::Test => "test",
            FileCategory::Other => "other",
        }
    }

    /// Human label used in inferred descriptions.
    pub const fn label(self) -> &'static str {
        match self {
            FileCategory::Page => "Page",
            FileCategory::Layout => "Layout",
            FileCategory::Route => "Route handler",
            FileCategory::Component => "UI component",
            FileCategory::Hook => "Hook",
            FileCategory::Store => "State store",
            FileCategory::Service => "Service",
            FileCategory::Util => "Utility module",
            FileCategory::Type => "Type definitions",
            FileCategory::Config => "Configuration",
            FileCategory::Test => "Tests",
            FileCategory::Other => "Module",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_lowercase();
        FileCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| format!("unknown file category '{value}'"))
    }
}

/// Case-folded view of a path, computed once per classification.
#[derive(Debug)]
pub struct PathFacts {
    /// Lower-cased, `/`-separated, always starting with `/`.
    path: String,
    name: String,
    /// File name without its last extension.
    stem: String,
    ext: String,
}

impl PathFacts {
    pub fn new(raw: &str) -> Self {
        let mut normalized = raw.trim().replace('\\', "/").to_lowercase();
        while let Some(rest) = normalized.strip_prefix("./") {
            normalized = rest.to_string();
        }
        let path = format!("/{}", normalized.trim_start_matches('/'));
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
            _ => (name.clone(), String::new()),
        };
        Self {
            path,
            name,
            stem,
            ext,
        }
    }

    fn has_segment(&self, segment: &str) -> bool {
        self.path.contains(&format!("/{segment}/"))
    }

    fn has_any_segment(&self, segments: &[&str]) -> bool {
        segments.iter().any(|segment| self.has_segment(segment))
    }

    /// Role suffix such as `LoginPage` or `cartSlice`. Words that merely end
    /// in a suffix (`Preview`, `Restore`) do not count.
    fn stem_ends_with_any(&self, suffixes: &[&str]) -> bool {
        if SUFFIX_LOOKALIKES.iter().any(|word| self.stem.ends_with(word)) {
            return false;
        }
        suffixes.iter().any(|suffix| self.stem.ends_with(suffix))
    }

    fn stem_is_any(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.stem == *name)
    }
}

/// One entry of the ordered classification table.
#[derive(Clone, Copy)]
pub struct ClassifierRule {
    pub name: &'static str,
    pub category: FileCategory,
    matches: fn(&PathFacts) -> bool,
}

impl fmt::Debug for ClassifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierRule")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

impl ClassifierRule {
    const fn new(
        name: &'static str,
        category: FileCategory,
        matches: fn(&PathFacts) -> bool,
    ) -> Self {
        Self {
            name,
            category,
            matches,
        }
    }

    pub fn matches(&self, facts: &PathFacts) -> bool {
        (self.matches)(facts)
    }
}

/// First match wins. Reordering entries changes results for files that
/// satisfy several rules.
pub const RULES: &[ClassifierRule] = &[
    ClassifierRule::new("test-file", FileCategory::Test, is_test),
    ClassifierRule::new("config-file", FileCategory::Config, is_config),
    ClassifierRule::new("reserved-layout", FileCategory::Layout, is_reserved_layout),
    ClassifierRule::new("reserved-page", FileCategory::Page, is_reserved_page),
    ClassifierRule::new("reserved-route", FileCategory::Route, is_reserved_route),
    ClassifierRule::new("pages-api", FileCategory::Route, is_pages_api),
    ClassifierRule::new("pages-dir", FileCategory::Page, is_in_pages_dir),
    ClassifierRule::new("page-suffix", FileCategory::Page, has_page_suffix),
    ClassifierRule::new("server-route", FileCategory::Route, is_server_route),
    ClassifierRule::new("hook", FileCategory::Hook, is_hook),
    ClassifierRule::new("type-decl", FileCategory::Type, is_type_decl),
    ClassifierRule::new("service", FileCategory::Service, is_service),
    ClassifierRule::new("store", FileCategory::Store, is_store),
    ClassifierRule::new("util", FileCategory::Util, is_util),
    ClassifierRule::new("component", FileCategory::Component, is_component),
];

/// Classify a path. Total and case-insensitive; falls back to `Other`.
pub fn classify(path: &str) -> FileCategory {
    matching_rule(path).map_or(FileCategory::Other, |rule| rule.category)
}

/// The rule that decided `path`, if any.
pub fn matching_rule(path: &str) -> Option<&'static ClassifierRule> {
    let facts = PathFacts::new(path);
    RULES.iter().find(|rule| rule.matches(&facts))
}

const CONFIG_NAME_PREFIXES: &[&str] = &[
    "vite.config.",
    "vitest.config.",
    "webpack.config.",
    "rollup.config.",
    "next.config.",
    "nuxt.config.",
    "svelte.config.",
    "astro.config.",
    "tailwind.config.",
    "postcss.config.",
    "babel.config.",
    "jest.config.",
    "playwright.config.",
    "eslint.config.",
    "prettier.config.",
    "commitlint.config.",
    "tsconfig",
    "jsconfig",
    ".eslintrc",
    ".prettierrc",
    ".babelrc",
    ".env",
    "sw.",
    "service-worker.",
    "serviceworker.",
    "workbox-config.",
];

/// Ordinary words ending in `view` or `store`. The camelCase
/// boundary is gone after folding, so they are listed.
const SUFFIX_LOOKALIKES: &[&str] = &[
    "preview",
    "overview",
    "review",
    "interview",
    "restore",
];

const SFC_EXTENSIONS: &[&str] = &["vue", "svelte", "astro"];
const TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

fn is_test(facts: &PathFacts) -> bool {
    facts.name.contains(".test.")
        || facts.name.contains(".spec.")
        || facts.has_any_segment(&["test", "tests", "__tests__"])
}

fn is_config(facts: &PathFacts) -> bool {
    CONFIG_NAME_PREFIXES
        .iter()
        .any(|prefix| facts.name.starts_with(prefix))
        || facts.stem.ends_with(".config")
}

fn is_reserved_layout(facts: &PathFacts) -> bool {
    facts.stem_is_any(&["layout", "+layout", "_layout", "_app", "_document", "template"])
}

fn is_reserved_page(facts: &PathFacts) -> bool {
    facts.stem_is_any(&["page", "+page"])
}

/// App-router route handlers and SvelteKit server endpoints/loaders.
fn is_reserved_route(facts: &PathFacts) -> bool {
    facts.stem_is_any(&["route", "+server"])
        || (facts.stem.starts_with('+') && facts.stem.ends_with(".server"))
}

fn is_pages_api(facts: &PathFacts) -> bool {
    facts.path.contains("/pages/api/")
}

fn is_in_pages_dir(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["pages", "views", "screens", "routes"])
        && !facts.has_segment("components")
}

fn has_page_suffix(facts: &PathFacts) -> bool {
    facts.stem_ends_with_any(&["page", "view", "screen"])
}

fn is_server_route(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["api", "server"])
        || facts.stem.ends_with(".server")
        || facts.stem == "+server"
}

fn is_hook(facts: &PathFacts) -> bool {
    is_hook_name(&facts.stem)
        || facts.has_any_segment(&["hooks", "composables"])
        || (facts.has_segment("stores") && TS_EXTENSIONS.contains(&facts.ext.as_str()))
}

/// Words that start with "use" without being hooks once case is folded.
const USE_PREFIXED_WORDS: &[&str] = &["user", "useful", "useless"];
/// Plain words that only count as non-hooks as a whole stem; `useSettings`
/// must stay a hook.
const USE_WHOLE_WORDS: &[&str] = &["uses", "used", "usecase", "usecases"];
/// Hooks whose folded name collides with [`USE_PREFIXED_WORDS`].
const USE_PREFIXED_HOOKS: &[&str] = &[
    "useref",
    "usereducer",
    "userouter",
    "useresize",
    "useresponsive",
    "userequest",
];

/// `useX` hook naming, evaluated on the case-folded stem.
///
/// The camelCase boundary (`useAuth` vs `user`) is invisible after folding,
/// so plain English words are excluded explicitly.
fn is_hook_name(stem: &str) -> bool {
    let Some(rest) = stem.strip_prefix("use") else {
        return false;
    };
    if let Some(after_separator) = rest.strip_prefix(['-', '_']) {
        return after_separator
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
    }
    if !rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    if USE_WHOLE_WORDS.contains(&stem) {
        return false;
    }
    let is_plain_word = USE_PREFIXED_WORDS.iter().any(|word| stem.starts_with(word));
    !is_plain_word || USE_PREFIXED_HOOKS.iter().any(|hook| stem.starts_with(hook))
}

fn is_type_decl(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["types", "interfaces"])
        || facts.name.contains(".d.")
        || facts.stem_is_any(&["types", "interfaces"])
}

fn is_service(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["services", "api-client"])
        || facts.stem_ends_with_any(&["service", "api"])
}

fn is_store(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["store", "stores", "context", "contexts", "providers", "state"])
        || facts.stem_ends_with_any(&["store", "slice", "reducer"])
}

fn is_util(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["utils", "lib", "helpers", "common", "shared"])
        || facts.stem_ends_with_any(&["utils", "helpers"])
}

fn is_component(facts: &PathFacts) -> bool {
    facts.has_any_segment(&["components", "ui", "features", "modules"])
        || SFC_EXTENSIONS.contains(&facts.ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn check(cases: &[(&str, FileCategory)]) {
        for (path, expected) in cases {
            assert_eq!(classify(path), *expected, "path: {path}");
        }
    }

    #[test]
    fn tests_win_over_everything() {
        check(&[
            ("Button.test.tsx", FileCategory::Test),
            ("src/components/Button.test.tsx", FileCategory::Test),
            ("src/pages/home.spec.ts", FileCategory::Test),
            ("src/__tests__/vite.config.ts", FileCategory::Test),
            ("tests/e2e/login.ts", FileCategory::Test),
        ]);
    }

    #[test]
    fn config_files() {
        check(&[
            ("vite.config.ts", FileCategory::Config),
            ("next.config.mjs", FileCategory::Config),
            ("tailwind.config.js", FileCategory::Config),
            (".eslintrc.cjs", FileCategory::Config),
            ("src/env.config.ts", FileCategory::Config),
            ("public/sw.js", FileCategory::Config),
            ("src/service-worker.ts", FileCategory::Config),
        ]);
    }

    #[test]
    fn framework_conventions() {
        check(&[
            ("app/dashboard/page.tsx", FileCategory::Page),
            ("app/dashboard/layout.tsx", FileCategory::Layout),
            ("app/api/users/route.ts", FileCategory::Route),
            ("src/routes/+page.svelte", FileCategory::Page),
            ("src/routes/+layout.svelte", FileCategory::Layout),
            ("pages/_app.tsx", FileCategory::Layout),
            ("src/pages/Settings.tsx", FileCategory::Page),
            ("src/views/Profile.vue", FileCategory::Page),
            ("src/pages/api/users.ts", FileCategory::Route),
        ]);
    }

    #[test]
    fn nested_components_are_not_pages() {
        check(&[
            ("src/pages/components/Header.tsx", FileCategory::Component),
            ("src/components/pages/Header.tsx", FileCategory::Component),
        ]);
    }

    #[test]
    fn page_suffix_beats_components_dir() {
        check(&[
            ("src/components/LoginPage.tsx", FileCategory::Page),
            ("src/components/ProfileScreen.tsx", FileCategory::Page),
            ("src/components/ReviewPage.tsx", FileCategory::Page),
            ("src/components/Preview.tsx", FileCategory::Component),
            ("src/components/Overview.tsx", FileCategory::Component),
            ("src/components/ProductPreview.tsx", FileCategory::Component),
        ]);
    }

    #[test]
    fn words_ending_in_role_suffixes_are_not_roles() {
        check(&[
            ("src/components/Restore.tsx", FileCategory::Component),
            ("src/AppStore.ts", FileCategory::Store),
            ("src/Interview.ts", FileCategory::Other),
            ("src/ordersApi.ts", FileCategory::Service),
            ("src/uses.ts", FileCategory::Other),
            ("src/useSettings.ts", FileCategory::Hook),
        ]);
    }

    #[test]
    fn server_routes() {
        check(&[
            ("src/api/users.ts", FileCategory::Route),
            ("src/server/db.ts", FileCategory::Route),
            ("src/routes/+page.server.ts", FileCategory::Route),
            ("src/routes/+server.ts", FileCategory::Route),
            ("src/data.server.ts", FileCategory::Route),
        ]);
    }

    #[test]
    fn hooks_and_composables() {
        check(&[
            ("src/useAuth.ts", FileCategory::Hook),
            ("src/use-auth.ts", FileCategory::Hook),
            ("src/hooks/session.ts", FileCategory::Hook),
            ("src/composables/cart.ts", FileCategory::Hook),
            ("src/stores/cart.ts", FileCategory::Hook),
            ("src/useRouter.ts", FileCategory::Hook),
            ("src/user.ts", FileCategory::Other),
        ]);
    }

    #[test]
    fn remaining_groups_in_order() {
        check(&[
            ("src/types/user.ts", FileCategory::Type),
            ("src/global.d.ts", FileCategory::Type),
            ("src/types.ts", FileCategory::Type),
            ("src/services/billing.ts", FileCategory::Service),
            ("src/userService.ts", FileCategory::Service),
            ("src/paymentsApi.ts", FileCategory::Service),
            ("src/store/index.ts", FileCategory::Store),
            ("src/stores/cart.js", FileCategory::Store),
            ("src/context/ThemeContext.tsx", FileCategory::Store),
            ("src/cartSlice.ts", FileCategory::Store),
            ("src/utils/format.ts", FileCategory::Util),
            ("src/lib/date.ts", FileCategory::Util),
            ("src/stringHelpers.ts", FileCategory::Util),
            ("src/components/Button.tsx", FileCategory::Component),
            ("src/features/cart/CartItem.tsx", FileCategory::Component),
            ("src/Widget.svelte", FileCategory::Component),
            ("src/main.ts", FileCategory::Other),
            ("", FileCategory::Other),
        ]);
    }

    #[test]
    fn classification_ignores_case_and_separators() {
        for path in [
            "src/components/Button.tsx",
            "src\\hooks\\useAuth.ts",
            "app/Dashboard/Page.tsx",
            "src/userService.ts",
            "Vite.Config.ts",
            "src/Widget.svelte",
        ] {
            assert_eq!(classify(path), classify(&path.to_uppercase()), "path: {path}");
            assert_eq!(classify(path), classify(&path.replace('\\', "/")), "path: {path}");
        }
    }

    #[test]
    fn matching_rule_exposes_decision() {
        let rule = matching_rule("src/components/Button.test.tsx");
        assert_eq!(rule.map(|r| r.name), Some("test-file"));
        assert_eq!(matching_rule("src/main.ts").map(|r| r.name), None);
    }

    #[test]
    fn rule_table_keeps_group_order() {
        let categories: Vec<FileCategory> = RULES.iter().map(|rule| rule.category).collect();
        assert_eq!(categories.first(), Some(&FileCategory::Test));
        assert_eq!(categories[1], FileCategory::Config);
        assert_eq!(categories.last(), Some(&FileCategory::Component));
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in FileCategory::ALL {
            assert_eq!(category.as_str().parse::<FileCategory>(), Ok(category));
        }
        assert!("widget".parse::<FileCategory>().is_err());
    }
}
