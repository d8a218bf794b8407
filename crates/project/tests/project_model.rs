use atlas_project::{
    classify, config_path, AreaResolver, FileCategory, ProjectConfig, ProjectMap, CONFIG_DIR_NAME,
    RULES,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &[&str] = &[
    "src/components/Button.test.tsx",
    "vite.config.ts",
    "app/dashboard/layout.tsx",
    "app/dashboard/page.tsx",
    "app/api/users/route.ts",
    "src/pages/components/Card.tsx",
    "src/server/db.ts",
    "src/hooks/useAuth.ts",
    "src/types/index.ts",
    "src/services/billing.ts",
    "src/store/cart.ts",
    "src/lib/format.ts",
    "src/components/Modal.vue",
    "src/main.ts",
    "src/Legacy.JSX",
];

#[test]
fn classification_is_case_insensitive() {
    for path in SAMPLE {
        assert_eq!(classify(path), classify(&path.to_uppercase()), "{path}");
        assert_eq!(classify(path), classify(&path.replace('/', "\\")), "{path}");
    }
}

#[test]
fn test_files_win_regardless_of_directory() {
    for dir in ["", "src/", "app/dashboard/", "src/pages/", "src/hooks/"] {
        assert_eq!(classify(&format!("{dir}Button.test.tsx")), FileCategory::Test);
    }
}

#[test]
fn every_category_is_reachable() {
    let mut seen: Vec<FileCategory> = SAMPLE.iter().map(|path| classify(path)).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen, FileCategory::ALL.to_vec());
    assert_eq!(RULES.first().map(|rule| rule.category), Some(FileCategory::Test));
}

#[test]
fn config_on_disk_drives_areas() {
    let temp = tempdir().unwrap();
    fs::create_dir_all(temp.path().join(CONFIG_DIR_NAME)).unwrap();
    fs::write(
        config_path(temp.path()),
        r#"{ "areas": { "checkout": { "name": "Caisse", "match": ["src/cart/**"] } } }"#,
    )
    .unwrap();

    let config = ProjectConfig::load(temp.path());
    let resolver = AreaResolver::new(&config);
    let files = ["src/cart/Summary.tsx", "src/features/search/Box.tsx"];

    assert_eq!(resolver.resolve_area_reference("caisse", &files), "checkout");
    assert_eq!(resolver.resolve_area_reference("search", &files), "search");

    let map = ProjectMap::build(&resolver, &files);
    assert_eq!(map.area_counts(), vec![("checkout", 1), ("search", 1)]);
    assert!(!map.area("checkout").unwrap().auto_detected);
    assert!(map.area("search").unwrap().auto_detected);
}
