use serde_json::json;
use vdf_core::json::{to_json, to_json_named};
use vdf_core::query::{find, find_all};
use vdf_core::{parse, Node};

fn library_folders() -> Node {
    parse(
        r#""libraryfolders"
{
    "0"
    {
        "path"      "C:\\Program Files (x86)\\Steam"
        "apps"
        {
            "228980"    "0"
            "440"       "23000000"
        }
    }
    "1"
    {
        "path"      "D:\\SteamLibrary"
        "apps"
        {
            "620"       "12000000"
        }
    }
}"#,
    )
    .unwrap()
}

// ============================================================================
// find
// ============================================================================

#[test]
fn find_follows_path() {
    let doc = library_folders();
    assert_eq!(find(&doc, "1.path").as_str(), Some("D:\\SteamLibrary"));
    assert_eq!(find(&doc, "0.APPS.440").as_i64(0), 23_000_000);
}

#[test]
fn find_empty_path_is_self() {
    let doc = library_folders();
    assert!(std::ptr::eq(find(&doc, ""), &doc));
}

#[test]
fn find_miss_is_sentinel() {
    let doc = library_folders();
    assert!(!find(&doc, "2.path").is_valid());
    assert!(!find(&doc, "0.path.deeper").is_valid());
}

#[test]
fn find_wildcard_takes_first_child() {
    let doc = library_folders();
    assert_eq!(
        find(&doc, "*.path").as_str(),
        Some("C:\\Program Files (x86)\\Steam")
    );
}

#[test]
fn find_accepts_leading_root_name() {
    let doc = parse(r#""AppState" { "UserConfig" { "language" "english" } }"#).unwrap();
    assert_eq!(
        find(&doc, "AppState.UserConfig.language").as_str(),
        Some("english")
    );
    assert_eq!(
        find(&doc, "appstate.userconfig.LANGUAGE").as_str(),
        Some("english")
    );
    assert!(std::ptr::eq(find(&doc, "AppState"), &doc));
}

#[test]
fn find_prefers_child_named_like_root() {
    let doc = parse(r#""r" { "r" { "k" "inner" } "k" "outer" }"#).unwrap();
    assert_eq!(find(&doc, "r.k").as_str(), Some("inner"));
    assert_eq!(find(&doc, "k").as_str(), Some("outer"));
}

// ============================================================================
// find_all
// ============================================================================

#[test]
fn find_all_fans_out_over_wildcards() {
    let doc = library_folders();
    let paths: Vec<_> = find_all(&doc, "*.path")
        .into_iter()
        .filter_map(Node::as_str)
        .collect();
    assert_eq!(
        paths,
        vec!["C:\\Program Files (x86)\\Steam", "D:\\SteamLibrary"]
    );
}

#[test]
fn find_all_collects_every_app() {
    let doc = library_folders();
    let apps: Vec<_> = find_all(&doc, "*.apps.*")
        .into_iter()
        .map(Node::name)
        .collect();
    assert_eq!(apps, vec!["228980", "440", "620"]);
}

#[test]
fn find_all_follows_duplicate_names() {
    let doc = parse(r#""r" { "k" "1" "x" "2" "K" "3" }"#).unwrap();
    let values: Vec<_> = find_all(&doc, "k")
        .into_iter()
        .filter_map(Node::as_str)
        .collect();
    assert_eq!(values, vec!["1", "3"]);
}

#[test]
fn find_all_accepts_leading_root_name() {
    let lf = parse(
        r#""LibraryFolders"
{
    "0" { "path" "/mnt/steam" }
    "1" { "path" "/mnt/games" }
}"#,
    )
    .unwrap();
    let paths: Vec<_> = find_all(&lf, "LibraryFolders.*.path")
        .into_iter()
        .filter_map(Node::as_str)
        .collect();
    assert_eq!(paths, vec!["/mnt/steam", "/mnt/games"]);
    assert_eq!(find_all(&library_folders(), "LibraryFolders.*.path").len(), 2);
}

#[test]
fn find_all_miss_is_empty() {
    let doc = library_folders();
    assert!(find_all(&doc, "*.missing").is_empty());
}

// ============================================================================
// JSON export
// ============================================================================

#[test]
fn json_export_keeps_order_and_text_values() {
    let doc = library_folders();
    let value = to_json(&doc);
    assert_eq!(
        value,
        json!({
            "0": {
                "path": "C:\\Program Files (x86)\\Steam",
                "apps": {"228980": "0", "440": "23000000"}
            },
            "1": {
                "path": "D:\\SteamLibrary",
                "apps": {"620": "12000000"}
            }
        })
    );
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["0", "1"]);
}

#[test]
fn json_export_collects_repeated_keys() {
    let doc = parse(r#""r" { "k" "1" "K" "2" "k" { "x" "3" } }"#).unwrap();
    assert_eq!(to_json(&doc), json!({"k": ["1", "2", {"x": "3"}]}));
}

#[test]
fn json_export_named_wraps_in_root_name() {
    let doc = parse(r#""AppState" { "appid" "440" }"#).unwrap();
    assert_eq!(to_json_named(&doc), json!({"AppState": {"appid": "440"}}));
}

#[test]
fn json_export_of_leaf_is_string() {
    assert_eq!(to_json(&Node::leaf("k", "v")), json!("v"));
}
