use std::sync::Arc;

use credscout_core::cache::CatalogCache;

const PROCESSED_A: &str = "\
program_id,title,institution,credential_type,province,delivery_mode,duration_weeks,price_cad,skills,description,program_url,date_added
1,Intro to Python,Seneca Polytechnic,course,ON,online,4,1000,Python,First programming course.,https://example.edu/b,2025-05-01
";

const PROCESSED_B: &str = "\
program_id,title,institution,credential_type,province,delivery_mode,duration_weeks,price_cad,skills,description,program_url,date_added
1,Intro to Python,Seneca Polytechnic,course,ON,online,4,1000,Python,First programming course.,https://example.edu/b,2025-05-01
2,Advanced SQL,Seneca Polytechnic,course,ON,hybrid,6,1500,SQL,Query tuning.,https://example.edu/c,2025-06-01
";

#[test]
fn repeated_load_of_same_upload_reuses_the_table() {
    let mut cache = CatalogCache::new(4);
    let first = cache.load("programs.csv", PROCESSED_A.as_bytes()).unwrap();
    let second = cache.load("programs.csv", PROCESSED_A.as_bytes()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

#[test]
fn changed_contents_under_same_name_reparse() {
    let mut cache = CatalogCache::new(4);
    let first = cache.load("programs.csv", PROCESSED_A.as_bytes()).unwrap();
    let second = cache.load("programs.csv", PROCESSED_B.as_bytes()).unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.height(), 1);
    assert_eq!(second.height(), 2);
    // the stale entry is replaced, not kept alongside
    assert_eq!(cache.len(), 1);
}

#[test]
fn least_recently_used_entry_is_evicted() {
    let mut cache = CatalogCache::new(1);
    let first = cache.load("a.csv", PROCESSED_A.as_bytes()).unwrap();
    cache.load("b.csv", PROCESSED_B.as_bytes()).unwrap();
    assert_eq!(cache.len(), 1);

    // "a.csv" was evicted, so loading it again builds a fresh table
    let reloaded = cache.load("a.csv", PROCESSED_A.as_bytes()).unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(cache.len(), 1);
}

#[test]
fn invalidate_drops_only_the_named_entry() {
    let mut cache = CatalogCache::new(4);
    cache.load("a.csv", PROCESSED_A.as_bytes()).unwrap();
    cache.load("b.csv", PROCESSED_B.as_bytes()).unwrap();

    assert!(cache.invalidate("a.csv"));
    assert!(!cache.invalidate("a.csv"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn unparseable_upload_surfaces_a_load_error_and_caches_nothing() {
    let mut cache = CatalogCache::new(4);
    assert!(cache.load("bad.csv", b"just,two\nvalues,here\n").is_err());
    assert!(cache.is_empty());
}
