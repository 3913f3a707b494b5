use casefile_core::casefile_types::{ConfigError, StoreConfig};
use casefile_core::{export_file_name, Query, Store};

const LOCAL_USERS: &str = "Name,Admin\nbob,true\nalice,false\nbob,true";

const PROCESS: &str = "\
Pid,Image,CommandLine
4,System,
812,svchost.exe,\"C:\\Windows\\system32\\svchost.exe -k netsvcs\"
1337,powershell.exe,\"powershell -enc Ym9i, -nop\"
";

const DNS_CACHE: &str = "\r
Entry,Name,Data\r
www.example.com,www.example.com,93.184.216.34\r
\r
evil.example,evil.example,203.0.113.9\r
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn loaded() -> Store {
    init_logging();
    let mut store = Store::new();
    store.ingest("LocalUsers.csv", LOCAL_USERS);
    store.ingest("process.csv", PROCESS);
    store.ingest("dns_cache.CSV", DNS_CACHE);
    store
}

#[test]
fn local_users_walkthrough() {
    let mut store = loaded();

    store.set_query("index=localusers bob");
    let page = store.page();
    assert_eq!(page.total_results, 2);
    assert!(page.results.iter().all(|r| r.record.get("Name") == Some("bob")));

    store.set_query("index=localusers name=\"bob\"");
    assert_eq!(store.page().total_results, 0);
}

#[test]
fn same_fallback_name_replaces() {
    init_logging();
    let mut store = Store::new();
    store.ingest("a.csv", "x\n1\n2");
    store.ingest("A.CSV", "y\n3");

    assert_eq!(store.active_indexes(), vec!["a"]);
    let index = store.index("a").unwrap();
    assert_eq!(index.columns(), &["y".to_owned()]);
    assert_eq!(index.len(), 1);
    assert_eq!(store.search().len(), 1);
}

#[test]
fn crlf_and_blank_lines_are_tolerated() {
    let store = loaded();
    let index = store.index("DNSCache").unwrap();
    assert_eq!(index.columns(), &["Entry", "Name", "Data"].map(String::from));
    assert_eq!(index.len(), 2);
    assert_eq!(index.record(1).unwrap().get("Data"), Some("203.0.113.9"));
}

#[test]
fn free_text_across_indexes() {
    let store = loaded();

    let results = store.search_for("EXAMPLE");
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.index == "DNSCache"));

    let results = store.search_for("-nop");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].record.get("Pid"), Some("1337"));
}

#[test]
fn queries_classify_consistently() {
    assert!(Query::parse("  ").is_all());
    assert!(matches!(
        Query::parse("Index=Process svchost"),
        Query::Scoped {
            index: "Process",
            filter: Some("svchost")
        }
    ));
    assert_eq!(Query::parse("Image=\"svchost.exe\""), Query::FreeText("Image=\"svchost.exe\""));
}

#[test]
fn profile_drives_drill_down() {
    let mut store = loaded();

    let fields = store.fields("LocalUsers");
    let admin = fields.iter().find(|f| f.name == "Admin").unwrap();
    let top = admin.top_values[0];
    assert_eq!((top.value, top.count), ("true", 2));

    let query = format!("index=localusers {}", top.value);
    drop(fields);
    store.set_query(query);
    assert_eq!(store.page().total_results, 2);
}

#[test]
fn export_of_mixed_results() {
    let mut store = loaded();
    store.set_query("index=process -nop");
    assert_eq!(
        store.export_string(),
        "_index,Pid,Image,CommandLine\nProcess,1337,powershell.exe,\"powershell -enc Ym9i, -nop\""
    );

    store.set_query("4");

    let exported = store.export_string();
    let mut lines = exported.lines();
    assert_eq!(
        lines.next(),
        Some("_index,Pid,Image,CommandLine,Entry,Name,Data")
    );
    assert_eq!(lines.next(), Some("Process,4,System,,,,"));
    assert_eq!(
        lines.next(),
        Some("DNSCache,,,,www.example.com,www.example.com,93.184.216.34")
    );
    assert_eq!(lines.next(), None);
    assert!(!exported.ends_with('\n'));
}

#[test]
fn paging_through_a_large_index() {
    init_logging();
    let mut content = String::from("Id,Path\n");
    for i in 0..250 {
        content.push_str(&format!("{i},C:\\Temp\\file{i}.tmp\n"));
    }

    let mut store = Store::new();
    store.ingest("remotelyopenedfiles.csv", &content);

    let page = store.page();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.results.len(), 100);

    store.set_page(3);
    let page = store.page();
    assert_eq!(page.results.len(), 50);
    assert_eq!(page.results[0].record.get("Id"), Some("200"));

    store.set_page(4);
    assert!(store.page().results.is_empty());
}

#[test]
fn rejected_configuration() {
    let err = Store::with_config(StoreConfig::with_page_size(0)).err();
    assert_eq!(err, Some(ConfigError::ZeroPageSize));
}

#[test]
fn clear_all_then_reuse() {
    let mut store = loaded();
    store.set_query("bob");
    store.set_page(2);
    store.clear_all();

    assert!(store.is_empty());
    assert_eq!(store.page().total_results, 0);
    assert_eq!(store.export_string(), "_index");

    store.ingest("localusers.csv", LOCAL_USERS);
    assert_eq!(store.search().len(), 3);
    assert_eq!(store.metrics().files_ingested, 4);
}

#[test]
fn export_names_are_timestamped() {
    assert_eq!(export_file_name(0), "forensic-results-0.csv");
}
