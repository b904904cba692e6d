//! Verify XML config is parsed and used without touching user state.

use std::fs;
use std::time::Duration;
use tempfile::tempdir;

use sort_fat_folder::{LogLevel, OrderingPolicy, load_config_from_xml_path};

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let log_file = td.path().join("sort.log");

    let xml = format!(
        r#"
<config>
  <order>last</order>
  <case_sensitive>true</case_sensitive>
  <recurse>false</recurse>
  <wait_create_ms>1</wait_create_ms>
  <wait_delete_ms> 2 </wait_delete_ms>
  <wait_move_ms>0</wait_move_ms>
  <wait_swap_ms>400</wait_swap_ms>
  <log_level>debug</log_level>
  <log_file>{}</log_file>
</config>
"#,
        log_file.display()
    );
    fs::write(&cfg_path, xml).unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).expect("load config");
    assert_eq!(cfg.order, OrderingPolicy::SubfoldersLast);
    assert!(cfg.case_sensitive);
    assert!(!cfg.recurse);
    assert_eq!(cfg.throttle.create, Duration::from_millis(1));
    assert_eq!(cfg.throttle.delete, Duration::from_millis(2));
    assert_eq!(cfg.throttle.relocate, Duration::ZERO);
    assert_eq!(cfg.throttle.swap, Duration::from_millis(400));
    assert_eq!(cfg.log_level, LogLevel::Debug);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
    assert!(!cfg.dry_run);
}

#[test]
fn missing_fields_keep_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config>\n  <order>mixed</order>\n  <log_file>   </log_file>\n</config>\n").unwrap();

    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.order, OrderingPolicy::Mixed);
    assert!(!cfg.case_sensitive);
    assert!(cfg.recurse);
    assert_eq!(cfg.throttle.swap, Duration::from_millis(200));
    assert_eq!(cfg.log_level, LogLevel::Normal);
    assert!(cfg.log_file.is_none(), "blank log_file means no file logging");
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><download_base>/x</download_base></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn non_numeric_wait_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><wait_move_ms>soon</wait_move_ms></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}

#[test]
fn malformed_xml_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><order>first</config>").unwrap();
    assert!(load_config_from_xml_path(&cfg_path).is_err());
}
