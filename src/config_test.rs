use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: Vec<(String, String)> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

#[test]
fn defaults_when_nothing_set() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.web_dir.ends_with("web"));
    assert!(cfg.pkg_dir.ends_with("wall/pkg"));
    assert_eq!(cfg.addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn reads_overrides() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", " 8080 "),
        ("WALL_WEB_DIR", "/srv/wall"),
        ("WALL_PKG_DIR", "/srv/pkg"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.web_dir, PathBuf::from("/srv/wall"));
    assert_eq!(cfg.pkg_dir, PathBuf::from("/srv/pkg"));
}

#[test]
fn rejects_bad_port() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));
}

#[test]
fn rejects_out_of_range_port() {
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn rejects_empty_dir() {
    let err = ServerConfig::from_lookup(lookup(&[("WALL_WEB_DIR", "  ")])).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyPath { var: "WALL_WEB_DIR" }));
}
