use rstest::rstest;
use srvconf_fs::NormalizedPath;

#[test]
fn test_forward_slashes_unchanged() {
    assert_eq!(NormalizedPath::new("foo/bar/baz").as_str(), "foo/bar/baz");
}

#[cfg(windows)]
#[rstest]
#[case("foo\\bar\\baz", "foo/bar/baz")]
#[case("foo/bar\\baz", "foo/bar/baz")]
#[case("C:\\wlp\\usr\\servers", "C:/wlp/usr/servers")]
fn test_normalizes_separators(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), expected);
}

#[cfg(unix)]
#[rstest]
#[case("foo\\bar")]
#[case("conf/C:\\wlp\\server.env")]
fn test_keeps_backslashes_in_file_names(#[case] input: &str) {
    assert_eq!(NormalizedPath::new(input).as_str(), input);
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("usr/servers");
    assert_eq!(base.join("defaultServer").as_str(), "usr/servers/defaultServer");
}

#[cfg(windows)]
#[test]
fn test_join_normalizes_segment() {
    let base = NormalizedPath::new("usr/");
    assert_eq!(base.join("servers\\app").as_str(), "usr/servers/app");
}

#[test]
fn test_to_native_returns_pathbuf() {
    let native = NormalizedPath::new("foo/bar").to_native();
    assert!(native.to_string_lossy().contains("bar"));
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("servers/defaultServer/jvm.options");
    assert_eq!(path.parent().unwrap().as_str(), "servers/defaultServer");
}

#[test]
fn test_parent_of_bare_name_is_none() {
    assert!(NormalizedPath::new("jvm.options").parent().is_none());
}

#[rstest]
#[case("servers/server.xml", Some("xml"))]
#[case("servers/jvm.options", Some("options"))]
#[case("servers/.hidden", None)]
#[case("servers/Makefile", None)]
fn test_extension(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(NormalizedPath::new(input).extension(), expected);
}

#[test]
fn test_file_name() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
    assert!(!path.is_file());
    assert!(!path.is_dir());
}
