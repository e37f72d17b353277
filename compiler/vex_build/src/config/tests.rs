use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|arg| (*arg).to_string()).collect()
}

#[test]
fn test_defaults() {
    let config = BuildConfig::default();
    assert_eq!(config.vcc, "vcc");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.include_dirs.is_empty());
    assert_eq!(config.vex_output, OutputSink::Stdout);
    assert!(!config.show_generated);
}

#[test]
fn test_mode_context() {
    assert_eq!(BuildMode::Default.context(), None);
    assert_eq!(BuildMode::Snippet.context(), Some("cvex"));
    assert_eq!(BuildMode::Library.context(), Some("cvex"));
}

#[test]
fn test_env_overrides() {
    let config = BuildConfig::default().with_env(|key| match key {
        VCC_ENV => Some("/opt/hfs/bin/vcc".to_string()),
        TIMEOUT_ENV => Some("2.5".to_string()),
        _ => None,
    });
    assert_eq!(config.vcc, "/opt/hfs/bin/vcc");
    assert_eq!(config.timeout, Duration::from_millis(2500));
}

#[test]
fn test_env_invalid_values_ignored() {
    let config = BuildConfig::default().with_env(|key| match key {
        VCC_ENV => Some("  ".to_string()),
        TIMEOUT_ENV => Some("soon".to_string()),
        _ => None,
    });
    assert_eq!(config.vcc, "vcc");
    assert_eq!(config.timeout, Duration::from_secs(30));
}

#[test]
fn test_parse_timeout() {
    assert_eq!(parse_timeout("10"), Some(Duration::from_secs(10)));
    assert_eq!(parse_timeout(" 0.5 "), Some(Duration::from_millis(500)));
    assert_eq!(parse_timeout("0"), None);
    assert_eq!(parse_timeout("-3"), None);
    assert_eq!(parse_timeout("inf"), None);
}

#[test]
fn test_parse_build_options() {
    let options = parse_build_options(
        &args(&[
            "--snippet",
            "--vcc=/usr/local/bin/vcc",
            "--timeout=5",
            "--include-dir=/vex/include",
            "--include-dir=lib",
            "--vex-output=out.vex",
            "--show-generated",
            "wrangle.vfl",
        ]),
        BuildConfig::default(),
    );
    assert_eq!(options.mode, BuildMode::Snippet);
    assert_eq!(options.file, Some(PathBuf::from("wrangle.vfl")));
    assert_eq!(options.config.vcc, "/usr/local/bin/vcc");
    assert_eq!(options.config.timeout, Duration::from_secs(5));
    assert_eq!(
        options.config.include_dirs,
        vec![PathBuf::from("/vex/include"), PathBuf::from("lib")]
    );
    assert_eq!(options.config.vex_output, OutputSink::File(PathBuf::from("out.vex")));
    assert!(options.config.show_generated);
}

#[test]
fn test_flags_override_base_config() {
    let base = BuildConfig {
        vcc: "from-env".to_string(),
        ..BuildConfig::default()
    };
    let options = parse_build_options(&args(&["lib.vfl", "--library"]), base.clone());
    assert_eq!(options.config.vcc, "from-env");
    assert_eq!(options.mode, BuildMode::Library);

    let options = parse_build_options(&args(&["--vcc=vcc2", "lib.vfl"]), base);
    assert_eq!(options.config.vcc, "vcc2");
}

#[test]
fn test_bad_flags_skipped() {
    let options = parse_build_options(
        &args(&["--timeout=never", "--frobnicate", "a.vfl", "b.vfl"]),
        BuildConfig::default(),
    );
    assert_eq!(options.config.timeout, Duration::from_secs(30));
    assert_eq!(options.file, Some(PathBuf::from("a.vfl")));
    assert_eq!(options.mode, BuildMode::Default);
}
