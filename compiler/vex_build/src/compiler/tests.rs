use super::*;
use pretty_assertions::assert_eq;

fn strings(args: &[OsString]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string_lossy().into_owned()).collect()
}

#[cfg(unix)]
fn shell(script: &str) -> Invocation {
    Invocation {
        program: PathBuf::from("/bin/sh"),
        args: vec!["-c".into(), script.into()],
        input: PathBuf::from("unused.vfl"),
    }
}

#[test]
fn test_snippet_invocation() {
    let config = BuildConfig {
        include_dirs: vec![PathBuf::from("/vex/lib")],
        ..BuildConfig::default()
    };
    let invocation = Invocation::vcc(
        PathBuf::from("vcc"),
        Path::new("/tmp/snippet.vfl"),
        Path::new("/work"),
        BuildMode::Snippet,
        &config,
    );
    let include = Path::new("/work").join("include");
    assert_eq!(
        strings(&invocation.args),
        vec![
            "--compile-all".to_string(),
            "--vex-output".to_string(),
            "stdout".to_string(),
            "--include-dir".to_string(),
            "/work".to_string(),
            "--include-dir".to_string(),
            include.to_string_lossy().into_owned(),
            "--include-dir".to_string(),
            "/vex/lib".to_string(),
            "--context".to_string(),
            "cvex".to_string(),
            "/tmp/snippet.vfl".to_string(),
        ]
    );
    assert_eq!(invocation.input, PathBuf::from("/tmp/snippet.vfl"));
}

#[test]
fn test_default_invocation_has_no_context() {
    let config = BuildConfig {
        vex_output: OutputSink::File(PathBuf::from("out.vex")),
        ..BuildConfig::default()
    };
    let invocation = Invocation::vcc(
        PathBuf::from("vcc"),
        Path::new("shader.vfl"),
        Path::new("."),
        BuildMode::Default,
        &config,
    );
    let args = strings(&invocation.args);
    assert_eq!(args[..3], ["--compile-all", "--vex-output", "out.vex"]);
    assert!(!args.iter().any(|arg| arg == "--context"));
    assert_eq!(args.last().map(String::as_str), Some("shader.vfl"));
}

#[test]
fn test_spawn_failure() {
    let invocation = Invocation {
        program: PathBuf::from("/definitely/not/a/vcc"),
        args: Vec::new(),
        input: PathBuf::from("x.vfl"),
    };
    let err = VccCompiler::default()
        .compile(&invocation, Duration::from_secs(1))
        .unwrap_err();
    assert!(matches!(err, BuildError::Spawn { .. }), "{err:?}");
}

#[cfg(unix)]
#[test]
fn test_captures_stderr_only() {
    let invocation = shell("echo compiled; echo 'w.vfl:1:1: Error: boom' >&2");
    let stderr = VccCompiler::default()
        .compile(&invocation, Duration::from_secs(10))
        .unwrap();
    assert_eq!(stderr, "w.vfl:1:1: Error: boom\n");
}

#[cfg(unix)]
#[test]
fn test_nonzero_exit_still_returns_diagnostics() {
    let invocation = shell("echo 'w.vfl:2:3: Error: bad' >&2; exit 1");
    let stderr = VccCompiler::default()
        .compile(&invocation, Duration::from_secs(10))
        .unwrap();
    assert_eq!(stderr, "w.vfl:2:3: Error: bad\n");
}

#[cfg(unix)]
#[test]
fn test_timeout_stops_compiler() {
    let started = Instant::now();
    let err = VccCompiler::default()
        .compile(&shell("exec sleep 5"), Duration::from_millis(100))
        .unwrap_err();
    assert!(
        matches!(err, BuildError::SubprocessTimeout { timeout } if timeout == Duration::from_millis(100)),
        "{err:?}"
    );
    assert!(started.elapsed() < Duration::from_secs(4));
}
