use quill_core::config::{ConvertConfig, OutputFormat, SessionConfig};
use quill_core::error::{ConvertError, QuillError};
use quill_core::formatter::Dialect;
use quill_core::convert_file;
use std::fs;
use std::path::Path;

fn write_source(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("doc.md");
    fs::write(&path, contents).unwrap();
    path
}

fn config(converter: &str, base: &Path, clean: bool) -> ConvertConfig {
    ConvertConfig {
        converter_path: Some(converter.into()),
        output_format: OutputFormat::Html,
        dialect: Dialect::DocBook,
        session: SessionConfig {
            clean_session_dir: clean,
            base_dir: Some(base.to_path_buf()),
        },
    }
}

#[test]
fn test_config_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quill.yaml");
    fs::write(
        &path,
        "output_format: html\ndialect: docbook\nsession:\n  base_dir: /tmp/quill\n",
    )
    .unwrap();

    let config = ConvertConfig::from_yaml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.output_format, OutputFormat::Html);
    assert_eq!(config.dialect, Dialect::DocBook);
    assert!(config.session.clean_session_dir);
    assert_eq!(config.session.base_dir.as_deref(), Some(Path::new("/tmp/quill")));
}

#[test]
fn test_convert_with_missing_converter() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "Hello world");
    let missing = dir.path().join("no-such-converter");
    let config = config(missing.to_str().unwrap(), dir.path(), true);

    let result = convert_file(&input, &dir.path().join("out.html"), &config);
    assert!(matches!(
        result,
        Err(QuillError::Convert(ConvertError::Spawn { .. }))
    ));
}

#[test]
fn test_convert_surfaces_parse_errors_before_running_converter() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "#\n");
    let sessions = dir.path().join("sessions");
    let config = config("true", &sessions, false);

    let result = convert_file(&input, &dir.path().join("out.html"), &config);
    assert!(matches!(result, Err(QuillError::Parser(_))));
    assert!(!sessions.exists());
}

#[cfg(unix)]
#[test]
fn test_convert_keeps_intermediate_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "Hello world");
    let sessions = dir.path().join("sessions");

    convert_file(&input, &dir.path().join("out.html"), &config("true", &sessions, false)).unwrap();

    let session_dirs: Vec<_> = fs::read_dir(&sessions).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(session_dirs.len(), 1);
    let files: Vec<_> = fs::read_dir(&session_dirs[0])
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].extension().unwrap(), "xml");
    assert_eq!(
        fs::read_to_string(&files[0]).unwrap(),
        "<book><section xml:id=\"synthetic-1\"><para>Hello world</para></section></book>"
    );
}

#[cfg(unix)]
#[test]
fn test_convert_cleans_session_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "# Title\nbody");
    let sessions = dir.path().join("sessions");

    convert_file(&input, &dir.path().join("out.html"), &config("true", &sessions, true)).unwrap();
    assert_eq!(fs::read_dir(&sessions).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_convert_reports_converter_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(dir.path(), "Hello world");
    let sessions = dir.path().join("sessions");

    let result = convert_file(&input, &dir.path().join("out.html"), &config("false", &sessions, true));
    match result {
        Err(QuillError::Convert(ConvertError::ConversionFailed { status, .. })) => {
            assert!(!status.success());
        }
        other => panic!("expected ConversionFailed, got {other:?}"),
    }
    assert_eq!(fs::read_dir(&sessions).unwrap().count(), 0);
}
