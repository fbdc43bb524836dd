use std::path::PathBuf;

use inkdown::config::{ConfigFlags, load_config_flags, parse_flag_tokens};
use inkdown::render::RendererChoice;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".inkdownrc");
    let content = r#"
# comment
--stats

--renderer reduced

--output=preview.html
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.stats);
    assert_eq!(flags.renderer, Some(RendererChoice::Reduced));
    assert_eq!(flags.output, Some(PathBuf::from("preview.html")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".inkdownrc");
    let content = "--stats\n--renderer reduced\n--output file.html\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "inkdown".to_string(),
        "--renderer".to_string(),
        "commonmark".to_string(),
        "--edit-demo".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.stats, "file flags should remain enabled");
    assert!(effective.edit_demo, "cli flags should be applied");
    assert_eq!(
        effective.renderer,
        Some(RendererChoice::CommonMark),
        "cli should override the renderer"
    );
    assert_eq!(
        effective.output,
        Some(PathBuf::from("file.html")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "inkdown".to_string(),
        "--renderer=reduced".to_string(),
        "--output=out/preview.html".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.renderer, Some(RendererChoice::Reduced));
    assert_eq!(flags.output, Some(PathBuf::from("out/preview.html")));
}

#[test]
fn test_defaults_are_all_off() {
    let flags = ConfigFlags::default();
    assert!(!flags.stats);
    assert!(!flags.edit_demo);
    assert_eq!(flags.renderer, None);
    assert_eq!(flags.output, None);
}
