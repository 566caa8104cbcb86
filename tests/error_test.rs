use postkit::{PostkitError, Result};
use std::io;

#[test]
fn test_template_error() {
    let err = PostkitError::TemplateError("no slots".to_string());
    assert_eq!(err.to_string(), "模板错误: no slots");
}

#[test]
fn test_invalid_collection() {
    let err = PostkitError::InvalidCollection("root must be a JSON object".to_string());
    assert_eq!(err.to_string(), "无效的 Collection: root must be a JSON object");
}

#[test]
fn test_read_error_includes_path() {
    let err = PostkitError::read(
        "test-results/results.json",
        io::Error::new(io::ErrorKind::NotFound, "not found"),
    );
    let message = err.to_string();
    assert!(message.starts_with("读取文件失败"));
    assert!(message.contains("test-results/results.json"));
}

#[test]
fn test_json_error_includes_path() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = PostkitError::json("collection.json", source);
    assert!(err.to_string().contains("collection.json"));
}

#[test]
fn test_error_conversion_from_io() {
    let err: PostkitError = io::Error::other("disk full").into();
    assert!(matches!(err, PostkitError::IoError(_)));
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(PostkitError::ConfigError("test".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
    match result {
        Err(PostkitError::ConfigError(msg)) => assert_eq!(msg, "test"),
        _ => panic!("Expected ConfigError"),
    }
}
