use nugraph_util::errors::NugraphError;

#[test]
fn test_io_error_display() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err = NugraphError::from(io_err);
    assert!(err.to_string().contains("I/O error"), "got: {err}");
}

#[test]
fn test_config_error_display() {
    let err = NugraphError::Config {
        message: "missing package".to_string(),
    };
    assert_eq!(err.to_string(), "Config error: missing package");
}

#[test]
fn test_invalid_identity_display() {
    let err = NugraphError::InvalidIdentity {
        message: "empty name".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid package identity: empty name");
}

#[test]
fn test_network_error_display() {
    let err = NugraphError::Network {
        message: "timeout".to_string(),
    };
    assert_eq!(err.to_string(), "Network error: timeout");
}

#[test]
fn test_render_error_display() {
    let err = NugraphError::Render {
        message: "exit status 1".to_string(),
    };
    assert_eq!(err.to_string(), "Render failed: exit status 1");
}

#[test]
fn test_generic_error_display() {
    let err = NugraphError::Generic {
        message: "something broke".to_string(),
    };
    assert_eq!(err.to_string(), "something broke");
}

#[test]
fn test_io_error_from_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err: NugraphError = io_err.into();
    assert!(matches!(err, NugraphError::Io(_)));
}
