use super::*;

#[test]
fn loads_direct_verification() {
    let toml = r#"
        bind_addr = "127.0.0.1:9000"
        platform = "linear"
        repositories_path = "repos.toml"
        procedures_path = "procedures.toml"

        [verification]
        mode = "direct"
        secret = "shh"
    "#;
    let config: DaemonConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.bind_addr.port(), 9000);
    match config.verification {
        VerificationConfig::Direct { secret } => assert_eq!(secret, "shh"),
        VerificationConfig::Proxy { .. } => panic!("expected direct mode"),
    }
    assert_eq!(config.snapshot_interval_secs, 60);
    assert_eq!(config.gc_interval_secs, 3600);
}

#[test]
fn loads_proxy_verification_with_defaults() {
    let toml = r#"
        repositories_path = "repos.toml"
        procedures_path = "procedures.toml"

        [verification]
        mode = "proxy"
        token = "tok"
    "#;
    let config: DaemonConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.platform, "linear");
    assert_eq!(config.default_runner_executable, "coding-cli");
    match config.verification {
        VerificationConfig::Proxy { token } => assert_eq!(token, "tok"),
        VerificationConfig::Direct { .. } => panic!("expected proxy mode"),
    }
}

#[test]
fn rejects_unknown_field() {
    let toml = r#"
        repositories_path = "repos.toml"
        procedures_path = "procedures.toml"
        bogus = true

        [verification]
        mode = "proxy"
        token = "tok"
    "#;
    assert!(toml::from_str::<DaemonConfig>(toml).is_err());
}

#[test]
fn load_missing_file_errors() {
    let err = DaemonConfig::load(std::path::Path::new("/nonexistent/daemon.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
