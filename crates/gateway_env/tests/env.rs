use gateway_env as env;

#[test]
fn env_parses_case_insensitively() {
    assert_eq!("sandbox".parse::<env::Env>().ok(), Some(env::Env::Sandbox));
    assert_eq!("Production".parse::<env::Env>().ok(), Some(env::Env::Production));
    assert!("staging".parse::<env::Env>().is_err());
}

#[test]
fn config_file_names_are_lowercase() {
    assert_eq!(env::Env::Development.config_file_name(), "development");
    assert_eq!(env::Env::Sandbox.config_file_name(), "sandbox");
    assert_eq!(env::Env::Production.config_file_name(), "production");
}

#[test]
fn workspace_path_is_the_workspace_root() {
    let path = env::workspace_path();

    assert!(path.join("Cargo.toml").exists());
    assert!(path.join("crates").join("gateway_env").exists());
}
