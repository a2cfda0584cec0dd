use router_env::{env, Env};

#[test]
fn env_names_parse_case_insensitively() {
    assert_eq!("production".parse::<Env>().ok(), Some(Env::Production));
    assert_eq!("Sandbox".parse::<Env>().ok(), Some(Env::Sandbox));
    assert!("staging".parse::<Env>().is_err());
}

#[test]
fn env_displays_as_config_file_stem() {
    assert_eq!(Env::Development.to_string(), "development");
    assert_eq!(Env::Production.to_string(), "production");
}

#[test]
fn workspace_path_points_above_the_crate() {
    let path = env::workspace_path();
    assert!(path.join("crates").join("router_env").exists());
}

#[test]
fn service_name_is_crate_name() {
    assert_eq!(router_env::service_name!(), "env");
}
