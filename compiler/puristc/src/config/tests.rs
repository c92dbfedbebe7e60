use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_defaults() {
    let Ok((config, files)) = DriverConfig::from_args(&[]) else {
        panic!("empty arguments rejected");
    };
    assert_eq!(config, DriverConfig::default());
    assert_eq!(config.entry, "module");
    assert!(config.parallel);
    assert!(files.is_empty());
}

#[test]
fn test_flags_and_files_mix() {
    let Ok((config, files)) = DriverConfig::from_args(&args(&[
        "a.purs",
        "--entry=expr",
        "--no-parallel",
        "b.purs",
        "--color=never",
        "--stacks",
    ])) else {
        panic!("valid arguments rejected");
    };
    assert_eq!(files, vec!["a.purs".to_string(), "b.purs".to_string()]);
    assert_eq!(config.entry, "expr");
    assert_eq!(config.color, ColorMode::Never);
    assert!(!config.parallel);
    assert!(config.stacks);
    assert!(!config.trivia);
}

#[test]
fn test_single_dash_is_a_file() {
    let Ok((_, files)) = DriverConfig::from_args(&args(&["-"])) else {
        panic!("`-` rejected");
    };
    assert_eq!(files, vec!["-".to_string()]);
}

#[test]
fn test_bad_options() {
    assert!(matches!(
        DriverConfig::from_args(&args(&["--colour=always"])),
        Err(DriverError::UnknownFlag(flag)) if flag == "--colour=always"
    ));
    assert!(matches!(
        DriverConfig::from_args(&args(&["--color=sometimes"])),
        Err(DriverError::InvalidColor(mode)) if mode == "sometimes"
    ));
}
