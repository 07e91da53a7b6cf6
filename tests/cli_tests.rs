use clap::Parser;
use std::fs;
use tailwind_variants::{
    check_configs, merge_lines, run_resolve, CheckArgs, Cli, Commands, ResolveArgs, TvOptions,
    VariantError,
};
use tempfile::TempDir;

const CARD_YAML: &str = r#"
slots:
  base: "rounded border"
  title: "font-bold text-sm"
variants:
  size:
    sm:
      title: "text-xs"
    lg:
      title: "text-lg"
"#;

fn resolve_args(config: &std::path::Path, extra: &[&str]) -> ResolveArgs {
    let mut args = vec!["tv-cli", "resolve", "-c", config.to_str().unwrap()];
    args.extend_from_slice(extra);
    match Cli::parse_from(args).command {
        Commands::Resolve(args) => args,
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_cli_parse_resolve() {
    let args = vec![
        "tv-cli",
        "resolve",
        "-c", "button.yaml",
        "-p", "size=sm",
        "-p", "disabled=true",
        "--class", "mt-2",
        "--no-merge",
    ];

    let cli = Cli::parse_from(args);
    assert_eq!(cli.log_level, "warn");

    match cli.command {
        Commands::Resolve(args) => {
            assert_eq!(args.config.to_str().unwrap(), "button.yaml");
            assert_eq!(args.props, vec!["size=sm", "disabled=true"]);
            assert_eq!(args.class.as_deref(), Some("mt-2"));
            assert!(args.no_merge);
            assert!(args.slot.is_none());
            assert!(!args.strict);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_cli_parse_check_and_merge() {
    let cli = Cli::parse_from(vec![
        "tv-cli",
        "--log-level", "debug",
        "check",
        "-i", "components/**/*.yaml",
        "-i", "components/**/*.json",
        "-e", "**/fixtures/**",
        "--strict",
        "-v",
    ]);
    assert_eq!(cli.log_level, "debug");
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.input, vec!["components/**/*.yaml", "components/**/*.json"]);
            assert_eq!(args.exclude, vec!["**/fixtures/**"]);
            assert!(args.strict);
            assert!(args.verbose);
        }
        _ => panic!("Expected Check command"),
    }

    let cli = Cli::parse_from(vec!["tv-cli", "merge", "--no-merge"]);
    match cli.command {
        Commands::Merge(args) => {
            assert!(args.no_merge);
            assert!(args.merge_config.is_none());
        }
        _ => panic!("Expected Merge command"),
    }
}

#[test]
fn test_cli_requires_config() {
    assert!(Cli::try_parse_from(vec!["tv-cli", "resolve"]).is_err());
    assert!(Cli::try_parse_from(vec!["tv-cli", "check"]).is_err());
}

#[test]
fn test_run_resolve_all_slots() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("card.yaml");
    fs::write(&path, CARD_YAML).unwrap();

    let output = run_resolve(&resolve_args(&path, &["-p", "size=lg"])).unwrap();
    assert_eq!(output, "base: rounded border\ntitle: font-bold text-lg");
}

#[test]
fn test_run_resolve_all_slots_with_class() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("card.yaml");
    fs::write(&path, CARD_YAML).unwrap();

    let output = run_resolve(&resolve_args(&path, &["--class", "mt-2"])).unwrap();
    assert_eq!(output, "base: rounded border mt-2\ntitle: font-bold text-sm");

    let output = run_resolve(&resolve_args(&path, &["--class", "rounded-none", "-p", "size=sm"])).unwrap();
    assert_eq!(output, "base: border rounded-none\ntitle: font-bold text-xs");
}

#[test]
fn test_run_resolve_single_slot_with_class() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("card.yaml");
    fs::write(&path, CARD_YAML).unwrap();

    let output = run_resolve(&resolve_args(
        &path,
        &["--slot", "title", "-p", "size=sm", "--class", "text-red-500"],
    ))
    .unwrap();
    assert_eq!(output, "font-bold text-xs text-red-500");

    let err = run_resolve(&resolve_args(&path, &["--slot", "footer"])).unwrap_err();
    assert!(matches!(err, VariantError::InvalidInput(_)));
    assert!(err.to_string().contains("footer"));
}

#[test]
fn test_run_resolve_props_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("badge.json");
    fs::write(
        &path,
        r#"{ "base": "px-2", "variants": { "pill": { "true": "rounded-full" } } }"#,
    )
    .unwrap();

    let output = run_resolve(&resolve_args(&path, &["--props-json", r#"{"pill": true}"#])).unwrap();
    assert_eq!(output, "px-2 rounded-full");

    let output = run_resolve(&resolve_args(&path, &["--class", "px-4"])).unwrap();
    assert_eq!(output, "px-4");

    let output = run_resolve(&resolve_args(&path, &["--class", "px-4", "--no-merge"])).unwrap();
    assert_eq!(output, "px-2 px-4");
}

#[test]
fn test_resolve_args_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("badge.json");
    fs::write(&path, r#"{ "base": "px-2" }"#).unwrap();

    let args = resolve_args(&path, &["-p", "size"]);
    assert!(args.validate().is_err());
    assert!(run_resolve(&args).is_err());
}

#[test]
fn test_check_configs_reports_each_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("good.yaml"), CARD_YAML).unwrap();
    fs::write(
        temp_dir.path().join("bad.json"),
        r#"{ "compoundVariants": { "size": "sm" } }"#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("loose.yaml"),
        "slots:\n  icon: h-4\ncompoundSlots:\n  - slots: [icon, missing]\n    class: w-4\n",
    )
    .unwrap();

    let args = CheckArgs {
        input: vec![
            format!("{}/*.yaml", temp_dir.path().display()),
            format!("{}/*.json", temp_dir.path().display()),
        ],
        exclude: vec![],
        strict: false,
        verbose: false,
    };
    let report = check_configs(&args).unwrap();
    assert_eq!(report.valid.len(), 2);
    assert_eq!(report.invalid.len(), 1);
    assert!(report.invalid[0].0.ends_with("bad.json"));
    assert!(!report.is_ok());

    let strict = CheckArgs { strict: true, ..args };
    let report = check_configs(&strict).unwrap();
    assert_eq!(report.invalid.len(), 2);
}

#[test]
fn test_check_configs_exclude_and_no_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("card.yaml"), CARD_YAML).unwrap();

    let args = CheckArgs {
        input: vec![format!("{}/*.yaml", temp_dir.path().display())],
        exclude: vec!["**/card.yaml".to_string()],
        strict: false,
        verbose: false,
    };
    assert!(matches!(check_configs(&args), Err(VariantError::NoFilesFound)));

    let args = CheckArgs {
        exclude: vec![],
        ..args
    };
    let report = check_configs(&args).unwrap();
    assert!(report.is_ok());
    assert_eq!(report.valid[0].1, vec!["size"]);
}

#[test]
fn test_merge_lines_keeps_lines_apart() {
    let input = "px-2 px-4\ntext-sm text-lg\n\nbtn";
    assert_eq!(merge_lines(input, &TvOptions::default()), "px-4\ntext-lg\n\nbtn");
    assert_eq!(
        merge_lines(input, &TvOptions::default().without_merge()),
        "px-2 px-4\ntext-sm text-lg\n\nbtn"
    );
}
