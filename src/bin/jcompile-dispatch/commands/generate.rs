//! POM generation command

use std::path::PathBuf;

use anyhow::Result;
use serde_json::{json, Value};

use crate::cli::GenerateArgs;
use crate::GlobalOptions;
use jcompile::core::plugin::PluginKind;
use jcompile::core::{Platform, MANIFEST_NAME};
use jcompile::ops::{generate, GenerateOptions, GenerateResult, MergeOutcome};
use jcompile::util::diagnostic::suggestions;
use jcompile::util::shell::Status;
use jcompile::util::Config;

pub fn execute(args: GenerateArgs, global_opts: &GlobalOptions) -> Result<()> {
    let shell = &global_opts.shell;
    let ctx = &global_opts.ctx;

    let config = ctx.load_config();
    let opts = options_from(args, &config, |p| ctx.resolve(&p));

    let result = match generate(&opts) {
        Ok(result) => result,
        Err(e) => {
            if shell.is_json() {
                shell.error(format!("{:#}", e));
            }
            return Err(e);
        }
    };

    if shell.is_json() {
        if let Some(event) = merge_warning_event(&result.merge) {
            shell.json_event(&event);
        }
        shell.json_event(&generated_event(&result));
        return Ok(());
    }

    match &result.merge {
        MergeOutcome::Unreadable { error, .. } => {
            shell.diagnostic(&error.to_diagnostic());
            if shell.is_verbose() {
                if let Some(report) = error.to_source_report() {
                    eprintln!("{:?}", miette::Report::new(report));
                }
            }
        }
        MergeOutcome::Merged(report) => {
            if let Some(existing) = &opts.existing {
                shell.status(
                    Status::Merged,
                    format!(
                        "{} ({} identity fields, {} properties, {} dependencies)",
                        existing.display(),
                        report.identity_overwritten + report.identity_inserted,
                        report.properties_added,
                        report.dependencies_carried
                    ),
                );
            }
        }
        MergeOutcome::NoExisting => {}
    }

    if result.has_packaging() {
        shell.status(
            Status::Added,
            "Linux-specific packaging plugins (RPM and DEB)",
        );
    }
    shell.status(
        Status::Generated,
        format!("POM file: {}", result.output.display()),
    );
    shell.note(format!("Platform: {}", result.platform));
    shell.note("Native image support: enabled");

    shell.line("");
    shell.line("Next steps:");
    for (i, step) in next_steps(&result).iter().enumerate() {
        shell.line(format!("  {}. {}", i + 1, step));
    }

    Ok(())
}

/// Combine flags and configuration. Flags win over config.
fn options_from(
    args: GenerateArgs,
    config: &Config,
    resolve: impl Fn(PathBuf) -> PathBuf,
) -> GenerateOptions {
    let output = args
        .output
        .or_else(|| config.output().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(MANIFEST_NAME));

    GenerateOptions {
        existing: args.existing.map(&resolve),
        output: resolve(output),
        platform: args.platform.unwrap_or_else(Platform::current),
        settings: config.build_settings(),
    }
}

fn next_steps(result: &GenerateResult) -> Vec<String> {
    let mut steps = vec![
        format!("Review the generated {}", result.output.display()),
        suggestions::SET_MAIN_CLASS.to_string(),
    ];
    for kind in result.plugin_kinds() {
        let verb = match kind {
            PluginKind::NativeImage => "build native image",
            PluginKind::Rpm => "build RPM",
            PluginKind::Deb => "build DEB",
        };
        steps.push(format!("Run `{}` to {}", kind.goal_hint(), verb));
    }
    steps
}

fn merge_warning_event(outcome: &MergeOutcome) -> Option<Value> {
    match outcome {
        MergeOutcome::Unreadable { path, error } => Some(json!({
            "reason": "merge-warning",
            "path": path,
            "message": format!("Could not merge with existing POM: {}", error),
        })),
        _ => None,
    }
}

fn generated_event(result: &GenerateResult) -> Value {
    let merge = match &result.merge {
        MergeOutcome::NoExisting => json!({ "status": "none" }),
        MergeOutcome::Unreadable { .. } => json!({ "status": "skipped" }),
        MergeOutcome::Merged(report) => json!({ "status": "merged", "report": report }),
    };

    json!({
        "reason": "generated",
        "output": result.output,
        "platform": result.platform.as_str(),
        "plugins": result.plugins.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        "properties": result.properties,
        "dependencies": result.dependencies.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        "merge": merge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use jcompile::core::plugin::Coordinate;
    use jcompile::ops::MergeReport;
    use std::path::Path;

    /// Helper to parse GenerateArgs from command-line strings.
    fn parse_generate_args(args: &[&str]) -> GenerateArgs {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            generate: GenerateArgs,
        }
        let cli = TestCli::parse_from(args);
        cli.generate
    }

    fn linux_result(merge: MergeOutcome) -> GenerateResult {
        GenerateResult {
            output: PathBuf::from("/work/pom.xml"),
            platform: Platform::Linux,
            plugins: vec![
                PluginKind::NativeImage.coordinate(),
                PluginKind::Rpm.coordinate(),
                PluginKind::Deb.coordinate(),
            ],
            properties: vec!["maven.compiler.source".to_string()],
            dependencies: vec![Coordinate::new("org.slf4j", "slf4j-api", Some("2.0.9"))],
            merge,
        }
    }

    // =========================================================================
    // Argument Tests
    // =========================================================================

    #[test]
    fn test_args_defaults() {
        let args = parse_generate_args(&["test"]);
        assert!(args.existing.is_none());
        assert!(args.output.is_none());
    }

    #[test]
    fn test_args_all_flags() {
        let args = parse_generate_args(&[
            "test",
            "--existing",
            "old/pom.xml",
            "-o",
            "out.xml",
            "--platform",
            "macos",
        ]);
        assert_eq!(args.existing, Some(PathBuf::from("old/pom.xml")));
        assert_eq!(args.output, Some(PathBuf::from("out.xml")));
        assert_eq!(args.platform, Some(Platform::MacOs));
    }

    #[test]
    fn test_args_invalid_platform() {
        #[derive(Parser)]
        struct TestCli {
            #[command(flatten)]
            generate: GenerateArgs,
        }
        assert!(TestCli::try_parse_from(["test", "--platform", "solaris"]).is_err());
    }

    // =========================================================================
    // Option Resolution Tests
    // =========================================================================

    #[test]
    fn test_options_flag_beats_config() {
        let mut config = Config::default();
        config.generate.output = Some(PathBuf::from("from-config.xml"));
        config.java.release = Some("17".to_string());

        let args = parse_generate_args(&["test", "-o", "from-flag.xml", "--platform", "linux"]);
        let opts = options_from(args, &config, |p| Path::new("/work").join(p));

        assert_eq!(opts.output, PathBuf::from("/work/from-flag.xml"));
        assert_eq!(opts.platform, Platform::Linux);
        assert_eq!(opts.settings.java_release, "17");
    }

    #[test]
    fn test_options_config_output_and_default() {
        let mut config = Config::default();
        config.generate.output = Some(PathBuf::from("build/pom.xml"));
        let args = parse_generate_args(&["test", "--existing", "pom.xml", "--platform", "windows"]);
        let opts = options_from(args, &config, |p| Path::new("/work").join(p));
        assert_eq!(opts.output, PathBuf::from("/work/build/pom.xml"));
        assert_eq!(opts.existing, Some(PathBuf::from("/work/pom.xml")));

        let args = parse_generate_args(&["test", "--platform", "windows"]);
        let opts = options_from(args, &Config::default(), |p| p);
        assert_eq!(opts.output, PathBuf::from("pom.xml"));
    }

    // =========================================================================
    // Output Tests
    // =========================================================================

    #[test]
    fn test_next_steps_linux() {
        let steps = next_steps(&linux_result(MergeOutcome::NoExisting));
        assert_eq!(steps.len(), 5);
        assert!(steps[0].contains("/work/pom.xml"));
        assert!(steps[1].contains("mainClass"));
        assert!(steps[2].contains("mvn clean package native:compile"));
        assert!(steps[3].contains("mvn rpm:rpm"));
        assert!(steps[4].contains("mvn jdeb:jdeb"));
    }

    #[test]
    fn test_next_steps_without_packaging() {
        let mut result = linux_result(MergeOutcome::NoExisting);
        result.platform = Platform::MacOs;
        result.plugins.truncate(1);
        let steps = next_steps(&result);
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|s| !s.contains("rpm:rpm")));
    }

    #[test]
    fn test_generated_event() {
        let report = MergeReport {
            identity_overwritten: 3,
            ..MergeReport::default()
        };
        let event = generated_event(&linux_result(MergeOutcome::Merged(report)));

        assert_eq!(event["reason"], "generated");
        assert_eq!(event["output"], "/work/pom.xml");
        assert_eq!(event["platform"], "linux");
        assert_eq!(event["plugins"].as_array().unwrap().len(), 3);
        assert_eq!(
            event["plugins"][0],
            "org.graalvm.buildtools:native-maven-plugin:${native.maven.plugin.version}"
        );
        assert_eq!(event["properties"][0], "maven.compiler.source");
        assert_eq!(event["dependencies"][0], "org.slf4j:slf4j-api:2.0.9");
        assert_eq!(event["merge"]["status"], "merged");
        assert_eq!(event["merge"]["report"]["identity_overwritten"], 3);
    }

    #[test]
    fn test_no_merge_warning_without_error() {
        assert!(merge_warning_event(&MergeOutcome::NoExisting).is_none());
        assert!(merge_warning_event(&MergeOutcome::Merged(MergeReport::default())).is_none());
    }
}
