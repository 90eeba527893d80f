use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use release_versions::engine::{ReleaseRun, VersionResolver};
use release_versions::git::Git2Repository;
use release_versions::policy::{DefaultPolicy, PolicyRegistry};
use release_versions::report::TracingReporter;
use release_versions::{config, ui};

#[derive(clap::Parser)]
#[command(
    name = "release-versions",
    about = "Resolve release and development versions for a multi-module project"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Never prompt; use defaults and policy suggestions")]
    batch: bool,

    #[arg(long, help = "Give every module the version of the first one")]
    auto_version_submodules: bool,

    #[arg(long, help = "Resolve branch and working copy versions instead")]
    branch: bool,

    #[arg(long, help = "Release version of the first module")]
    release_version: Option<String>,

    #[arg(long, help = "Development version of the first module")]
    development_version: Option<String>,

    #[arg(long, help = "Version policy identifier")]
    policy: Option<String>,

    #[arg(long, help = "Resolve versions without writing them")]
    dry_run: bool,

    #[arg(
        short,
        long,
        default_value = "release-versions.out.toml",
        help = "File receiving the resolved versions"
    )]
    output: String,

    #[arg(short, long, help = "Show debug diagnostics")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "release_versions=debug"
    } else {
        "release_versions=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    if args.batch {
        config.interactive = false;
    }
    if args.auto_version_submodules {
        config.auto_version_submodules = true;
    }
    if args.branch {
        config.branch_creation = true;
    }
    if let Some(version) = args.release_version {
        config.default_release_version = Some(version);
    }
    if let Some(version) = args.development_version {
        config.default_development_version = Some(version);
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }

    let reactor = config.reactor()?;
    if reactor.is_empty() {
        anyhow::bail!("No modules configured; add [[modules]] entries to the configuration");
    }

    let policies = PolicyRegistry::with_defaults(TracingReporter::shared("policy"));
    policies.get(&config.policy)?;

    let mut resolver = VersionResolver::new(config.clone()).with_policies(policies);
    if config.policy != DefaultPolicy::ID {
        let repo = Git2Repository::open(".").context("Unable to open the git repository")?;
        resolver = resolver.with_provider(Arc::new(repo));
    }

    let phases = config.phases();
    ui::display_status(&format!(
        "Resolving {} and {} versions for {} module(s)",
        phases[0],
        phases[1],
        reactor.len()
    ));

    let mut run = ReleaseRun::new(resolver).simulate(args.dry_run);
    let registry = run.execute(&reactor)?;
    ui::display_registry(registry);

    if run.is_simulation() {
        ui::display_status("Dry run: versions were not written");
        return Ok(());
    }

    let rendered = run.registry().to_toml()?;
    fs::write(&args.output, rendered)
        .with_context(|| format!("Unable to write {}", args.output))?;
    ui::display_success(&format!("Versions written to {}", args.output));
    Ok(())
}
