use subcmd::constants::DEFAULT_LOG_FILTER;
use subcmd::{CmdFunc, Command, FlagSet, ParsedFlags, Registry, Settings, cli, project_identity};
use tracing_subscriber::EnvFilter;

/// Ships a build to an environment.
struct Ship;

impl Command for Ship {
    fn flags(&self, flags: &mut FlagSet) {
        flags
            .string("env", "dev", "target `environment`")
            .bool("dry-run", false, "print the plan without shipping")
            .uint("replicas", 1, "number of replicas to start");
    }

    fn run(&self, flags: &ParsedFlags, args: &[String]) -> anyhow::Result<()> {
        let env = flags.get_str("env").unwrap_or("dev");
        let replicas = flags.get_uint("replicas").unwrap_or(1);
        let verb = if flags.get_bool("dry-run").unwrap_or(false) {
            "would ship"
        } else {
            "shipping"
        };
        let targets = if args.is_empty() {
            "current build".to_string()
        } else {
            args.join(", ")
        };
        println!("{} {} to {} ({} replicas)", verb, targets, env, replicas);
        Ok(())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(project_identity::log_env_key())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let mut registry = Registry::new().with_settings(Settings::from_env());
    registry.add(
        "hello",
        "print a greeting",
        CmdFunc::new(|args: &[String]| {
            let who = args.first().map(String::as_str).unwrap_or("world");
            println!("hello, {}", who);
            Ok(())
        }),
    );
    registry.register("ship", "ship a build to an environment", Ship, ["env"]);
    registry.add(
        "fail",
        "always fails",
        CmdFunc::new(|args: &[String]| {
            anyhow::bail!(
                "deploy failed: {}",
                args.first().map(String::as_str).unwrap_or("no reason")
            )
        }),
    );

    cli::run_and_exit(&registry);
}
