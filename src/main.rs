use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use version_probe::config::{self, Overrides, ProbeConfig};
use version_probe::error::SetupError;
use version_probe::logging::{self, LogFormat};
use version_probe::probe::run_check;
use version_probe::report::{report, setup_failure, with_config_note};
use version_probe::transport::HttpTransport;
use version_probe::verdict::{SETUP_FAILURE_EXIT_CODE, Status, Verdict};

#[derive(Parser)]
#[command(name = "version-probe")]
#[command(
    version,
    about = "Check that a running service reports the expected version (Solr by default)"
)]
struct Cli {
    /// Host to connect to [env: <SOFTWARE>_HOST, HOST]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to connect to [env: <SOFTWARE>_PORT, PORT; default: 8983 for Solr]
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// Expected version: `7.1.0`, `>=7.0`, `6.6..7.1` or `*`
    #[arg(short, long, conflicts_with = "expected_regex")]
    expected: Option<String>,

    /// Expected version as an anchored regex, e.g. `7\.1\..*`
    #[arg(short = 'r', long)]
    expected_regex: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// JSON config file [default: $XDG_CONFIG_HOME/version-probe/config.json]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the probed software
    #[arg(long)]
    software: Option<String>,

    /// Path of the status page
    #[arg(long)]
    url_path: Option<String>,

    /// Dot separated key path of the version in a JSON response
    #[arg(long)]
    field_path: Option<String>,

    /// Tag name of the version element in a markup response
    #[arg(long)]
    markup_tag: Option<String>,

    /// Attribute identifying the version element in a markup response
    #[arg(long)]
    markup_attribute: Option<String>,

    /// Value of that attribute [default: last segment of the field path]
    #[arg(long)]
    markup_value: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            expected: self.expected.clone(),
            expected_regex: self.expected_regex.clone(),
            timeout_secs: self.timeout,
            software: self.software.clone(),
            url_path: self.url_path.clone(),
            field_path: self.field_path.clone(),
            markup_tag: self.markup_tag.clone(),
            markup_attribute: self.markup_attribute.clone(),
            markup_value: self.markup_value.clone(),
        }
    }
}

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        println!("UNKNOWN: internal error: {info}");
        std::process::exit(SETUP_FAILURE_EXIT_CODE.into());
    }));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Usage errors are UNKNOWN; --help and --version are not errors
            let code = if e.use_stderr() {
                Status::Unknown.exit_code()
            } else {
                Status::Ok.exit_code()
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let _guard = match logging::init(cli.verbose, cli.log_format) {
        Ok(guard) => guard,
        Err(e) => return print_and_exit(setup_failure(&e)),
    };

    print_and_exit(report(&run(&cli)))
}

fn run(cli: &Cli) -> anyhow::Result<Verdict> {
    let loaded = config::load_config_file(cli.config.as_deref(), &config::default_config_path())?;
    let config = ProbeConfig::resolve(cli.overrides(), loaded.file, |name| {
        std::env::var(name).ok()
    })?;

    let parser = config.target.parser()?;
    let transport = HttpTransport::new(&config.target.url_path, config.timeout)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SetupError::Runtime)?;

    let verdict = runtime.block_on(run_check(
        &transport,
        &parser,
        &config.target.software,
        &config.host,
        config.port,
        &config.expected,
    ));

    Ok(with_config_note(verdict, loaded.ignored.as_deref()))
}

fn print_and_exit((line, code): (String, u8)) -> ExitCode {
    println!("{line}");
    ExitCode::from(code)
}
