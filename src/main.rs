use clap::Parser;
use dotenvy::dotenv;
use schoolgate::cli::{self, Cli};
use schoolgate::logging::init_console_logging;
use schoolgate::open_file_session;
use schoolgate_config::{JwtConfig, SessionConfig};
use tracing::debug;

fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_console_logging(cli.verbose);

    let session_config = SessionConfig::from_env();
    debug!(
        session_file = %session_config.session_file.display(),
        admin_policy = %session_config.admin_policy,
        "Configuration loaded"
    );
    let mut session = open_file_session(&session_config, JwtConfig::from_env());

    let command = match cli::prompt_missing(cli.command) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = cli::run(command, &mut session, &mut stdout) {
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}
