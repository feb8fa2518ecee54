use anyhow::{Context, Result};
use clap::Parser;
use hirelink_mailer::{config::MailerConfig, dispatcher::OtpMailDispatcher};
use rand::Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Send a HireLink OTP verification email over the configured SMTP relay
#[derive(Parser, Debug)]
#[command(name = "hirelink-mailer", version, about)]
struct Cli {
    /// Recipient address
    #[arg(long, required_unless_present = "probe")]
    to: Option<String>,

    /// Code to embed; a random six-digit code is generated when omitted
    #[arg(long)]
    otp: Option<String>,

    /// Verify relay connectivity and authentication, then exit
    #[arg(long)]
    probe: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hirelink_mailer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = MailerConfig::from_env()?;

    info!(
        host = %config.host,
        port = config.port,
        secure = config.secure,
        authenticated = config.has_credentials(),
        "mailer configured"
    );

    let dispatcher = OtpMailDispatcher::new(&config)?;

    if cli.probe {
        dispatcher.test_connection().await?;
        info!("relay connection verified");
        return Ok(());
    }

    let to = cli.to.context("--to is required")?;
    let otp = cli.otp.unwrap_or_else(generate_otp);

    let result = dispatcher.send_otp_mail(&to, &otp).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }

    Ok(())
}

/// Random six-digit code, zero-padded.
fn generate_otp() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}
