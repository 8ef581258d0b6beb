use clap::{Parser, Subcommand};
use formpost::ClientConfiguration;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_api_client::UserApiClientBuilder;

#[derive(Parser)]
#[command(name = "user-cli")]
#[command(about = "Talks to the user endpoints of the dating backend", long_about = None)]
struct Cli {
    /// TOML file with `base_url` and default `[headers]`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the base url of the configuration file
    #[arg(short, long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a login code for a phone number
    Verify { phone: String },
    /// Log in with a phone number and the code that was sent to it
    Login { phone: String, code: String },
    /// Show the profile of the logged in user
    Profile,
    /// Update profile fields, given as key=value pairs
    UpdateProfile {
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(field: &str) -> Result<(String, String), String> {
    field
        .split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got {}", field))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_api_client=info,formpost=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let configuration = match &cli.config {
        Some(path) => ClientConfiguration::load(path)?,
        None => ClientConfiguration::default(),
    };
    let mut builder = UserApiClientBuilder::new().with_configuration(configuration);
    if let Some(base_url) = cli.base_url {
        builder = builder.with_domain_name(base_url);
    }
    let client = builder.build()?;

    match cli.command {
        Commands::Verify { phone } => {
            client.verify_phone(&phone).await?;
            println!("Login code sent to {}", phone);
        }
        Commands::Login { phone, code } => {
            let user = client.login(phone, code).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        Commands::Profile => {
            let profile = client.show_profile().await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::UpdateProfile { fields } => {
            let fields = fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect::<Map<_, _>>();
            client.update_profile(&fields).await?;
            println!("Profile updated");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_value_fields() {
        assert_eq!(
            parse_field("location=上海").unwrap(),
            ("location".to_string(), "上海".to_string())
        );
        assert_eq!(parse_field("a=b=c").unwrap(), ("a".to_string(), "b=c".to_string()));
        assert!(parse_field("nickname").is_err());
    }

    #[test]
    fn cli_accepts_update_profile_fields() {
        let cli = Cli::try_parse_from([
            "user-cli",
            "--base-url",
            "http://127.0.0.1:8000",
            "update-profile",
            "dating_sex=female",
            "max_dating_age=30",
        ])
        .unwrap();

        match cli.command {
            Commands::UpdateProfile { fields } => assert_eq!(fields.len(), 2),
            _ => panic!("wrong subcommand"),
        }
    }
}
