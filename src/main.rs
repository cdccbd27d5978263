use clap::Parser;
use dialoguer::{Input, Password};
use imsteg::{cli, config, console, error, logging, session, transport};
use cli::{Cli, Commands};
use config::Config;
use console::ConsolePage;
use error::{ImStegError, Result};
use session::{DecodeInput, EncodeInput, Job, Session};
use std::path::PathBuf;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    let server_url = cli.server.clone().unwrap_or_else(|| config.server_url());

    let (job, copy, replicate_path) = match cli.command {
        Commands::Config { set_server, set_public_key, set_private_key, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
                changed = true;
            }
            if let Some(path) = set_public_key {
                config.public_key = Some(existing_file(path)?);
                println!("✔ 公開鍵を設定しました");
                changed = true;
            }
            if let Some(path) = set_private_key {
                config.private_key = Some(existing_file(path)?);
                println!("✔ 秘密鍵を設定しました");
                changed = true;
            }
            if changed {
                config.save()?;
            }

            if show {
                println!("設定:");
                println!("  サーバー: {}", config.server_url());
                println!("  公開鍵: {}", display_path(config.public_key.as_ref()));
                println!("  秘密鍵: {}", display_path(config.private_key.as_ref()));
            }
            return Ok(());
        }

        Commands::Encode { image, pubkey, text } => {
            let public_key = key_or_default(pubkey, config.public_key.clone(), "public key")?;
            let text = match text {
                Some(text) => text,
                None => Input::<String>::new()
                    .with_prompt(imsteg_common::Mode::Encode.text_label())
                    .interact_text()
                    .map_err(|e| ImStegError::Prompt(e.to_string()))?,
            };
            (Job::Encode(EncodeInput { image, public_key, text }), false, None)
        }

        Commands::Decode { image, pubkey, prvkey, passphrase, copy } => {
            let public_key = key_or_default(pubkey, config.public_key.clone(), "public key")?;
            let private_key = key_or_default(prvkey, config.private_key.clone(), "private key")?;
            let passphrase = match passphrase {
                Some(passphrase) => passphrase,
                None => Password::new()
                    .with_prompt(imsteg_common::Mode::Decode.text_label())
                    .interact()
                    .map_err(|e| ImStegError::Prompt(e.to_string()))?,
            };
            let input = DecodeInput { image, public_key, private_key, passphrase };
            (Job::Decode(input), copy, None)
        }

        Commands::Replicate { path, mode } => (Job::Replicate { mode: mode.into() }, false, path),
    };

    let page = ConsolePage::new().with_replicate_path(replicate_path);
    let session = Session::new(page, transport::http_chain(&server_url));

    let local = tokio::task::LocalSet::new();
    let outcome = local.run_until(session.run(job)).await?;

    if copy && outcome.is_success() {
        session.copy_output()?;
        println!("✔ クリップボードへコピーしました");
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn existing_file(path: PathBuf) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(ImStegError::FileNotFound(path.display().to_string()));
    }
    Ok(path)
}

fn key_or_default(arg: Option<PathBuf>, default: Option<PathBuf>, what: &str) -> Result<PathBuf> {
    arg.or(default).ok_or_else(|| {
        ImStegError::MissingInput(format!(
            "{} file (pass it or set it with `imsteg config`)",
            what
        ))
    })
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "未設定".to_string())
}
