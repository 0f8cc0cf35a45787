use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use mdmail_bootstrap::{build_mailer, init_runtime, shutdown_signal};
use mdmail_config::AppConfig;
use mdmail_mailer::{MailRequest, Mailer};
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "mdmail", about = "Send markdown as multipart email over SMTP")]
struct Cli {
    /// 配置目录（包含 default.toml 和 {APP_ENV}.toml）
    #[arg(long, default_value = "config")]
    config_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 校验 SMTP 连接与认证
    Verify,

    /// 发送一封 markdown 邮件
    Send {
        #[arg(long)]
        to: String,

        /// 缺省时使用 mailer.default_from
        #[arg(long)]
        from: Option<String>,

        /// 缺省时取正文第一行
        #[arg(long)]
        subject: Option<String>,

        /// markdown 文件，`-` 表示 stdin
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config_dir)
        .with_context(|| format!("failed to load config from {}", cli.config_dir))?;

    let metrics = init_runtime(&config);

    let mailer = build_mailer(&config)?;

    let outcome = tokio::select! {
        result = run(&mailer, &config, cli.command) => result,
        _ = shutdown_signal() => Err(anyhow!("interrupted")),
    };

    if let Err(e) = mailer.destroy() {
        warn!(error = %e, "Failed to close mailer");
    }

    if let Some(handle) = metrics {
        debug!(metrics = %handle.render(), "Final metrics snapshot");
    }

    outcome
}

async fn run(mailer: &Mailer, config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Verify => {
            let verified = mailer.verify_mailer().await?;
            info!(host = %config.smtp.host, "SMTP server verified");
            println!("{}", serde_json::to_string_pretty(&verified)?);
        }
        Command::Send {
            to,
            from,
            subject,
            file,
        } => {
            let from = from
                .or_else(|| config.mailer.default_from.clone())
                .context("no --from given and mailer.default_from is not configured")?;
            let body = read_body(&file).await?;

            let mut request = MailRequest::new(body, from, to);
            if let Some(subject) = subject {
                request = request.with_subject(subject);
            }

            let result = mailer.send_mail(request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

async fn read_body(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut body = String::new();
        tokio::io::stdin()
            .read_to_string(&mut body)
            .await
            .context("failed to read markdown from stdin")?;
        return Ok(body);
    }

    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))
}
