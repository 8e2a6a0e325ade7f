//! `loginflow resolve`

use anyhow::{bail, Context};
use clap::Args;
use lf_core::domain::value_objects::{Channel, PhoneTarget, SenderFilter, VerificationTarget};
use lf_infra::InfrastructureServices;
use lf_shared::validation::not_empty;

/// Arguments for resolving a verification code
#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Login method label, e.g. "電子信箱" or "手機驗證"
    #[arg(long)]
    pub login_type: String,

    /// Expected sender display name (email login)
    #[arg(long)]
    pub sender_name: Option<String>,

    /// Expected sender address (email login)
    #[arg(long)]
    pub sender_address: Option<String>,

    /// International dialing prefix, e.g. "+886" (phone login)
    #[arg(long)]
    pub region_code: Option<String>,

    /// Local phone number (phone login)
    #[arg(long)]
    pub phone_number: Option<String>,

    /// Mailbox address to log in with before reading mail
    #[arg(long, env = "MAILBOX_ACCOUNT")]
    pub mail_account: Option<String>,

    /// Mailbox password
    #[arg(long, env = "MAILBOX_PASSWORD", hide_env_values = true)]
    pub mail_password: Option<String>,
}

impl ResolveArgs {
    /// Verification target selected by the login type
    pub fn target(&self) -> anyhow::Result<VerificationTarget> {
        let channel = Channel::from_login_type(&self.login_type)?;

        match channel {
            Channel::Email => {
                let name = self.sender_name.as_deref().filter(|v| not_empty(v));
                let address = self.sender_address.as_deref().filter(|v| not_empty(v));
                let (Some(name), Some(address)) = (name, address) else {
                    bail!("email login requires --sender-name and --sender-address");
                };
                Ok(SenderFilter::new(name, address).into())
            }
            Channel::Phone => {
                let region = self.region_code.as_deref().unwrap_or_default();
                let number = self.phone_number.as_deref().unwrap_or_default();
                let phone = PhoneTarget::new(region, number)
                    .context("phone login requires --region-code and --phone-number")?;
                Ok(phone.into())
            }
        }
    }
}

pub async fn execute(args: ResolveArgs, services: &InfrastructureServices) -> anyhow::Result<()> {
    let target = args.target()?;

    if let VerificationTarget::Email(_) = &target {
        match (&args.mail_account, &args.mail_password) {
            (Some(account), Some(password)) => services
                .login(account, password)
                .await
                .context("mailbox login failed")?,
            _ => tracing::warn!("No mailbox credentials given, reading with the current session"),
        }
    }

    let code = services.resolver().resolve(&target).await?;
    println!("{}", code);
    Ok(())
}
