//! `loginflow mailbox ...`

use clap::Subcommand;
use lf_infra::{AccountOutcome, InfrastructureServices};

#[derive(Subcommand, Debug)]
pub enum MailboxCommands {
    /// List the domains accounts can be created under
    Domains,

    /// Register a mailbox account
    CreateAccount {
        /// Full mail address
        #[arg(long)]
        address: String,

        /// Account password
        #[arg(long, env = "MAILBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print an address on the first available domain
    GenerateAddress {
        /// Local part to use; random when omitted
        #[arg(long)]
        local_part: Option<String>,
    },

    /// Log in and print the masked bearer token
    Login {
        /// Full mail address
        #[arg(long, env = "MAILBOX_ACCOUNT")]
        address: String,

        /// Account password
        #[arg(long, env = "MAILBOX_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn execute(cmd: MailboxCommands, services: &InfrastructureServices) -> anyhow::Result<()> {
    match cmd {
        MailboxCommands::Domains => {
            for domain in services.mailbox.list_domains().await? {
                println!("{}", domain);
            }
        }
        MailboxCommands::CreateAccount { address, password } => {
            match services.mailbox.create_account(&address, &password).await? {
                AccountOutcome::Created { id, address } => println!("created {} ({})", address, id),
                AccountOutcome::AlreadyExists { address } => println!("exists {}", address),
            }
        }
        MailboxCommands::GenerateAddress { local_part } => {
            let address = services.mailbox.generate_address(local_part.as_deref()).await?;
            println!("{}", address);
        }
        MailboxCommands::Login { address, password } => {
            services.login(&address, &password).await?;
            let token = services.session.token().await.unwrap_or_default();
            println!("{}", mask_token(&token));
        }
    }

    Ok(())
}

/// Keep the first and last four characters of a token
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJ0eXAiOiJKV1Q.abcd"), "eyJ0...abcd");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
    }
}
