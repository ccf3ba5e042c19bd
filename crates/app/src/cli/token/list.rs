use clap::Args;
use foundry_app::{
    auth::{ApiTokenStatus, PgAuthService},
    domain::users::records::UserUuid,
};
use jiff::Timestamp;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// User whose tokens should be listed
    #[arg(long)]
    user_uuid: Uuid,

    /// Include revoked and expired tokens
    #[arg(long)]
    all: bool,
}

pub(crate) async fn run(args: ListTokensArgs) -> Result<(), String> {
    let service = PgAuthService::new(args.database.pool().await?);

    let tokens = service
        .list_api_tokens(UserUuid::from_uuid(args.user_uuid))
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    let now = Timestamp::now();

    let mut shown = 0_usize;

    for token in &tokens {
        let status = token.status(now);

        if !args.all && status != ApiTokenStatus::Active {
            continue;
        }

        shown += 1;

        println!(
            "{uuid}  {status:<8} created {created}  last used {last_used}  expires {expires}",
            uuid = token.uuid,
            status = status.as_str(),
            created = token.created_at,
            last_used = token
                .last_used_at
                .map_or_else(|| "never".to_owned(), |value| value.to_string()),
            expires = token
                .expires_at
                .map_or_else(|| "never".to_owned(), |value| value.to_string()),
        );
    }

    if shown == 0 {
        println!("no tokens to show for user {}", args.user_uuid);
    }

    Ok(())
}
