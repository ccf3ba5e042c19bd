use clap::Args;
use foundry_app::auth::PgAuthService;
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Token to revoke, as printed by `token create` or `token list`
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let service = PgAuthService::new(args.database.pool().await?);

    let was_active = service
        .revoke_api_token(args.token_uuid)
        .await
        .map_err(|error| format!("failed to revoke token {}: {error}", args.token_uuid))?;

    if was_active {
        println!("revoked token {}", args.token_uuid);
    } else {
        println!("token {} was already revoked or does not exist", args.token_uuid);
    }

    Ok(())
}
