use chrono::{TimeZone, Utc};
use clap::Parser;
use messenger_auth::config::{DEFAULT_TOKEN_VALIDITY_MS, TokenConfig};
use messenger_auth::services::auth::{AuthService, Role, TokenCodec};

/// Mint a messenger session token (HS256) for local testing.
///
/// The secret must match the server's `JWT_SECRET_KEY`, otherwise the server
/// rejects the token. Prints the token, or with `--claims` also the decoded
/// payload.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (username)
    #[arg(long)]
    username: String,

    /// Role names, comma-separated (ADMIN, USERS, GUEST). Unknown names become GUEST.
    #[arg(long, value_delimiter = ',', default_value = "USERS")]
    roles: Vec<String>,

    /// Signing secret. Defaults to $JWT_SECRET_KEY.
    #[arg(long, env = "JWT_SECRET_KEY", hide_env_values = true)]
    secret: String,

    /// Token validity in milliseconds.
    #[arg(long, env = "JWT_EXPIRE_LENGTH_MS", default_value_t = DEFAULT_TOKEN_VALIDITY_MS)]
    validity_ms: u64,

    /// Override iat (unix seconds). Default: now.
    #[arg(long)]
    iat: Option<i64>,

    /// Also print the decoded claims.
    #[arg(long, default_value_t = false)]
    claims: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let codec = TokenCodec::new(&TokenConfig {
        secret_key: args.secret,
        validity_ms: args.validity_ms,
    })?;
    let auth = AuthService::new(codec);

    let roles: Vec<Role> = args
        .roles
        .iter()
        .map(|name| Role::from_wire_name(name.trim()))
        .collect();

    let issued_at = match args.iat {
        Some(secs) => Some(
            Utc.timestamp_opt(secs, 0)
                .single()
                .ok_or("--iat is out of range")?,
        ),
        None => None,
    };

    let token = auth.issue_token(&args.username, &roles, issued_at)?;

    if !args.claims {
        println!("{}", token);
        return Ok(());
    }

    println!("token: {}", token);
    // An --iat far enough in the past yields a token that is already expired.
    match auth.get_claims(Some(&token)) {
        Ok(Some(claims)) => println!("claims: {}", serde_json::to_string_pretty(&claims)?),
        Ok(None) => {}
        Err(e) => println!("claims: (not verifiable: {})", e),
    }

    Ok(())
}
