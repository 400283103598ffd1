//! FSComics terminal front end.
//!
//! ```text
//! fscomics [feed]                               restore the session and show the feed
//! fscomics login <email> <password>
//! fscomics signup <email> <password>
//! fscomics logout
//! fscomics review <title> <book> <content> [image]
//! fscomics comment <review-id> <text>
//! fscomics like <review-id>
//! fscomics profile <nickname> [avatar]
//! ```
//!
//! Configuration comes from the environment (and `.env`); see
//! [`fscomics::Config`]. Log output is controlled with `RUST_LOG`.

use anyhow::{Context, bail};
use fscomics::views::CommentForm;
use fscomics::{BootOutcome, Client, ClientError, Config, CredentialsForm, FileSessionStore, NewReviewForm};
use fscomics_api::{BackendClient, ReviewId, Upload};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type AppClient = Client<BackendClient, FileSessionStore>;

const USAGE: &str = "usage: fscomics [feed | login <email> <password> | signup <email> <password> | logout | \
review <title> <book> <content> [image] | comment <review-id> <text> | like <review-id> | \
profile <nickname> [avatar]]";

const LOGIN_HINT: &str = "run `fscomics login <email> <password>`";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fscomics=warn,fscomics_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::from_env()?;
    info!(api_url = %config.api_url, session_file = %config.session_file.display(), "Starting");

    let client = Client::new(
        BackendClient::new(config.api_url.clone()),
        FileSessionStore::new(config.session_file.clone()),
        config.client_settings(),
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let result = run(&client, &args).await;
    if result.as_ref().is_err_and(needs_login) {
        eprintln!("Session is not valid; {LOGIN_HINT}");
    }

    finish(result, client.shutdown().await)
}

/// The command's own failure is reported ahead of a shutdown failure
fn finish(result: anyhow::Result<()>, shutdown: Result<(), ClientError>) -> anyhow::Result<()> {
    match (result, shutdown) {
        (Err(error), Err(shutdown)) => {
            warn!(%shutdown, "Shutdown after a failed command also failed");
            Err(error)
        },
        (Err(error), Ok(())) => Err(error),
        (Ok(()), shutdown) => shutdown.map_err(anyhow::Error::from),
    }
}

fn needs_login(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ClientError>()
        .is_some_and(ClientError::is_unauthorized)
}

async fn run(client: &AppClient, args: &[&str]) -> anyhow::Result<()> {
    match args {
        [] | ["feed"] => {
            require_session(client).await?;
        },
        ["login", email, password] => {
            client.login(&CredentialsForm::new(*email, *password)).await?;
        },
        ["signup", email, password] => {
            client.signup(&CredentialsForm::new(*email, *password)).await?;
        },
        ["logout"] => {
            client.logout().await?;
            println!("Logged out");
            return Ok(());
        },
        ["review", title, book, content, rest @ ..] if rest.len() <= 1 => {
            require_session(client).await?;
            let form = NewReviewForm {
                title: (*title).to_string(),
                book_name: (*book).to_string(),
                content: (*content).to_string(),
                img: rest.first().map(|path| read_upload(path)).transpose()?,
            };
            client.post_review(&form).await?;
        },
        ["comment", review, text] => {
            require_session(client).await?;
            let form = CommentForm {
                text: (*text).to_string(),
            };
            client.post_comment(parse_review(review)?, &form).await?;
        },
        ["like", review] => {
            require_session(client).await?;
            client.toggle_like(parse_review(review)?).await?;
        },
        ["profile", nick_name, rest @ ..] if rest.len() <= 1 => {
            require_session(client).await?;
            client.open_profile().await?;
            client.edit_nickname(*nick_name).await?;
            let avatar = rest.first().map(|path| read_upload(path)).transpose()?;
            client.update_profile(avatar).await?;
        },
        _ => bail!(USAGE),
    }

    print_screen(client).await;
    Ok(())
}

async fn require_session(client: &AppClient) -> anyhow::Result<()> {
    require_ready(client.boot().await?)
}

fn require_ready(outcome: BootOutcome) -> anyhow::Result<()> {
    match outcome {
        BootOutcome::Ready => Ok(()),
        BootOutcome::SignedOut => bail!("Not logged in; {LOGIN_HINT}"),
        BootOutcome::SessionRejected { reason } => {
            bail!("Stored session was rejected ({reason}); {LOGIN_HINT}")
        },
    }
}

async fn print_screen(client: &AppClient) {
    println!("{}", client.header().await);
    if let Some(feed) = client.feed().await {
        println!();
        print!("{feed}");
    }
}

fn parse_review(raw: &str) -> anyhow::Result<ReviewId> {
    let id = raw
        .parse()
        .with_context(|| format!("review id must be a number, got {raw:?}"))?;
    Ok(ReviewId(id))
}

fn read_upload(path: &str) -> anyhow::Result<Upload> {
    let path = Path::new(path);
    let bytes = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());

    let mime = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("gif") => Some("image/gif"),
        Some("webp") => Some("image/webp"),
        _ => None,
    };

    let upload = Upload::new(file_name, bytes);
    Ok(match mime {
        Some(mime) => upload.with_mime(mime),
        None => upload,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use fscomics_api::ApiError;
    use fscomics_runtime::StoreError;

    #[test]
    fn test_every_unready_boot_tells_how_to_log_in() {
        assert!(require_ready(BootOutcome::Ready).is_ok());

        let signed_out = require_ready(BootOutcome::SignedOut).unwrap_err();
        let rejected = require_ready(BootOutcome::SessionRejected {
            reason: "fetch my profile was rejected".to_string(),
        })
        .unwrap_err();

        assert!(signed_out.to_string().contains(LOGIN_HINT));
        assert!(rejected.to_string().contains(LOGIN_HINT));
        assert!(rejected.to_string().contains("fetch my profile was rejected"));
    }

    #[test]
    fn test_needs_login_only_for_refused_session() {
        let refused = anyhow::Error::new(ClientError::Rejected {
            operation: "fetch reviews".to_string(),
            error: ApiError::Unauthorized.into(),
        });
        let down = anyhow::Error::new(ClientError::Rejected {
            operation: "fetch reviews".to_string(),
            error: ApiError::RequestFailed("connection refused".to_string()).into(),
        });

        assert!(needs_login(&refused));
        assert!(!needs_login(&down));
        assert!(!needs_login(&anyhow::anyhow!("Unauthorized")));
    }

    #[test]
    fn test_command_error_wins_over_shutdown_error() {
        let error = finish(
            Err(anyhow::anyhow!("like failed")),
            Err(ClientError::Store(StoreError::Timeout)),
        )
        .unwrap_err();
        assert_eq!(error.to_string(), "like failed");

        let error = finish(Ok(()), Err(ClientError::Store(StoreError::Timeout))).unwrap_err();
        assert!(error.downcast_ref::<ClientError>().is_some());

        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
