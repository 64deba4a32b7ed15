use super::init::ask;
use crate::client::SupabaseClient;
use crate::error::{FolioError, Result};
use crate::output;
use crate::session::Session;

pub async fn login(client: &SupabaseClient, email: Option<String>) -> Result<()> {
    let email = match email {
        Some(email) => email,
        None => ask("Email: ")?,
    };
    if email.trim().is_empty() {
        return Err(FolioError::LoginFailed("email is required".into()));
    }

    let password = match std::env::var("FOLIO_PASSWORD") {
        Ok(password) => password,
        Err(_) => ask("Password: ")?,
    };
    if password.is_empty() {
        return Err(FolioError::LoginFailed("password is required".into()));
    }

    let session = client.sign_in(email.trim(), &password).await?;
    let path = session.save()?;
    tracing::debug!(path = %path.display(), "session saved");

    if output::is_json_output() {
        output::print_json(&serde_json::json!({
            "email": session.email,
            "expires_at": session.expires_at,
        }));
    } else {
        output::print_message(&format!("Logged in as {}", session.email));
    }

    Ok(())
}

pub fn logout() -> Result<()> {
    if Session::clear()? {
        output::print_message("Logged out");
    } else {
        output::print_message("Not logged in");
    }
    Ok(())
}
