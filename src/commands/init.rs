use std::io::{self, BufRead, Write};

use url::Url;

use crate::config::Config;
use crate::error::{FolioError, Result};

/// Prompt on stderr and read one trimmed line from stdin, so stdout stays
/// machine-readable.
pub(crate) fn ask(label: &str) -> Result<String> {
    ask_with(&mut io::stderr(), &mut io::stdin().lock(), label)
}

fn ask_with(out: &mut impl Write, input: &mut impl BufRead, label: &str) -> Result<String> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = ask(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Folio Configuration");
    println!("===================\n");

    let url = ask("Project URL (e.g. https://abcd.supabase.co): ")?;
    if url.is_empty() {
        return Err(FolioError::MissingUrl);
    }
    Url::parse(&url).map_err(|_| FolioError::InvalidUrl(url.clone()))?;

    let anon_key = ask("Anon (public) key: ")?;
    if anon_key.is_empty() {
        return Err(FolioError::MissingAnonKey);
    }

    let config = Config {
        url: Some(url.trim_end_matches('/').to_string()),
        anon_key: Some(anon_key),
        ..Config::default()
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| FolioError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let contents = toml::to_string(&config).map_err(|e| FolioError::Validation(e.to_string()))?;
    std::fs::write(&config_path, contents).map_err(|e| FolioError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'folio login' to sign in before making changes.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ask_with;
    use crate::config::{Buckets, Config};
    use std::io::Cursor;

    #[test]
    fn test_ask_writes_prompt_and_trims_answer() {
        let mut prompt = Vec::new();
        let mut input = Cursor::new("  me@example.com \n");

        let answer = ask_with(&mut prompt, &mut input, "Email: ").unwrap();
        assert_eq!(answer, "me@example.com");
        assert_eq!(String::from_utf8(prompt).unwrap(), "Email: ");
    }

    #[test]
    fn test_written_config_parses_back() {
        let config = Config {
            url: Some("https://abcd.supabase.co".into()),
            anon_key: Some("anon".into()),
            ..Config::default()
        };
        let contents = toml::to_string(&config).unwrap();
        let parsed = Config::parse(&contents).unwrap();
        assert_eq!(parsed, config);
        assert_eq!(parsed.buckets, Buckets::default());
    }
}
