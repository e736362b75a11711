//! services/api/src/bin/openapi.rs
//!
//! This binary builds the augmented OpenAPI document for one documentation
//! version, exactly as the server would serve it, and saves it to a file.
//!
//! ```text
//! openapi [--version <version>] [--out <file>] [--list]
//! ```

use api_lib::{config::Config, error::ApiError, web::state::AppState};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct Args {
    version: Option<String>,
    out: String,
    list: bool,
}

impl Args {
    fn parse<I>(raw: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = Self {
            version: None,
            out: "openapi.json".to_string(),
            list: false,
        };
        let mut it = raw.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--version" => args.version = Some(value_for(&arg, it.next())?),
                "--out" => args.out = value_for(&arg, it.next())?,
                "--list" => args.list = true,
                other => eprintln!("Ignoring unknown argument '{}'", other),
            }
        }
        Ok(args)
    }
}

// A flag followed by nothing, or by another flag, is missing its value.
fn value_for(flag: &str, next: Option<String>) -> Result<String, ApiError> {
    match next {
        Some(value) if !value.is_empty() && !value.starts_with("--") => Ok(value),
        _ => Err(ApiError::Internal(format!("{flag} requires a value"))),
    }
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    let args = Args::parse(std::env::args().skip(1))?;
    let config = Arc::new(Config::from_env()?);
    let state = AppState::from_config(config);

    if args.list {
        for version in state.docs.versions() {
            println!("{}", version);
        }
        return Ok(());
    }

    let doc = state.docs.document(args.version.as_deref()).await?;
    let spec_json =
        serde_json::to_string_pretty(&doc).map_err(|e| ApiError::Internal(e.to_string()))?;
    std::fs::write(&args.out, spec_json)?;
    println!("✅ OpenAPI specification generated at {}", args.out);
    Ok(())
}
