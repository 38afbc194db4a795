use anyhow::{Context, Result};
use clap::Parser;
use markdown_ricos_config::Config;
use markdown_ricos_engine::{
    ConvertError, Document, EXAMPLE_MARKDOWN, RandomIds, Response, Style, convert_markdown,
    convert_tokens, extract_markdown, parsing::tokens_from_json,
};
use serde::Serialize;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

/// Convert markdown into RICOS rich-content JSON.
#[derive(Debug, Parser)]
#[command(name = "markdown-ricos", version, about)]
struct Args {
    /// Input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// MIME type of the input (text/markdown, application/json, ...)
    #[arg(long)]
    content_type: Option<String>,

    /// Treat the input as a JSON array of block tokens
    #[arg(long, conflicts_with = "content_type")]
    tokens: bool,

    /// Convert the built-in sample document and print it with its source
    #[arg(long, conflicts_with_all = ["input", "tokens"])]
    example: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Config file (defaults to ~/.config/markdown-ricos/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct Example<'a> {
    markdown: &'a str,
    ricos: Response,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let style = load_style(args.config.as_deref())?;

    if args.example {
        let result = convert_markdown(EXAMPLE_MARKDOWN, &style, &mut RandomIds);
        let example = Example {
            markdown: EXAMPLE_MARKDOWN,
            ricos: Response::from_result(result),
        };
        return print_json(&example, args.pretty);
    }

    let body = read_input(args.input.as_deref())?;
    let response = if args.tokens {
        Response::from_result(convert_token_stream(&body, &style))
    } else {
        let result = extract_markdown(args.content_type.as_deref(), &body)
            .and_then(|markdown| convert_markdown(&markdown, &style, &mut RandomIds));
        Response::from_result(result)
    };

    print_json(&response, args.pretty)?;
    if !response.is_success() {
        log::warn!("conversion failed with status {}", response.status());
        process::exit(1);
    }
    Ok(())
}

fn convert_token_stream(body: &[u8], style: &Style) -> markdown_ricos_engine::Result<Document> {
    let json = std::str::from_utf8(body)
        .map_err(|_| ConvertError::missing_input("token stream is not valid UTF-8"))?;
    let tokens = tokens_from_json(json)?;
    convert_tokens(&tokens, style, &mut RandomIds)
}

fn load_style(config_path: Option<&Path>) -> Result<Style> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match config {
        Some(config) => Ok(config.style()?),
        None => {
            log::debug!(
                "No config file found at {}, using default style",
                config_path
                    .map(Path::to_path_buf)
                    .unwrap_or_else(Config::config_path)
                    .display()
            );
            Ok(Style::default())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut body = Vec::new();
            io::stdin()
                .read_to_end(&mut body)
                .context("Failed to read stdin")?;
            Ok(body)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn example_conflicts_with_input() {
        assert!(Args::try_parse_from(["markdown-ricos", "--example", "doc.md"]).is_err());
        let args = Args::try_parse_from(["markdown-ricos", "--example", "--pretty"]).unwrap();
        assert!(args.example && args.pretty);
    }

    #[test]
    fn undecodable_token_stream_is_a_400_envelope() {
        let result = convert_token_stream(br#"[{"type": "heading"}]"#, &Style::default());
        assert!(matches!(result, Err(ConvertError::TokenStream(_))));

        let response = Response::from_result(result);
        assert_eq!(response.status(), 400);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("Invalid token stream: "));
        assert!(json.get("details").is_none());
    }

    #[test]
    fn token_stream_must_be_utf8() {
        let response = Response::from_result(convert_token_stream(&[0xff], &Style::default()));
        assert_eq!(response.status(), 400);
    }

    #[test]
    fn token_stream_converts() {
        let result = convert_token_stream(
            br#"[{"type": "heading", "depth": 1, "text": "Hi"}]"#,
            &Style::default(),
        );
        assert!(Response::from_result(result).is_success());
    }

    #[test]
    fn content_type_is_optional() {
        let args = Args::try_parse_from(["markdown-ricos", "doc.md"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("doc.md")));
        assert_eq!(args.content_type, None);
    }
}
