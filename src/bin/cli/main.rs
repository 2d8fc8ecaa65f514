use agency_content_server::{domain::models::content_type_for, Collection};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{
    multipart::{Form, Part},
    Client, RequestBuilder, StatusCode,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "agency-content-cli")]
#[command(about = "Admin CLI for the agency content server", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "AGENCY_API_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Admin session token, as printed by `login`
    #[arg(long, env = "AGENCY_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and print a session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// List a collection in display order
    List {
        /// services, gallery or videos
        collection: Collection,
        /// Include inactive entries (admin)
        #[arg(long)]
        all: bool,
    },

    /// Show one entry
    Get { collection: Collection, id: String },

    /// Create an entry from fields and an optional media file
    Create {
        collection: Collection,
        /// Form fields as key=value, e.g. title="Web design"
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Image to upload with the entry
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Delete an entry and its media
    Delete { collection: Collection, id: String },

    /// Change an entry's status (active or inactive)
    Status {
        collection: Collection,
        id: String,
        status: String,
    },

    /// Put entries in the given order; ids not listed keep their order
    Reorder {
        collection: Collection,
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List contact form submissions
    Contacts,

    /// List newsletter subscribers
    Subscribers,

    /// List the image library, newest first
    Images,

    /// Add a file to the image library
    UploadImage { file: PathBuf },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .context("this command needs --token or AGENCY_API_TOKEN")?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.context("request failed")?;
        let status = response.status();
        let body: Value = response.json().await.context("response was not JSON")?;

        if status == StatusCode::UNAUTHORIZED {
            bail!("not authorized: {}", body["message"]);
        }
        if !status.is_success() {
            bail!(
                "{}: {}",
                status,
                body["message"].as_str().unwrap_or("request failed")
            );
        }
        Ok(body)
    }
}

fn collection_path(collection: Collection) -> String {
    format!("/api/{}", collection.as_str())
}

async fn media_part(path: &Path) -> Result<Part> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = content_type_for(&file_name);
    Ok(Part::bytes(data)
        .file_name(file_name)
        .mime_str(content_type)?)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let api = ApiClient::new(&cli.url, cli.token.clone());

    match cli.command {
        Commands::Login { email, password } => {
            let body = api
                .send(
                    api.client
                        .post(api.url("/api/auth/login"))
                        .json(&json!({ "email": email, "password": password })),
                )
                .await?;
            println!("{}", body["data"]["token"].as_str().unwrap_or_default());
        }
        Commands::List { collection, all } => {
            let path = if all {
                format!("{}/admin/all", collection_path(collection))
            } else {
                collection_path(collection)
            };
            let mut request = api.client.get(api.url(&path));
            if all {
                request = api.authorized(request)?;
            }
            let body = api.send(request).await?;
            for item in body["data"].as_array().into_iter().flatten() {
                println!(
                    "{:>4}  {}  {:<8}  {}",
                    item["order"],
                    item["id"].as_str().unwrap_or_default(),
                    item["status"].as_str().unwrap_or_default(),
                    item["title"].as_str().unwrap_or_default()
                );
            }
        }
        Commands::Get { collection, id } => {
            let path = format!("{}/{}", collection_path(collection), id);
            let body = api.send(api.client.get(api.url(&path))).await?;
            print_json(&body["data"])?;
        }
        Commands::Create {
            collection,
            fields,
            file,
        } => {
            let mut form = Form::new();
            for (key, value) in fields {
                form = form.text(key, value);
            }
            if let Some(path) = &file {
                form = form.part(collection.media_field(), media_part(path).await?);
            }
            let request = api
                .client
                .post(api.url(&collection_path(collection)))
                .multipart(form);
            let body = api.send(api.authorized(request)?).await?;
            print_json(&body["data"])?;
        }
        Commands::Delete { collection, id } => {
            let path = format!("{}/{}", collection_path(collection), id);
            let request = api.authorized(api.client.delete(api.url(&path)))?;
            let body = api.send(request).await?;
            println!("{}", body["message"].as_str().unwrap_or("deleted"));
        }
        Commands::Status {
            collection,
            id,
            status,
        } => {
            let path = format!("{}/{}/status", collection_path(collection), id);
            let request = api
                .client
                .patch(api.url(&path))
                .json(&json!({ "status": status }));
            let body = api.send(api.authorized(request)?).await?;
            print_json(&body["data"])?;
        }
        Commands::Reorder { collection, ids } => {
            let path = format!("{}/admin/order", collection_path(collection));
            let request = api.client.put(api.url(&path)).json(&json!({ "ids": ids }));
            let body = api.send(api.authorized(request)?).await?;
            println!("{}", body["message"].as_str().unwrap_or("reordered"));
        }
        Commands::Contacts => {
            let request = api.authorized(api.client.get(api.url("/api/contacts")))?;
            print_json(&api.send(request).await?["data"])?;
        }
        Commands::Subscribers => {
            let request = api.authorized(api.client.get(api.url("/api/newsletter")))?;
            print_json(&api.send(request).await?["data"])?;
        }
        Commands::Images => {
            let body = api.send(api.client.get(api.url("/api/images"))).await?;
            for image in body["data"].as_array().into_iter().flatten() {
                println!(
                    "{}  {:>9}  {}",
                    image["id"].as_str().unwrap_or_default(),
                    image["fileSize"],
                    image["imageUrl"].as_str().unwrap_or_default()
                );
            }
        }
        Commands::UploadImage { file } => {
            let form = Form::new().part("image", media_part(&file).await?);
            let request = api
                .client
                .post(api.url("/api/images/upload"))
                .multipart(form);
            let body = api.send(api.authorized(request)?).await?;
            print_json(&body["data"])?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("title=Web design").unwrap(),
            ("title".to_string(), "Web design".to_string())
        );
        assert_eq!(
            parse_field("tags=a=b").unwrap(),
            ("tags".to_string(), "a=b".to_string())
        );
        assert!(parse_field("no-equals").is_err());
        assert!(parse_field("=value").is_err());
    }

    #[test]
    fn test_reorder_requires_ids() {
        let parsed = Cli::try_parse_from(["agency-content-cli", "reorder", "videos"]);
        assert!(parsed.is_err());

        let cli =
            Cli::try_parse_from(["agency-content-cli", "reorder", "videos", "b", "a"]).unwrap();
        match cli.command {
            Commands::Reorder { collection, ids } => {
                assert_eq!(collection, Collection::Videos);
                assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
