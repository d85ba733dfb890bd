use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use sha2::{Digest, Sha256};

use wildsafe::corpus::chunker::chunk_manual;
use wildsafe::corpus::walker::collect_manual_files;
use wildsafe::models::DocumentUpload;

#[derive(Parser, Debug)]
#[command(name = "corpus-loader")]
#[command(about = "Bulk-load safety manuals into a running WildSafe backend")]
struct Args {
    /// Directory of .txt/.md manual files to load
    #[arg(short, long)]
    dir: PathBuf,

    /// Base URL of the backend server
    #[arg(long, env = "WILDSAFE_URL", default_value = "http://localhost:8000")]
    server_url: String,

    /// Category recorded in each document's metadata
    #[arg(long, default_value = "safety-manual")]
    category: String,

    /// Maximum chunk size in characters
    #[arg(long, default_value_t = 1000)]
    chunk_size: usize,

    /// Overlap between chunks in characters
    #[arg(long, default_value_t = 100)]
    chunk_overlap: usize,
}

fn file_id(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if !args.dir.exists() {
        anyhow::bail!("Directory does not exist: {}", args.dir.display());
    }

    let files = collect_manual_files(&args.dir);
    println!("Found {} manual files under {}", files.len(), args.dir.display());

    if files.is_empty() {
        println!("Nothing to upload. Exiting.");
        return Ok(());
    }

    let client = Client::new();
    let endpoint = format!("{}/api/v1/documents", args.server_url);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut uploaded_chunks = 0usize;
    let mut failed: Vec<(PathBuf, String)> = Vec::new();

    for path in &files {
        pb.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );

        match upload_file(&client, &endpoint, path, &args).await {
            Ok(count) => uploaded_chunks += count,
            Err(e) => {
                tracing::warn!("Failed to upload {}: {}", path.display(), e);
                failed.push((path.clone(), e.to_string()));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("done");

    println!("\nUpload complete!");
    println!("  Files uploaded: {}/{}", files.len() - failed.len(), files.len());
    println!("  Total chunks:   {}", uploaded_chunks);
    println!("  Server:         {}", args.server_url);

    if !failed.is_empty() {
        println!("\nFailed files:");
        for (path, err) in &failed {
            println!("  {}: {}", path.display(), err);
        }
    }

    Ok(())
}

async fn upload_file(
    client: &Client,
    endpoint: &str,
    path: &Path,
    args: &Args,
) -> Result<usize> {
    let text = std::fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(0);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let id = file_id(path);

    let chunks = chunk_manual(&text, args.chunk_size, args.chunk_overlap);
    let total = chunks.len();

    for chunk in chunks {
        let title = if total > 1 {
            format!("{stem} ({id}#{})", chunk.chunk_index)
        } else {
            format!("{stem} ({id})")
        };
        let upload = DocumentUpload {
            title,
            content: chunk.text,
            category: Some(args.category.clone()),
        };

        let response = client.post(endpoint).json(&upload).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("server rejected chunk: {} - {}", status, body);
        }
    }

    Ok(total)
}
