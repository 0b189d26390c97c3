use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    fixphrase_cli::main_entry().await
}
