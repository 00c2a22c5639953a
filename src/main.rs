use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dtoggle::start().await
}
