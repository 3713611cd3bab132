use phonebook::admin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let status = admin::run(&args, &mut std::io::stdout(), &mut std::io::stderr()).await?;
    if status != 0 {
        std::process::exit(status);
    }

    Ok(())
}
