use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = helpline_chat::Args::parse();

	helpline_chat::run(args).await
}
