use std::{
	io::{self, BufRead, Write},
	path::PathBuf,
	sync::Arc,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use helpline_corpus::kb::KnowledgeStore;
use helpline_domain::conversation::ConversationTurn;
use helpline_service::HelplineService;

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

/// Interactive terminal chat against the helpline engine. The session history
/// lives here and is replayed in full on every turn.
pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = helpline_config::load(&args.config)?;

	init_tracing(&config);

	let kb = KnowledgeStore::new(&config.storage.qdrant)?;
	let service = HelplineService::new(config, Arc::new(kb));
	let stdin = io::stdin();
	let mut turns: Vec<ConversationTurn> = Vec::new();
	let mut line = String::new();

	println!("Helpline chat. Empty line or \"exit\" to quit.");

	loop {
		print!("> ");
		io::stdout().flush()?;
		line.clear();

		if stdin.lock().read_line(&mut line)? == 0 {
			return Ok(());
		}

		let message = line.trim().to_string();

		if message.is_empty() || message.eq_ignore_ascii_case("exit") {
			return Ok(());
		}

		let answer = service.answer(&message, &turns).await?;

		println!("[{}] {}", answer.state.as_str(), answer.reply);

		if answer.show_escalation {
			println!("(a support ticket can be raised for this issue)");
		}

		turns.push(ConversationTurn::user(message));
		turns.push(ConversationTurn::assistant(answer.reply));
	}
}

fn init_tracing(config: &helpline_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
