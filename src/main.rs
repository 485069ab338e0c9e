use std::sync::Arc;

use ministry_giving::infrastructure::config::settings::Config;
use ministry_giving::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let config = Arc::new(Config::load().expect("Failed to load configuration"));
	run(config).await
}
