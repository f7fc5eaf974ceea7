use std::sync::Arc;

use chatproxy::api::Server;
use chatproxy::backends::google::Google;
use chatproxy::config::ProxyConfig;
use chatproxy::evaluator::EvaluatorClient;
use chatproxy::orchestrator::ChatOrchestrator;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match ProxyConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("startup failed: {err}");
            std::process::exit(1);
        }
    };

    let backend = Google::new(
        config.gemini_api_key.clone(),
        Some(config.gemini_model.clone()),
        None,
        Some(config.model_timeout_secs),
    );
    let evaluator = EvaluatorClient::new(
        config.evaluator_url.clone(),
        Some(config.evaluator_timeout_secs),
    );
    let orchestrator = ChatOrchestrator::new(Arc::new(backend), Arc::new(evaluator));

    let addr = format!("0.0.0.0:{}", config.port);
    if let Err(err) = Server::new(orchestrator).run(&addr).await {
        log::error!("server error: {err}");
        std::process::exit(1);
    }
}
