use std::io::{self, Read};

use dotenv::dotenv;
use openspiel_bridge::{Bridge, BridgeConfig, BridgeReply, Error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();

    // Stdout is the output channel; diagnostics go to stderr only.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let reply = run().await;
    println!("{}", reply.encode());
}

/// One invocation: every failure becomes a normalized reply, never a
/// non-zero exit status.
async fn run() -> BridgeReply {
    let mut raw = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut raw) {
        return BridgeReply::Error(Error::Decode(err.to_string()).into_solver_error(None));
    }

    let config = match BridgeConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            return BridgeReply::Error(Error::Config(err.to_string()).into_solver_error(None))
        }
    };

    if let Err(reason) = config.validate() {
        return BridgeReply::Error(Error::Config(reason).into_solver_error(None));
    }

    let bridge = match Bridge::new(config) {
        Ok(bridge) => bridge,
        Err(err) => return BridgeReply::Error(err.into_solver_error(None)),
    };

    bridge.run(&raw).await
}
