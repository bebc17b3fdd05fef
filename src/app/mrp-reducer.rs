use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mrpipe::cmd::stage::Args;
use mrpipe::stage::Reducer;
use mrpipe::store::S3Store;
use mrpipe::{server, utils};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();
    let args = Args::parse();
    info!("starting reducer");

    let store = S3Store::connect(&args.serve.s3_settings()).await;
    let reducer = Reducer::new(Arc::new(store));

    server::serve(server::reducer_router(Arc::new(reducer)), args.serve.addr()).await
}
