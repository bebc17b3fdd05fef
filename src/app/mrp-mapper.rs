use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mrpipe::cmd::stage::Args;
use mrpipe::stage::Mapper;
use mrpipe::store::S3Store;
use mrpipe::{server, utils};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();
    let args = Args::parse();
    info!("starting mapper");

    let store = S3Store::connect(&args.serve.s3_settings()).await;
    let mapper = Mapper::new(Arc::new(store));

    server::serve(server::mapper_router(Arc::new(mapper)), args.serve.addr()).await
}
