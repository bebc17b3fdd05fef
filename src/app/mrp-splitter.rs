use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mrpipe::cmd::stage::SplitterArgs;
use mrpipe::source::HttpSource;
use mrpipe::stage::Splitter;
use mrpipe::store::S3Store;
use mrpipe::{server, utils};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();
    let args = SplitterArgs::parse();
    info!(bucket = %args.bucket, partitions = args.partitions.get(), "starting splitter");

    let store = S3Store::connect(&args.serve.s3_settings()).await;
    let source = HttpSource::new(args.serve.timeout())?;
    let splitter = Splitter::new(
        Arc::new(store),
        Arc::new(source),
        args.bucket,
        args.partitions,
    );

    server::serve(server::splitter_router(Arc::new(splitter)), args.serve.addr()).await
}
