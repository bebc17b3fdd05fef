use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use mrpipe::cmd::standalone::Args;
use mrpipe::source::HttpSource;
use mrpipe::stage::{run_in_process, Mapper, Reducer, Splitter};
use mrpipe::store::{MemoryStore, ObjectStore};
use mrpipe::{utils, FINAL_RESULT_KEY};

const BUCKET: &str = "standalone";

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();
    let args = Args::parse();

    let store = MemoryStore::new();
    let shared: Arc<dyn ObjectStore> = Arc::new(store.clone());
    let source = HttpSource::new(Duration::from_secs(args.timeout))?;
    let splitter = Splitter::new(shared.clone(), Arc::new(source), BUCKET, args.partitions);
    let mapper = Mapper::new(shared.clone());
    let reducer = Reducer::new(shared);

    let response = run_in_process(&splitter, &mapper, &reducer, &args.url).await?;
    let result = store
        .get(BUCKET, &response.key)
        .await
        .with_context(|| format!("{FINAL_RESULT_KEY} was not written"))?;
    println!("{}", utils::string_from_bytes(result)?);
    Ok(())
}
