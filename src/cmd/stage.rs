use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::time::Duration;

use clap::Parser;

use crate::store::S3Settings;

/// Where a stage listens and how it reaches the object store.
#[derive(clap::Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[clap(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED), env = "MRP_HOST")]
    pub host: IpAddr,
    /// Port to listen on
    #[clap(long, default_value_t = 8080, short = 'P', env = "MRP_PORT")]
    pub port: u16,
    /// Endpoint of an S3-compatible object store (e.g. MinIO); AWS when omitted
    #[clap(long, short = 's', env = "MRP_OS_ENDPOINT")]
    pub os: Option<String>,
    /// Login user (access key) of the object store
    #[clap(long, short = 'u', env = "MRP_OS_USER")]
    pub user: Option<String>,
    /// Login password (secret key) of the object store
    #[clap(long, short = 'p', env = "MRP_OS_PASSWORD", hide_env_values = true)]
    pub pw: Option<String>,
    /// Region of the object store
    #[clap(long, default_value = "us-east-1", env = "MRP_OS_REGION")]
    pub region: String,
    /// Timeout in seconds for every download, get and put
    #[clap(long, short = 't', default_value_t = 30, env = "MRP_TIMEOUT")]
    pub timeout: u64,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn s3_settings(&self) -> S3Settings {
        S3Settings {
            endpoint: self.os.clone(),
            access_key: self.user.clone(),
            secret_key: self.pw.clone(),
            region: self.region.clone(),
            timeout: self.timeout(),
        }
    }
}

/// Arguments of `mrp-mapper` and `mrp-reducer`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub serve: ServeArgs,
}

/// Arguments of `mrp-splitter`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct SplitterArgs {
    #[command(flatten)]
    pub serve: ServeArgs,
    /// Bucket the partitions are written to
    #[clap(long, short = 'b', default_value = "mrpipe", env = "MRP_BUCKET")]
    pub bucket: String,
    /// Number of partitions to cut every document into
    #[clap(long, short = 'n', default_value = "3", env = "MRP_PARTITIONS")]
    pub partitions: NonZeroUsize,
}
