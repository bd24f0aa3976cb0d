use clap::Parser;

use crate::get_ip::IpFamily;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Sync the A record (IPv4).
    #[arg(long)]
    pub ipv4: bool,

    /// Sync the AAAA record (IPv6).
    #[arg(long)]
    pub ipv6: bool,

    /// Sync both records. This is also the default when no family flag is
    /// given.
    #[arg(long)]
    pub both: bool,

    #[arg(short, long)]
    pub log_level: Option<tracing::Level>,

    /// Directory the daily log files are written to.
    #[arg(long, default_value = "logs")]
    pub log_dir: String,

    /// HTTP request timeout in seconds, applied to the address lookup and
    /// the provider API alike.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

impl Options {
    /// Families selected by the flag union.
    pub fn families(&self) -> Vec<IpFamily> {
        if self.both || (!self.ipv4 && !self.ipv6) {
            return vec![IpFamily::V4, IpFamily::V6];
        }

        let mut families = Vec::new();
        if self.ipv4 {
            families.push(IpFamily::V4);
        }
        if self.ipv6 {
            families.push(IpFamily::V6);
        }

        families
    }
}
