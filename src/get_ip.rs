use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::err::*;

const LOOKUP_URL_V4: &str = "https://v4.ident.me";
const LOOKUP_URL_V6: &str = "https://v6.ident.me";

/// Address family a lookup and the record sync run for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    V4,
    V6,
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

pub(crate) async fn get_pub_ip(client: &reqwest::Client, family: IpFamily) -> Result<IpAddr> {
    let url = match family {
        IpFamily::V4 => LOOKUP_URL_V4,
        IpFamily::V6 => LOOKUP_URL_V6,
    };

    get_from(client, url, family).await
}

async fn get_from(client: &reqwest::Client, url: &str, family: IpFamily) -> Result<IpAddr> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppErr::Resolution(format!("request to {} failed: {}", url, e)))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| AppErr::Resolution(format!("reading {} response failed: {}", url, e)))?;

    if !status.is_success() {
        return Err(AppErr::Resolution(format!(
            "{} answered {}: {}",
            url, status, body
        )));
    }

    // The echo service answers with the bare address. Parse it against the
    // requested family so a stray error page never ends up in a record.
    let addr = match family {
        IpFamily::V4 => body.trim().parse::<Ipv4Addr>().map(IpAddr::V4),
        IpFamily::V6 => body.trim().parse::<Ipv6Addr>().map(IpAddr::V6),
    };

    addr.map_err(|_| {
        AppErr::Resolution(format!("{} returned no usable {} address", url, family))
    })
}
