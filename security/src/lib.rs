//! Security value types used by the LSA trust marshalling crates.
//!
//! These are the leaf collaborators of both converters:
//! - [`DomSid`]: a domain security identifier with an "empty" sentinel
//!   (revision 0) distinct from any real SID
//! - [`NtTime`]: a Windows NTTIME timestamp
//! - [`dns_cmp`]: label-wise, case-insensitive DNS name comparison

pub mod dns;
pub mod error;
pub mod sid;
pub mod time;

pub use dns::{DnsCmp, dns_cmp};
pub use error::{Error, Result};
pub use sid::{DomSid, SID_MAX_SUB_AUTHS};
pub use time::NtTime;
