//! Auth info of LSA trusted domains.
//!
//! A trusted domain object stores its incoming and outgoing secrets as two
//! `trustAuthInOutBlob`s. [`decode_auth_info`] turns the pair into an
//! [`AuthInfo`] whose entries are validated [`TrustDomainInfoBuffer`]s, and
//! [`encode_auth_info`] does the reverse.
//!
//! ```
//! use trustinfo_auth::{AuthData, AuthInfo, AuthInfoGenerations, TrustDomainInfoBuffer};
//! use trustinfo_security::NtTime;
//!
//! let auth_info = AuthInfo::new(
//!     AuthInfoGenerations::new(
//!         vec![TrustDomainInfoBuffer::new(NtTime::new(1), AuthData::Clear("secret".to_string()))],
//!         None,
//!     ),
//!     AuthInfoGenerations::default(),
//! );
//! let (incoming, outgoing) = trustinfo_auth::encode_auth_info(&auth_info).unwrap();
//! assert!(outgoing.is_empty());
//! assert_eq!(auth_info, trustinfo_auth::decode_auth_info(&incoming, &outgoing).unwrap());
//! ```

#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod info;

pub use buffer::{AuthData, TrustDomainInfoBuffer};
pub use error::{Error, Result};
pub use info::{AuthInfo, AuthInfoGenerations, decode_auth_info, encode_auth_info};
