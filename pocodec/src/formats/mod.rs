//! Localization file formats supported by pocodec.
//!
//! Every format implements [`crate::traits::Formatter`]; the PO format is the
//! only one shipped.

pub mod po;

pub use po::PoFormatter;
