#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unreachable,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod checksum;
pub mod consts;
pub mod errors;
pub mod gateway;
pub mod options;
pub mod request;
pub mod response;
pub mod settings;
pub mod types;
pub mod validation;

pub use gateway::{AuthorizeOrder, QuickPay};
pub use options::PaymentOptions;
pub use request::{PaymentRequestParameters, RequestField};
pub use response::{PaymentResponseParameters, ResponseField};
pub use types::FlatMapping;
