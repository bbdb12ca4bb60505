//! Test doubles for the contracts a bridge talks to.
//!
//! - `endpoint` - a transport endpoint that delivers messages synchronously
//!   to the endpoint registered for the destination application
//! - `oracle` - a settable price feed
//! - `receiver` - a downstream contract for send-and-call deliveries
//!
//! Each module exposes plain `instantiate`/`execute`/`query` functions meant
//! to be wrapped in a `cw_multi_test::ContractWrapper`.

pub mod endpoint;
pub mod oracle;
pub mod receiver;
