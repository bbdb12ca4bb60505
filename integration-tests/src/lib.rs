//! Cross-contract scenarios on two simulated chains.
//!
//! Chain A locks a plain cw20 token; chain B mints and burns a multichain
//! token against the bridge's issuance cap. Both bridges are owned by admin
//! gateways and linked through mock endpoints in one `App`.

#[cfg(test)]
mod utils;

#[cfg(test)]
mod governance;
#[cfg(test)]
mod recovery;
