/// Hands out an opaque identifier for an actor.
///
/// The ledger never parses or validates addresses; they only ever show up
/// inside block payloads.
pub trait AddressProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn address(&self) -> Result<String, Self::Error>;
}
