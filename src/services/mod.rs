pub mod client;
pub mod notifier;
pub mod store;
pub mod travel_api;

#[cfg(test)]
pub(crate) mod testing;
