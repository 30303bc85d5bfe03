pub mod request;
pub(crate) mod serde_utils;
#[cfg(test)]
pub(crate) mod stub;
