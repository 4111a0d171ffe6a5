pub mod access;
pub mod dto;
pub mod errors;
pub mod ports;
pub mod services;
#[cfg(test)]
pub(crate) mod test_support;
pub mod use_cases;
