mod address;
mod client;

pub use address::Address;
pub use client::{ClientFieldsPatch, ClientRecord};
