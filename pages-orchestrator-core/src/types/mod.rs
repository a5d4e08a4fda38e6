//! Core type definitions

mod binding;
mod config;
mod generator;

pub use binding::{
    BindingOperation, BindingOutcome, BindingResult, DnsStatus, DomainBindingRequest, PagesError,
    SkipReason,
};
pub use config::{PathSlot, UserConfig};
pub use generator::GeneratedName;

// Re-export library types used in service signatures
pub use pages_orchestrator_provider::{
    ApiEnvelope, ApiMessage, DnsRecord, ForwardRequest, ForwardResponse, Zone,
};
