//! Integração isolada com o gateway de execução via protocolo XML sobre
//! sockets/DLL. Fornece tipos, eventos e (opcionalmente) bindings FFI reais
//! via feature `real_dll`.

mod api;
mod error;
#[cfg(all(target_os = "windows", feature = "real_dll"))]
mod ffi;
#[cfg(all(target_os = "windows", feature = "real_dll"))]
mod ffi_types;
mod mock;
pub mod transaq;

// Evita ambiguidade de glob: exporta NResult apenas de um lugar
pub use error::*;
#[cfg(all(target_os = "windows", feature = "real_dll"))]
pub use ffi::NResult; // contém XmlGwError etc.

pub use api::*;
#[cfg(all(target_os = "windows", feature = "real_dll"))]
pub use ffi::XmlGwConnector as RealXmlGwConnector;
#[cfg(all(target_os = "windows", feature = "real_dll"))]
pub use ffi_types::*;
pub use mock::XmlGwConnector as MockXmlGwConnector;
pub use mock::*; // inclui CallbackEvent, HistoryTradeSource etc.

// Compat: alias interno para manter `use xmlgw::*` estável entre versões.
pub mod xmlgw {
    pub use super::*;
}
