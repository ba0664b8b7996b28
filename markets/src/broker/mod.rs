// Mini-Disclaimer: Uso educacional/experimental; sem recomendação de investimento, afiliação ou remuneração de terceiros; veja README & DISCLAIMER.
//! Broker abstraction layer
//!
//! Interfaces unificadas para interação com diferentes brokers e provedores
//! de dados. Implementações concretas específicas (ex: XmlGw) residem em
//! crates externas como `meridian-xmlgw`.

pub mod traits;
pub use traits::*;
