// Mini-Disclaimer: Uso educacional/experimental; sem recomendação de investimento, afiliação ou remuneração de terceiros; veja README & DISCLAIMER.
#![cfg(all(target_os = "windows", feature = "real_dll"))]
use meridian_xmlgw::profitdll::*;

#[test]
fn load_or_missing_symbol() {
    match XmlGwConnector::new(None) {
        Ok(conn) => {
            let _ = conn;
        }
        Err(e) => match e {
            XmlGwError::Load(_) | XmlGwError::MissingSymbol(_) => {}
            other => panic!("Erro inesperado ao carregar XmlGw: {other:?}"),
        },
    }
}
