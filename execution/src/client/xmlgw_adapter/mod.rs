/// Implementação do cliente de execução para corretora brasileira via DLL
/// 
/// Esta implementação demonstra como integrar uma DLL de corretora brasileira
/// seguindo os padrões do projeto Meridian.

use crate::{
    UnindexedAccountEvent, UnindexedAccountSnapshot,
    balance::AssetBalance,
    client::ExecutionClient,
    error::{ConnectivityError, UnindexedClientError, UnindexedOrderError},
    order::{
        Order, OrderKey,
        request::{OrderRequestCancel, OrderRequestOpen, UnindexedOrderResponseCancel},
        state::Open,
    },
    trade::Trade,
};
use crate::compat::{AssetNameExchange, InstrumentNameExchange, QuoteAsset};
use meridian_markets::{ExchangeId, Side};
use chrono::{DateTime, Utc};
use derive_more::Constructor;
use futures::stream::BoxStream;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

pub mod dll_wrapper;
pub mod types;

use dll_wrapper::CorretoraDll;
use types::*;

/// Configuração para a corretora brasileira
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor)]
pub struct CorretoraConfig {
    /// Login do usuário
    pub login: String,
    /// Senha do usuário  
    pub password: String,
    /// Servidor de conexão
    pub server: String,
    /// Versão da API
    pub api_version: String,
    /// Timeout para operações em ms
    pub timeout_ms: u64,
    /// Modo demo (true) ou real (false)
    pub demo_mode: bool,
}

impl Default for CorretoraConfig {
    fn default() -> Self {
        Self {
            login: String::new(),
            password: String::new(),
            server: "demo.corretora.com.br".to_string(),
            api_version: "1.0".to_string(),
            timeout_ms: 10000,
            demo_mode: true,
        }
    }
}

/// Cliente de execução para corretora brasileira
/// 
/// Integra com a DLL da corretora para execução de ordens e 
/// streaming de dados de conta.
#[derive(Debug)]
pub struct CorretoraExecution {
    config: CorretoraConfig,
    dll: Arc<Mutex<CorretoraDll>>,
    event_tx: broadcast::Sender<UnindexedAccountEvent>,
    event_rx: broadcast::Receiver<UnindexedAccountEvent>,
    connected: Arc<Mutex<bool>>,
}

impl Clone for CorretoraExecution {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            dll: Arc::clone(&self.dll),
            event_tx: self.event_tx.clone(),
            event_rx: self.event_rx.resubscribe(),
            connected: Arc::clone(&self.connected),
        }
    }
}

impl CorretoraExecution {
    /// Cria novo cliente com configuração customizada
    pub fn new_with_config(config: CorretoraConfig) -> Self {
        let (event_tx, event_rx) = broadcast::channel(1024);
        
        let dll = Arc::new(Mutex::new(
            CorretoraDll::new().expect("Failed to load corretora DLL")
        ));
        
        Self {
            config,
            dll,
            event_tx,
            event_rx,
            connected: Arc::new(Mutex::new(false)),
        }
    }
    
    /// Conecta à corretora via DLL
    async fn connect(&self) -> Result<(), UnindexedClientError> {
        let mut dll = self.dll.lock().await;
        
        debug!("Connecting to corretora: {}", self.config.server);
        
        let result = dll.connect(
            &self.config.login,
            &self.config.password,
            &self.config.server,
        ).await.map_err(|e| {
            UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("DLL connection failed: {}", e))
            )
        })?;
        
        if result {
            *self.connected.lock().await = true;
            info!("Successfully connected to corretora");
            Ok(())
        } else {
            Err(UnindexedClientError::Connectivity(
                ConnectivityError::Socket("authentication failed: invalid credentials".to_string())
            ))
        }
    }
    
    /// Desconecta da corretora
    async fn disconnect(&self) -> Result<(), UnindexedClientError> {
        let mut dll = self.dll.lock().await;
        dll.disconnect().await.map_err(|e| {
            UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("DLL disconnect failed: {}", e))
            )
        })?;
        
        *self.connected.lock().await = false;
        info!("Disconnected from corretora");
        Ok(())
    }
    
    /// Verifica se está conectado
    pub async fn is_connected(&self) -> bool {
        *self.connected.lock().await
    }
    
    /// Converte symbol da corretora para InstrumentNameExchange
    fn symbol_to_instrument(&self, symbol: &str) -> InstrumentNameExchange {
        // Exemplo: "PETR4" -> "PETR4"
        InstrumentNameExchange::from(symbol)
    }
    
    /// Converte InstrumentNameExchange para symbol da corretora
    fn instrument_to_symbol(&self, instrument: &InstrumentNameExchange) -> String {
        instrument.as_str().to_string()
    }
}

impl ExecutionClient for CorretoraExecution {
    const EXCHANGE: ExchangeId = ExchangeId::B3;
    type Config = CorretoraConfig;
    type AccountStream = BoxStream<'static, UnindexedAccountEvent>;

    fn new(config: Self::Config) -> Self {
        Self::new_with_config(config)
    }

    async fn account_snapshot(
        &self,
        assets: &[AssetNameExchange],
        instruments: &[InstrumentNameExchange],
    ) -> Result<UnindexedAccountSnapshot, UnindexedClientError> {
        if !self.is_connected().await {
            self.connect().await?;
        }
        
        debug!("Fetching account snapshot for {} assets, {} instruments", 
               assets.len(), instruments.len());
        
        let dll = self.dll.lock().await;
        
        // Busca balances via DLL
        let balances = dll.get_account_balances().await
            .map_err(|e| UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("Failed to get balances: {}", e))
            ))?
            .into_iter()
            .map(|balance| AssetBalance {
                asset: AssetNameExchange::from(balance.asset),
                balance: balance.balance,
                time_exchange: balance.timestamp,
            })
            .collect();
        
        // Busca ordens abertas via DLL
        let open_orders = dll.get_open_orders().await
            .map_err(|e| UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("Failed to get orders: {}", e))
            ))?;
        
        // Converte ordens para formato Meridian
        let instruments_with_orders = open_orders
            .into_iter()
            .map(|order| crate::InstrumentAccountSnapshot {
                instrument: self.symbol_to_instrument(&order.symbol),
                orders: vec![], // TODO: Converter DllOrder para UnindexedOrder
            })
            .collect();
        
        Ok(UnindexedAccountSnapshot {
            exchange: Self::EXCHANGE,
            balances,
            instruments: instruments_with_orders,
        })
    }

    async fn account_stream(
        &self,
        _assets: &[AssetNameExchange],
        _instruments: &[InstrumentNameExchange],
    ) -> Result<Self::AccountStream, UnindexedClientError> {
        if !self.is_connected().await {
            self.connect().await?;
        }
        
        info!("Starting corretora account stream");
        
        // TODO: Implementar streaming via DLL callback ou polling
        // Por enquanto, retorna stream baseado no broadcast receiver
        Ok(Box::pin(
            tokio_stream::wrappers::BroadcastStream::new(self.event_rx.resubscribe())
                .map_while(|result| match result {
                    Ok(event) => Some(event),
                    Err(error) => {
                        error!(?error, "Corretora Broadcast AccountStream lagged - terminating");
                        None
                    }
                })
        ))
    }

    async fn open_order(
        &self,
        request: OrderRequestOpen<ExchangeId, &InstrumentNameExchange>,
    ) -> Option<Order<ExchangeId, InstrumentNameExchange, Result<Open, UnindexedOrderError>>> {
        if !self.is_connected().await {
            if let Err(e) = self.connect().await {
                error!("Failed to connect before placing order: {}", e);
                return None;
            }
        }
        
        debug!("Placing order: {:?}", request);
        
        let dll = self.dll.lock().await;
        
        let dll_order = DllOrderRequest {
            symbol: self.instrument_to_symbol(request.key.instrument),
            side: match request.state.side {
                Side::Buy => DllSide::Buy,
                Side::Sell => DllSide::Sell,
            },
            quantity: request.state.quantity,
            price: request.state.price,
            order_type: match request.state.kind {
                crate::order::OrderKind::Market => DllOrderType::Market,
                crate::order::OrderKind::Limit => DllOrderType::Limit,
                _ => DllOrderType::Limit, // Default fallback
            },
        };
        
        match dll.place_order(dll_order).await {
            Ok(dll_response) => {
                info!("Order placed successfully: ID {}", dll_response.order_id);
                
                Some(Order {
                    key: OrderKey {
                        exchange: request.key.exchange,
                        instrument: (*request.key.instrument).clone(),
                        strategy: request.key.strategy.clone(),
                        cid: request.key.cid.clone(),
                    },
                    side: request.state.side,
                    price: request.state.price,
                    quantity: request.state.quantity,
                    kind: request.state.kind,
                    time_in_force: request.state.time_in_force.clone(),
                    state: Ok(Open {
                        id: crate::order::id::OrderId::from(dll_response.order_id),
                        time_exchange: dll_response.timestamp,
                        price: request.state.price,
                        quantity: request.state.quantity,
                        filled_quantity: Decimal::ZERO, // Inicialmente não preenchida
                    }),
                })
            }
            Err(e) => {
                error!("Failed to place order: {}", e);
                
                Some(Order {
                    key: OrderKey {
                        exchange: request.key.exchange,
                        instrument: (*request.key.instrument).clone(),
                        strategy: request.key.strategy.clone(),
                        cid: request.key.cid.clone(),
                    },
                    side: request.state.side,
                    price: request.state.price,
                    quantity: request.state.quantity,
                    kind: request.state.kind,
                    time_in_force: request.state.time_in_force.clone(),
                    state: Err(UnindexedOrderError::Api(
                        crate::error::ApiError::new(
                            format!("DLL order error: {}", e)
                        )
                    )),
                })
            }
        }
    }

    async fn cancel_order(
        &self,
        request: OrderRequestCancel<ExchangeId, &InstrumentNameExchange>,
    ) -> Option<UnindexedOrderResponseCancel> {
        if !self.is_connected().await {
            if let Err(e) = self.connect().await {
                error!("Failed to connect before cancelling order: {}", e);
                return None;
            }
        }
        
        debug!("Cancelling order: {:?}", request);
        
        let dll = self.dll.lock().await;
        
        // TODO: Implementar cancelamento via DLL
        warn!("Order cancellation not yet implemented for corretora DLL");
        
        Some(UnindexedOrderResponseCancel {
            key: OrderKey {
                exchange: request.key.exchange,
                instrument: (*request.key.instrument).clone(),
                strategy: request.key.strategy.clone(),
                cid: request.key.cid.clone(),
            },
            state: Err(UnindexedOrderError::Api(
                crate::error::ApiError::new("Cancellation not implemented".to_string())
            )),
        })
    }

    async fn fetch_balances(
        &self,
    ) -> Result<Vec<AssetBalance<AssetNameExchange>>, UnindexedClientError> {
        if !self.is_connected().await {
            self.connect().await?;
        }
        
        debug!("Fetching balances from corretora DLL");
        
        let dll = self.dll.lock().await;
        let balances = dll.get_account_balances().await
            .map_err(|e| UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("Failed to get balances: {}", e))
            ))?
            .into_iter()
            .map(|balance| AssetBalance {
                asset: AssetNameExchange::from(balance.asset),
                balance: balance.balance,
                time_exchange: balance.timestamp,
            })
            .collect();
        
        Ok(balances)
    }

    async fn fetch_open_orders(
        &self,
    ) -> Result<Vec<Order<ExchangeId, InstrumentNameExchange, Open>>, UnindexedClientError> {
        if !self.is_connected().await {
            self.connect().await?;
        }
        
        debug!("Fetching open orders from corretora DLL");
        
        let dll = self.dll.lock().await;
        let orders = dll.get_open_orders().await
            .map_err(|e| UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("Failed to get orders: {}", e))
            ))?;
        
        // TODO: Converter DllOrder para Order<..., Open>
        warn!("Open orders conversion not yet implemented");
        Ok(Vec::new())
    }

    async fn fetch_trades(
        &self,
        time_since: DateTime<Utc>,
    ) -> Result<Vec<Trade<QuoteAsset, InstrumentNameExchange>>, UnindexedClientError> {
        if !self.is_connected().await {
            self.connect().await?;
        }
        
        debug!("Fetching trades from corretora DLL since: {}", time_since);
        
        let dll = self.dll.lock().await;
        let trades = dll.get_trades_since(time_since).await
            .map_err(|e| UnindexedClientError::Connectivity(
                ConnectivityError::Socket(format!("Failed to get trades: {}", e))
            ))?;
        
        // TODO: Converter DllTrade para Trade<QuoteAsset, InstrumentNameExchange>
        warn!("Trades conversion not yet implemented");
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[tokio::test]
    async fn test_corretora_client_creation() {
        let config = CorretoraConfig::default();
        let client = CorretoraExecution::new_with_config(config);
        
        assert_eq!(CorretoraExecution::EXCHANGE, ExchangeId::B3);
        assert!(!client.is_connected().await);
    }
    
    #[tokio::test]
    async fn test_symbol_conversion() {
        let config = CorretoraConfig::default();
        let client = CorretoraExecution::new_with_config(config);
        
        let symbol = "PETR4";
        let instrument = client.symbol_to_instrument(symbol);
        let converted_back = client.instrument_to_symbol(&instrument);
        
        assert_eq!(converted_back, symbol);
    }
}
