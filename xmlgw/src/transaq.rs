// Mini-Disclaimer: Uso educacional/experimental; sem recomendação de investimento, afiliação ou remuneração de terceiros; veja README & DISCLAIMER.
//! Transaq-style XML-over-command/response adapter: order/trade status framing, the
//! command/reply correlator, and the `<server_status>` reconnect supervisor.
//!
//! This is the representative trading-system connector: a venue that speaks XML commands over
//! a socket/DLL channel rather than ProfitDLL's direct callback interface (see [`crate::mock`]
//! for that one). `SendCommand` here means "write the XML, wait for the correlated reply";
//! everything else is parsing the three message shapes the venue pushes back: order updates,
//! trade reports, and connection status.

use quick_xml::events::Event;
use quick_xml::Reader;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{oneshot, Mutex as AsyncMutex};
use tokio::time::timeout;

/// Status of an order as reported by a venue `<order status="...">` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Sent,
    Submitted,
    Filled,
    Cancelled,
    Rejected,
    Error,
}

/// Maps a raw `status` attribute onto [`OrderStatus`]. `None` means "ignore this update" —
/// covers the venue's own `"none"` sentinel and any status string we don't recognize.
fn map_order_status(raw: &str) -> Option<OrderStatus> {
    use OrderStatus::*;
    match raw {
        "active" => Some(Submitted),
        "matched" => Some(Filled),
        "cancelled" | "disabled" | "expired" => Some(Cancelled),
        "rejected" | "refused" => Some(Rejected),
        "forwarding" | "wait" | "watching" => Some(Sent),
        "denied" | "failed" | "inactive" | "removed" => Some(Error),
        _ => None,
    }
}

/// One order-state update parsed out of an `<orders>` reply.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderUpdate {
    pub transaction_id: String,
    pub order_no: Option<String>,
    pub status: OrderStatus,
    pub balance: Decimal,
    pub message: Option<String>,
}

/// Parses `<orders><order transactionid="..." status="..." balance="..."><orderno>...</orderno>
/// <result>...</result><withdrawtime>...</withdrawtime></order>...</orders>`.
///
/// A `status="none"` (or unrecognized) order is skipped. A `cancelled` order with an empty or
/// absent `withdrawtime` is also skipped — the venue sends this as an intermediate echo, not a
/// real cancellation, and a caller acting on it would close an order still open.
pub fn parse_orders_xml(xml: &str) -> Vec<OrderUpdate> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut updates = Vec::new();

    let mut in_order = false;
    let mut current_child: Option<String> = None;
    let mut transaction_id = String::new();
    let mut raw_status = String::new();
    let mut balance = Decimal::ZERO;
    let mut order_no: Option<String> = None;
    let mut result_message: Option<String> = None;
    let mut withdrawtime: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"order" => {
                in_order = true;
                current_child = None;
                transaction_id.clear();
                raw_status.clear();
                balance = Decimal::ZERO;
                order_no = None;
                result_message = None;
                withdrawtime = None;
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().unwrap_or_default().into_owned();
                    match attr.key.as_ref() {
                        b"transactionid" => transaction_id = value,
                        b"status" => raw_status = value,
                        b"balance" => balance = Decimal::from_str(&value).unwrap_or_default(),
                        _ => {}
                    }
                }
            }
            Ok(Event::Start(e)) if in_order => {
                current_child = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::Text(t)) if in_order => {
                if let Some(child) = current_child.as_deref() {
                    let text = t.unescape().unwrap_or_default().into_owned();
                    match child {
                        "orderno" => order_no = Some(text),
                        "result" => result_message = Some(text),
                        "withdrawtime" => withdrawtime = Some(text),
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"order" => {
                in_order = false;
                current_child = None;

                let Some(status) = map_order_status(&raw_status) else {
                    continue;
                };

                if status == OrderStatus::Cancelled {
                    let has_withdrawtime = withdrawtime.as_deref().is_some_and(|s| !s.is_empty());
                    if !has_withdrawtime {
                        continue;
                    }
                }

                let message = result_message.filter(|m| !m.is_empty());
                let message = if status == OrderStatus::Error {
                    Some(match message {
                        Some(m) => format!("{m} (status: {raw_status})"),
                        None => format!("status: {raw_status}"),
                    })
                } else {
                    message.or_else(|| Some(format!("status: {raw_status}")))
                };

                updates.push(OrderUpdate {
                    transaction_id: transaction_id.clone(),
                    order_no: order_no.clone(),
                    status,
                    balance,
                    message,
                });
            }
            Ok(Event::End(e)) if in_order => {
                if current_child.as_deref() == Some(std::str::from_utf8(e.name().as_ref()).unwrap_or_default()) {
                    current_child = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    updates
}

/// One executed trade parsed out of a `<trades>` reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub trade_no: String,
    pub order_no: String,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Parses `<trades><trade tradeno="..." orderno="..." price="..." quantity="..."/>...</trades>`.
pub fn parse_trades_xml(xml: &str) -> Vec<Trade> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut trades = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf);
        let is_trade_tag = |e: &quick_xml::events::BytesStart<'_>| e.name().as_ref() == b"trade";
        match event {
            Ok(Event::Empty(e)) if is_trade_tag(&e) => trades.push(parse_trade_attrs(&e)),
            Ok(Event::Start(e)) if is_trade_tag(&e) => trades.push(parse_trade_attrs(&e)),
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    trades
}

fn parse_trade_attrs(e: &quick_xml::events::BytesStart<'_>) -> Trade {
    let mut trade_no = String::new();
    let mut order_no = String::new();
    let mut price = Decimal::ZERO;
    let mut quantity = Decimal::ZERO;
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value().unwrap_or_default().into_owned();
        match attr.key.as_ref() {
            b"tradeno" => trade_no = value,
            b"orderno" => order_no = value,
            b"price" => price = Decimal::from_str(&value).unwrap_or_default(),
            b"quantity" => quantity = Decimal::from_str(&value).unwrap_or_default(),
            _ => {}
        }
    }
    Trade { trade_no, order_no, price, quantity }
}

/// Parsed `<server_status connected="..." recover="..." id="..."/>` session message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServerStatus {
    pub connected: bool,
    pub is_error: bool,
    pub recover: bool,
    pub id: Option<String>,
}

/// Parses a single `<server_status .../>` message.
pub fn parse_server_status_xml(xml: &str) -> Option<ServerStatus> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"server_status" => {
                let mut status = ServerStatus::default();
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().unwrap_or_default().into_owned();
                    match attr.key.as_ref() {
                        b"connected" => match value.as_str() {
                            "true" => status.connected = true,
                            "error" => status.is_error = true,
                            _ => {}
                        },
                        b"recover" => status.recover = value == "true",
                        b"id" => status.id = Some(value),
                        _ => {}
                    }
                }
                return Some(status);
            }
            Ok(Event::Eof) => return None,
            Err(_) => return None,
            _ => {}
        }
        buf.clear();
    }
}

/// Builds `<command id="...">atatags attrs.../></command>` for an outgoing request.
pub fn build_command_xml(id: u64, tag: &str, attrs: &[(&str, &str)]) -> String {
    let mut xml = format!("<command id=\"{id}\"><{tag}");
    for (key, value) in attrs {
        xml.push_str(&format!(" {key}=\"{}\"", escape_attr(value)));
    }
    xml.push_str("/></command>");
    xml
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Transport the connector writes raw command XML into. Supplied by the caller so tests (and
/// alternate transports) can substitute an in-memory sink for a real socket/DLL channel.
pub trait CommandSink: Send + Sync {
    fn write(&self, xml: &str);
}

/// Default time a caller waits for a command reply before giving up.
pub const COMMAND_REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Base delay before the first reconnect attempt; doubles per attempt up to a cap.
const RECONNECT_BASE_DELAY: Duration = Duration::from_millis(500);
const RECONNECT_MAX_DELAY: Duration = Duration::from_secs(30);
const MAX_RECONNECT_ATTEMPTS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum TransaqError {
    #[error("command reply timed out")]
    ReplyTimeout,
    #[error("connector stopped after a fatal reconnect failure: {0}")]
    Fatal(String),
}

struct PendingReplies {
    next_id: AtomicU64,
    waiting: AsyncMutex<HashMap<u64, oneshot::Sender<String>>>,
}

impl Default for PendingReplies {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            waiting: AsyncMutex::new(HashMap::new()),
        }
    }
}

impl PendingReplies {
    fn next_request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn register(&self, id: u64) -> oneshot::Receiver<String> {
        let (tx, rx) = oneshot::channel();
        self.waiting.lock().await.insert(id, tx);
        rx
    }

    async fn resolve(&self, id: u64, payload: String) {
        if let Some(tx) = self.waiting.lock().await.remove(&id) {
            let _ = tx.send(payload);
        }
    }
}

/// Correlates outgoing `SendCommand(xml)` calls with their replies, and drives the
/// `<server_status>` reconnect state machine.
///
/// Grounded on the Transaq connector's `Connector::SendCommand`/`Connector::Connect`: there, a
/// single outstanding "waiting for server_status" condition variable gates the one in-flight
/// connect call. This generalizes that into a map of outstanding requests keyed by id, each
/// resolved independently through a `oneshot` channel with its own timeout, so several commands
/// can be in flight (order submissions, cancels, history requests) without blocking each other.
pub struct TransaqConnector {
    pending: PendingReplies,
    stored_connect_command: AsyncMutex<Option<String>>,
    reconnect_attempts: AtomicU64,
    fatal: AtomicBool,
    sink: Arc<dyn CommandSink>,
}

impl TransaqConnector {
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self {
            pending: PendingReplies::default(),
            stored_connect_command: AsyncMutex::new(None),
            reconnect_attempts: AtomicU64::new(0),
            fatal: AtomicBool::new(false),
            sink,
        }
    }

    /// Sends `tag`/`attrs` as a `<command>` and waits for its correlated reply, failing with
    /// [`TransaqError::ReplyTimeout`] after [`COMMAND_REPLY_TIMEOUT`]. The outgoing XML for a
    /// `"connect"` command is remembered so a later disconnect can be retried automatically.
    pub async fn send_command(&self, tag: &str, attrs: &[(&str, &str)]) -> Result<String, TransaqError> {
        if self.fatal.load(Ordering::Acquire) {
            return Err(TransaqError::Fatal(
                "connector stopped after repeated reconnect failure".into(),
            ));
        }
        let id = self.pending.next_request_id();
        let rx = self.pending.register(id).await;
        let xml = build_command_xml(id, tag, attrs);
        if tag == "connect" {
            *self.stored_connect_command.lock().await = Some(xml.clone());
        }
        self.sink.write(&xml);
        match timeout(COMMAND_REPLY_TIMEOUT, rx).await {
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(_)) | Err(_) => Err(TransaqError::ReplyTimeout),
        }
    }

    /// Feeds a reply for request `id` back to whichever `send_command` call is waiting on it.
    pub async fn on_reply(&self, id: u64, payload: String) {
        self.pending.resolve(id, payload).await;
    }

    /// Applies the reconnect state machine to a freshly-parsed `<server_status>` message.
    ///
    /// `connected` resets the attempt counter. `recover=true` logs and waits — the venue is
    /// recovering the existing session on its own, no reconnect needed. A plain disconnect with
    /// a stored connect command schedules a reconnect; one with no stored command, or a
    /// reconnect attempt itself exceeding the retry budget, stops the connector permanently via
    /// `stop_due_fatal_error`.
    pub async fn handle_server_status(&self, status: ServerStatus) {
        if status.connected {
            self.reconnect_attempts.store(0, Ordering::Release);
            tracing::info!(id = ?status.id, "transaq server_status: connected");
            return;
        }

        if status.recover {
            tracing::warn!("transaq server_status: disconnected, server recovering session, waiting");
            return;
        }

        let stored = self.stored_connect_command.lock().await.clone();
        match stored {
            Some(connect_xml) => {
                tracing::warn!(is_error = status.is_error, "transaq server_status: disconnected, scheduling reconnect");
                self.schedule_reconnect(connect_xml).await;
            }
            None => {
                self.stop_due_fatal_error("disconnected with no stored connect command").await;
            }
        }
    }

    /// Resends the stored connect command after an exponential backoff, mirroring the source's
    /// background reconnection timer. Exceeding the retry budget escalates to
    /// `stop_due_fatal_error` instead of retrying forever.
    async fn schedule_reconnect(&self, connect_xml: String) {
        let attempt = self.reconnect_attempts.fetch_add(1, Ordering::AcqRel) + 1;
        if attempt > MAX_RECONNECT_ATTEMPTS {
            self.stop_due_fatal_error("exceeded max reconnect attempts").await;
            return;
        }
        let shift: u32 = (attempt - 1).min(6) as u32;
        let delay = RECONNECT_BASE_DELAY
            .saturating_mul(1u32 << shift)
            .min(RECONNECT_MAX_DELAY);
        tokio::time::sleep(delay).await;
        self.sink.write(&connect_xml);
    }

    async fn stop_due_fatal_error(&self, reason: &str) {
        self.fatal.store(true, Ordering::Release);
        tracing::error!(reason, "transaq connector stopped due to fatal error");
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.load(Ordering::Acquire)
    }

    pub fn reconnect_attempts(&self) -> u64 {
        self.reconnect_attempts.load(Ordering::Acquire)
    }
}

/// Local order table correlating venue order numbers back to the transaction id that submitted
/// them, so a trade reported against an order number we never registered is logged and dropped
/// instead of silently accepted.
#[derive(Debug, Default)]
pub struct OrderTable {
    by_order_no: Mutex<HashMap<String, String>>,
}

impl OrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, order_no: impl Into<String>, transaction_id: impl Into<String>) {
        self.by_order_no.lock().unwrap().insert(order_no.into(), transaction_id.into());
    }

    pub fn forget(&self, order_no: &str) {
        self.by_order_no.lock().unwrap().remove(order_no);
    }

    /// Keeps only the trades whose order number is known; unknown order numbers are logged and
    /// dropped.
    pub fn filter_known_trades(&self, trades: Vec<Trade>) -> Vec<Trade> {
        let table = self.by_order_no.lock().unwrap();
        trades
            .into_iter()
            .filter(|trade| {
                let known = table.contains_key(&trade.order_no);
                if !known {
                    tracing::warn!(
                        order_no = %trade.order_no,
                        trade_no = %trade.trade_no,
                        "dropping trade for unknown order number"
                    );
                }
                known
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn status_mapping_matches_the_contract_table() {
        assert_eq!(map_order_status("active"), Some(OrderStatus::Submitted));
        assert_eq!(map_order_status("matched"), Some(OrderStatus::Filled));
        assert_eq!(map_order_status("cancelled"), Some(OrderStatus::Cancelled));
        assert_eq!(map_order_status("disabled"), Some(OrderStatus::Cancelled));
        assert_eq!(map_order_status("expired"), Some(OrderStatus::Cancelled));
        assert_eq!(map_order_status("rejected"), Some(OrderStatus::Rejected));
        assert_eq!(map_order_status("refused"), Some(OrderStatus::Rejected));
        assert_eq!(map_order_status("forwarding"), Some(OrderStatus::Sent));
        assert_eq!(map_order_status("wait"), Some(OrderStatus::Sent));
        assert_eq!(map_order_status("watching"), Some(OrderStatus::Sent));
        assert_eq!(map_order_status("denied"), Some(OrderStatus::Error));
        assert_eq!(map_order_status("failed"), Some(OrderStatus::Error));
        assert_eq!(map_order_status("inactive"), Some(OrderStatus::Error));
        assert_eq!(map_order_status("removed"), Some(OrderStatus::Error));
        assert_eq!(map_order_status("none"), None);
        assert_eq!(map_order_status("bogus"), None);
    }

    #[test]
    fn parses_orders_and_skips_none_status() {
        let xml = r#"<orders>
            <order transactionid="1" status="active" balance="100"><orderno>555</orderno></order>
            <order transactionid="2" status="none" balance="0"></order>
        </orders>"#;
        let updates = parse_orders_xml(xml);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].transaction_id, "1");
        assert_eq!(updates[0].order_no.as_deref(), Some("555"));
        assert_eq!(updates[0].status, OrderStatus::Submitted);
        assert_eq!(updates[0].balance, Decimal::from(100));
    }

    #[test]
    fn cancelled_with_empty_withdrawtime_is_ignored() {
        let xml = r#"<orders>
            <order transactionid="1" status="cancelled" balance="0">
                <orderno>555</orderno><withdrawtime></withdrawtime>
            </order>
            <order transactionid="2" status="cancelled" balance="0">
                <orderno>556</orderno><withdrawtime>2024-01-01 10:00:00</withdrawtime>
            </order>
        </orders>"#;
        let updates = parse_orders_xml(xml);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].transaction_id, "2");
        assert_eq!(updates[0].status, OrderStatus::Cancelled);
    }

    #[test]
    fn error_status_appends_the_status_text_to_a_nonempty_message() {
        let xml = r#"<orders>
            <order transactionid="1" status="denied" balance="0">
                <orderno>1</orderno><result>insufficient funds</result>
            </order>
        </orders>"#;
        let updates = parse_orders_xml(xml);
        assert_eq!(updates[0].message.as_deref(), Some("insufficient funds (status: denied)"));
    }

    #[test]
    fn parses_trades() {
        let xml = r#"<trades>
            <trade tradeno="9001" orderno="555" price="10.37" quantity="100"/>
            <trade tradeno="9002" orderno="556" price="10.40" quantity="50"/>
        </trades>"#;
        let trades = parse_trades_xml(xml);
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].trade_no, "9001");
        assert_eq!(trades[0].price, Decimal::new(1037, 2));
    }

    #[test]
    fn order_table_drops_trades_for_unknown_order_numbers() {
        let table = OrderTable::new();
        table.register("555", "tx-1");
        let trades = vec![
            Trade { trade_no: "1".into(), order_no: "555".into(), price: Decimal::ONE, quantity: Decimal::ONE },
            Trade { trade_no: "2".into(), order_no: "999".into(), price: Decimal::ONE, quantity: Decimal::ONE },
        ];
        let known = table.filter_known_trades(trades);
        assert_eq!(known.len(), 1);
        assert_eq!(known[0].order_no, "555");
    }

    #[test]
    fn parses_server_status() {
        let connected = parse_server_status_xml(r#"<server_status connected="true" id="1"/>"#).unwrap();
        assert!(connected.connected);
        assert!(!connected.recover);

        let recovering = parse_server_status_xml(r#"<server_status connected="false" recover="true"/>"#).unwrap();
        assert!(!recovering.connected);
        assert!(recovering.recover);

        let errored = parse_server_status_xml(r#"<server_status connected="error"/>"#).unwrap();
        assert!(errored.is_error);
    }

    #[test]
    fn build_command_xml_escapes_attribute_values() {
        let xml = build_command_xml(7, "order", &[("seccode", "PETR4"), ("comment", "a&b\"c")]);
        assert_eq!(xml, r#"<command id="7"><order seccode="PETR4" comment="a&amp;b&quot;c"/></command>"#);
    }

    struct RecordingSink {
        writes: AtomicUsize,
    }

    impl CommandSink for RecordingSink {
        fn write(&self, _xml: &str) {
            self.writes.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[tokio::test]
    async fn send_command_resolves_when_the_matching_reply_arrives() {
        let sink = Arc::new(RecordingSink { writes: AtomicUsize::new(0) });
        let connector = Arc::new(TransaqConnector::new(sink.clone()));

        let connector_for_reply = connector.clone();
        tokio::spawn(async move {
            connector_for_reply.on_reply(1, "<result success=\"true\"/>".into()).await;
        });

        let reply = connector
            .send_command("connect", &[("login", "demo")])
            .await
            .unwrap();
        assert_eq!(reply, "<result success=\"true\"/>");
        assert_eq!(sink.writes.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn disconnect_with_no_stored_connect_command_stops_the_connector() {
        let sink = Arc::new(RecordingSink { writes: AtomicUsize::new(0) });
        let connector = TransaqConnector::new(sink);
        connector
            .handle_server_status(ServerStatus { connected: false, is_error: true, recover: false, id: None })
            .await;
        assert!(connector.is_fatal());
    }

    #[tokio::test]
    async fn recover_flag_waits_without_reconnecting() {
        let sink = Arc::new(RecordingSink { writes: AtomicUsize::new(0) });
        let connector = TransaqConnector::new(sink.clone());
        connector
            .handle_server_status(ServerStatus { connected: false, is_error: false, recover: true, id: None })
            .await;
        assert!(!connector.is_fatal());
        assert_eq!(sink.writes.load(Ordering::Relaxed), 0);
    }
}
