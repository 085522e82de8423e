// src/api/handlers/ws.rs
use actix::{Actor, Addr, AsyncContext, Handler, Message, StreamHandler};
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_web_actors::ws;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::analyzer::{SessionView, StateObserver};
use crate::models::StateSnapshot;

/// One session state pushed to connected pages.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct StatePush(pub StateSnapshot);

/// Fans session updates out to every connected WebSocket client. This is
/// the presentation adapter's subscription: the page renders whatever
/// snapshot arrives and holds no lifecycle logic of its own.
#[derive(Clone)]
pub struct WsBroker {
    clients: Arc<RwLock<Vec<Addr<WsConnection>>>>,
}

impl WsBroker {
    pub fn new() -> Self {
        Self {
            clients: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn register(&self, addr: Addr<WsConnection>) {
        let mut clients = self.clients.write().await;
        clients.push(addr);
    }

    pub async fn unregister(&self, addr: &Addr<WsConnection>) {
        let mut clients = self.clients.write().await;
        clients.retain(|c| c != addr);
    }

    pub async fn broadcast(&self, msg: StatePush) {
        let clients = self.clients.read().await;
        for client in clients.iter() {
            client.do_send(msg.clone());
        }
    }
}

impl Default for WsBroker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl StateObserver for WsBroker {
    async fn state_changed(&self, view: SessionView) {
        self.broadcast(StatePush(StateSnapshot::from(view))).await;
    }
}

pub struct WsConnection {
    broker: WsBroker,
}

impl WsConnection {
    pub fn new(broker: WsBroker) -> Self {
        Self { broker }
    }
}

impl Actor for WsConnection {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let addr = ctx.address();
        let broker = self.broker.clone();
        actix::spawn(async move {
            broker.register(addr).await;
        });
    }

    fn stopped(&mut self, ctx: &mut Self::Context) {
        let addr = ctx.address();
        let broker = self.broker.clone();
        actix::spawn(async move {
            broker.unregister(&addr).await;
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsConnection {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Close(reason)) => ctx.close(reason),
            _ => (),
        }
    }
}

impl Handler<StatePush> for WsConnection {
    type Result = ();

    fn handle(&mut self, msg: StatePush, ctx: &mut Self::Context) {
        if let Ok(json) = serde_json::to_string(&msg.0) {
            ctx.text(json);
        }
    }
}

pub async fn ws_handler(
    req: HttpRequest,
    stream: web::Payload,
    broker: web::Data<WsBroker>,
) -> Result<HttpResponse, Error> {
    let conn = WsConnection::new(broker.get_ref().clone());
    ws::start(conn, &req, stream)
}
