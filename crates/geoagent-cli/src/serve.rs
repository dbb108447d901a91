//! Local stand-in for the message bus: newline-delimited JSON in on stdin,
//! replies out on stdout, one tokio task per inbound message.

use std::sync::Arc;

use geoagent_core::{
    handle_message, ChannelSink, EvRequest, Outbound, ParkingRequest, Reply, ReplySink,
};
use geoagent_evcharger::EvChargerAdaptor;
use geoagent_parking::ParkingAdaptor;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinSet;

#[derive(Clone)]
pub(crate) struct Adaptors {
    pub(crate) ev: Arc<EvChargerAdaptor>,
    pub(crate) parking: Arc<ParkingAdaptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Protocol {
    Ev,
    Parking,
}

/// `{"sender": "...", "protocol": "ev" | "parking", "payload": {...}}`
#[derive(Debug, Deserialize)]
struct Inbound {
    sender: String,
    protocol: Protocol,
    payload: serde_json::Value,
}

pub(crate) async fn run(
    adaptors: Adaptors,
    sink: ChannelSink,
    mut replies: UnboundedReceiver<Outbound>,
) -> anyhow::Result<()> {
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(outbound) = replies.recv().await {
            let mut line = serde_json::to_vec(&outbound)?;
            line.push(b'\n');
            stdout.write_all(&line).await?;
            stdout.flush().await?;
        }
        anyhow::Ok(())
    });

    tracing::info!(
        ev = geoagent_evcharger::AGENT_NAME,
        parking = geoagent_parking::AGENT_NAME,
        "adaptors ready, reading messages from stdin"
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = JoinSet::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let inbound: Inbound = match serde_json::from_str(&line) {
            Ok(inbound) => inbound,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unparseable inbound message");
                continue;
            }
        };
        let adaptors = adaptors.clone();
        let sink = sink.clone();
        tasks.spawn(async move { dispatch(&adaptors, &sink, inbound).await });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            tracing::error!(error = %err, "message task panicked");
        }
    }
    tracing::info!("stdin closed, flushing replies");
    drop(sink);
    writer.await??;
    Ok(())
}

async fn dispatch(adaptors: &Adaptors, sink: &ChannelSink, inbound: Inbound) {
    let sender = inbound.sender;
    match inbound.protocol {
        Protocol::Ev => match serde_json::from_value::<EvRequest>(inbound.payload) {
            Ok(request) => {
                handle_message(adaptors.ev.as_ref(), sink, &sender, request).await;
            }
            Err(err) => reject(sink, &sender, &err).await,
        },
        Protocol::Parking => match serde_json::from_value::<ParkingRequest>(inbound.payload) {
            Ok(request) => {
                handle_message(adaptors.parking.as_ref(), sink, &sender, request).await;
            }
            Err(err) => reject(sink, &sender, &err).await,
        },
    }
}

/// A payload that does not decode into the protocol's request still gets
/// exactly one reply.
async fn reject(sink: &ChannelSink, sender: &str, err: &serde_json::Error) {
    tracing::error!(sender = %sender, error = %err, "invalid request payload");
    let reply = Reply::Error {
        message: format!("invalid request payload: {err}"),
    };
    if let Err(err) = sink.send(sender, reply).await {
        tracing::error!(error = %err, "reply not delivered");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_parses_ev_message() {
        let inbound: Inbound = serde_json::from_str(
            r#"{"sender":"agent1q","protocol":"ev","payload":{"latitude":40.0,"longitude":-74.0,"miles_radius":5}}"#,
        )
        .unwrap();
        assert_eq!(inbound.sender, "agent1q");
        assert_eq!(inbound.protocol, Protocol::Ev);
        let request: EvRequest = serde_json::from_value(inbound.payload).unwrap();
        assert!((request.miles_radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn inbound_rejects_unknown_protocol() {
        let result = serde_json::from_str::<Inbound>(
            r#"{"sender":"agent1q","protocol":"hotels","payload":{}}"#,
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn reject_sends_single_error_reply() {
        let (sink, mut rx) = ChannelSink::new();
        let err = serde_json::from_str::<ParkingRequest>("{}").unwrap_err();

        reject(&sink, "agent1q", &err).await;
        drop(sink);

        let sent = rx.recv().await.unwrap();
        assert_eq!(sent.to, "agent1q");
        assert!(matches!(sent.reply, Reply::Error { ref message } if message.starts_with("invalid request payload")));
        assert!(rx.recv().await.is_none());
    }
}
