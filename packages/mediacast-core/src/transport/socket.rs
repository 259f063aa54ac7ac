//! Per-channel connect/read/reconnect loop.

use futures::StreamExt;
use reqwest::Url;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, WebSocketStream};
use tokio_util::sync::CancellationToken;

use super::manager::ChannelGuard;
use super::{Backoff, ChannelError};
use crate::events::{DispatchOutcome, Dispatcher};

/// Keeps one channel connected until its guard's token is cancelled.
pub(super) async fn run_channel(guard: ChannelGuard, url: Url, dispatcher: Dispatcher, backoff: Backoff) {
    let cancel = guard.cancel_token().clone();
    let mut attempt = 0usize;

    loop {
        let connected = tokio::select! {
            _ = cancel.cancelled() => break,
            result = connect_async(url.as_str()) => result,
        };

        match connected {
            Ok((ws, _)) => {
                log::info!("[Channel] Connected to {}", url);
                attempt = 0;
                guard.set_connected(true);
                let result = pump(ws, &dispatcher, &cancel).await;
                guard.set_connected(false);

                match result {
                    Ok(()) => break,
                    Err(e) => log::warn!("[Channel] {} dropped: {}", url, e),
                }
            }
            Err(e) => log::warn!("[Channel] Connect to {} failed: {}", url, e),
        }

        let delay = backoff.delay(attempt);
        attempt += 1;
        log::debug!("[Channel] Reconnecting to {} in {:?}", url, delay);
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    log::info!("[Channel] Stopped {}", url);
}

/// Reads frames until cancelled (`Ok`) or the connection ends (`Err`).
async fn pump<S>(
    mut ws: WebSocketStream<S>,
    dispatcher: &Dispatcher,
    cancel: &CancellationToken,
) -> Result<(), ChannelError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    loop {
        let message = tokio::select! {
            _ = cancel.cancelled() => {
                if let Err(e) = ws.close(None).await {
                    log::debug!("[Channel] Close handshake failed: {}", e);
                }
                return Ok(());
            }
            message = ws.next() => message,
        };

        match message {
            Some(Ok(Message::Text(text))) => deliver(dispatcher, text.as_str()),
            Some(Ok(Message::Binary(data))) => match std::str::from_utf8(&data) {
                Ok(text) => deliver(dispatcher, text),
                Err(_) => log::warn!("[Channel] Ignoring non-UTF-8 binary frame"),
            },
            Some(Ok(Message::Close(_))) | None => return Err(ChannelError::Closed),
            // Pings are answered by tungstenite itself.
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.into()),
        }
    }
}

fn deliver(dispatcher: &Dispatcher, text: &str) {
    match dispatcher.dispatch_raw(text) {
        DispatchOutcome::Malformed => {
            log::warn!("[Channel] Dropping malformed frame ({} bytes)", text.len());
        }
        DispatchOutcome::Delivered { failed, .. } if failed > 0 => {
            log::warn!("[Channel] {} handler(s) failed on frame", failed);
        }
        _ => {}
    }
}
