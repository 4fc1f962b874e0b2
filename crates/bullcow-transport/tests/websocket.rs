//! Exercises the WebSocket transport against a real `tokio-tungstenite`
//! client on a loopback socket.

#[cfg(feature = "websocket")]
mod websocket {
    use bullcow_transport::{
        Connection, Transport, TransportError, WebSocketConnection,
        WebSocketTransport,
    };
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite::Message;

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    /// Binds port 0, connects one client to `path` and returns both ends.
    async fn pair(path: &str) -> (WebSocketConnection, ClientWs) {
        let mut transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport.local_addr().expect("local addr");

        let accepted =
            tokio::spawn(async move { transport.accept().await.expect("accept") });
        let (client, _) =
            tokio_tungstenite::connect_async(format!("ws://{addr}{path}"))
                .await
                .expect("client should connect");
        (accepted.await.expect("accept task"), client)
    }

    #[tokio::test]
    async fn test_path_is_captured() {
        let (conn, _client) = pair("/ws/ab12cd").await;
        assert_eq!(conn.path(), "/ws/ab12cd");

        let (conn, _client) = pair("/lobby").await;
        assert_eq!(conn.path(), "/lobby");
    }

    #[tokio::test]
    async fn test_text_frames_both_ways() {
        let (conn, mut client) = pair("/ws/ab12cd").await;

        conn.send(r#"{"type":"lock_input"}"#).await.expect("send");
        let frame = client.next().await.expect("frame").expect("ok");
        assert_eq!(frame.to_text().unwrap(), r#"{"type":"lock_input"}"#);

        client.send(Message::text("apple")).await.unwrap();
        assert_eq!(conn.recv().await.unwrap().as_deref(), Some("apple"));
    }

    #[tokio::test]
    async fn test_binary_frames_decode_as_text() {
        let (conn, mut client) = pair("/").await;

        client
            .send(Message::Binary(b"melon".to_vec().into()))
            .await
            .unwrap();
        assert_eq!(conn.recv().await.unwrap().as_deref(), Some("melon"));

        client
            .send(Message::Binary(vec![0xff, 0xfe].into()))
            .await
            .unwrap();
        assert!(matches!(
            conn.recv().await,
            Err(TransportError::InvalidUtf8(_))
        ));
    }

    #[tokio::test]
    async fn test_client_close_reads_as_none() {
        let (conn, mut client) = pair("/lobby").await;

        client.send(Message::Close(None)).await.unwrap();
        assert!(conn.recv().await.expect("clean close").is_none());
    }

    #[tokio::test]
    async fn test_server_close_reaches_client() {
        let (conn, mut client) = pair("/lobby").await;

        conn.close().await.expect("close");
        match client.next().await {
            Some(Ok(Message::Close(_))) | None => {}
            other => panic!("expected close, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_every_connection_gets_its_own_id() {
        let (a, _ca) = pair("/").await;
        let (b, _cb) = pair("/").await;
        assert_ne!(a.id(), b.id());
    }
}
