//! JSON-lines Bridge Integration Tests
//!
//! Drives `serve` over in-memory pipes: replies arrive while the input is
//! still open, carry the request id, and malformed lines get a failure
//! reply instead of stopping the loop.

use std::sync::Arc;
use std::time::Duration;

use pitch_writer::serve;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::fakes::{Harness, ScriptedProvider};

async fn read_reply<R: tokio::io::AsyncBufRead + Unpin>(lines: &mut tokio::io::Lines<R>) -> Value {
    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .expect("reply should arrive while input is open")
        .unwrap()
        .expect("output closed early");
    serde_json::from_str(&line).unwrap()
}

// ============================================================================
// Streaming replies
// ============================================================================

#[tokio::test]
async fn test_replies_stream_while_input_stays_open() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let token = h.login("alice");
    let state = Arc::new(h.state);

    let (mut client_in, server_in) = tokio::io::duplex(64 * 1024);
    let (server_out, client_out) = tokio::io::duplex(64 * 1024);
    let server = tokio::spawn(serve(state, BufReader::new(server_in), server_out));
    let mut replies = BufReader::new(client_out).lines();

    for i in 0..20 {
        let request = format!(
            "{{\"id\":{},\"command\":\"create_pitch\",\"token\":\"{}\",\"args\":{{\"title\":\"Pitch {}\"}}}}\n",
            i, token, i
        );
        client_in.write_all(request.as_bytes()).await.unwrap();
        let reply = read_reply(&mut replies).await;
        assert_eq!(reply["id"], i);
        assert_eq!(reply["response"]["success"], true, "{}", reply);
    }

    client_in
        .write_all(b"{\"id\":\"last\",\"command\":\"list_pitches\",\"token\":\"")
        .await
        .unwrap();
    client_in.write_all(token.as_bytes()).await.unwrap();
    client_in.write_all(b"\"}\n").await.unwrap();
    let reply = read_reply(&mut replies).await;
    assert_eq!(reply["id"], "last");
    assert_eq!(reply["response"]["data"].as_array().unwrap().len(), 20);

    drop(client_in);
    server.await.unwrap().unwrap();
}

// ============================================================================
// Bad input
// ============================================================================

#[tokio::test]
async fn test_malformed_and_blank_lines() {
    let h = Harness::new(ScriptedProvider::replying("text"));
    let state = Arc::new(h.state);

    let (mut client_in, server_in) = tokio::io::duplex(4096);
    let (server_out, client_out) = tokio::io::duplex(4096);
    let server = tokio::spawn(serve(state, BufReader::new(server_in), server_out));
    let mut replies = BufReader::new(client_out).lines();

    client_in.write_all(b"\n   \nnot json\n").await.unwrap();
    let reply = read_reply(&mut replies).await;
    assert!(reply.get("id").is_none());
    assert_eq!(reply["response"]["success"], false);
    assert_eq!(reply["response"]["error"], "Malformed request");

    client_in
        .write_all(b"{\"id\":1,\"command\":\"get_health\"}\n")
        .await
        .unwrap();
    let reply = read_reply(&mut replies).await;
    assert_eq!(reply["id"], 1);
    assert_eq!(reply["response"]["success"], true);

    drop(client_in);
    server.await.unwrap().unwrap();
    assert!(replies.next_line().await.unwrap().is_none());
}
