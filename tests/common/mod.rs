//! Shared utilities for integration testing.

use std::fs::Permissions;
use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use webserv::config::ServerConfig;
use webserv::net::Listener;
use webserv::{OriginServer, RelayServer};

/// Build a resource tree: a home page, a plain file, an image, and a
/// query-echoing program under cgi-bin.
pub fn fixture_tree() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("home.html"), "<html>welcome home</html>").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "plain notes").unwrap();
    std::fs::create_dir(dir.path().join("pics")).unwrap();
    std::fs::write(dir.path().join("pics/cat.jpg"), vec![0xffu8; 256]).unwrap();

    let cgi = dir.path().join("cgi-bin");
    std::fs::create_dir(&cgi).unwrap();
    write_script(
        &cgi.join("adder"),
        "#!/bin/sh\n\
         BODY=\"sum=$QUERY_STRING\"\n\
         printf 'Content-type: text/plain\\r\\nContent-length: %s\\r\\n\\r\\n%s' \"${#BODY}\" \"$BODY\"\n",
    );
    dir
}

/// Write an executable shell script.
pub fn write_script(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, Permissions::from_mode(0o755)).unwrap();
}

fn ephemeral_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config
}

/// Start an origin server over `root` on an ephemeral port.
pub async fn start_origin(root: &Path) -> SocketAddr {
    let mut config = ephemeral_config();
    config.resources.root = root.to_str().unwrap().to_string();

    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = OriginServer::new(config).run(listener).await;
    });
    addr
}

/// Start a forwarding relay on an ephemeral port.
#[allow(dead_code)]
pub async fn start_relay() -> SocketAddr {
    start_relay_with(ephemeral_config()).await
}

/// Start a forwarding relay with a customized configuration; the bind
/// address is always replaced with an ephemeral one.
#[allow(dead_code)]
pub async fn start_relay_with(mut config: ServerConfig) -> SocketAddr {
    config.listener.bind_address = "127.0.0.1:0".into();

    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = RelayServer::new(config).run(listener).await;
    });
    addr
}

/// Send one raw request and collect the whole response until EOF.
pub async fn roundtrip(addr: SocketAddr, request: &str) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

/// Start a canned upstream that answers every connection with `response`
/// and records the request head it received.
#[allow(dead_code)]
pub async fn start_canned_upstream(response: &'static [u8]) -> (SocketAddr, Arc<Mutex<Vec<u8>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let recorder = seen.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let recorder = recorder.clone();
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                // Read up to the blank line so the recorded head is complete.
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                recorder.lock().unwrap().extend_from_slice(&head);
                let _ = socket.write_all(response).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, seen)
}
