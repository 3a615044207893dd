#![cfg(not(target_arch = "wasm32"))]

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread;

use csv_force_graph::components::force_graph::load_graph;
use csv_force_graph::error::LoadError;

/// Answers a single request with `response`, then closes the connection.
fn serve_once(response: &'static str) -> SocketAddr {
	let listener = TcpListener::bind("127.0.0.1:0").unwrap();
	let addr = listener.local_addr().unwrap();
	thread::spawn(move || {
		let (mut stream, _) = listener.accept().unwrap();
		let mut request = Vec::new();
		let mut buf = [0u8; 1024];
		while !request.windows(4).any(|w| w == b"\r\n\r\n") {
			let n = stream.read(&mut buf).unwrap();
			if n == 0 {
				break;
			}
			request.extend_from_slice(&buf[..n]);
		}
		stream.write_all(response.as_bytes()).unwrap();
	});
	addr
}

#[tokio::test]
async fn not_found_is_a_status_error() {
	let addr = serve_once("HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
	let url = format!("http://{}/liens.csv", addr);

	let err = load_graph(&url).await.unwrap_err();
	assert_eq!(err, LoadError::Status { url, status: 404 });
}

#[tokio::test]
async fn refused_connection_is_a_fetch_error() {
	let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
	let url = format!("http://{}/liens.csv", addr);

	match load_graph(&url).await {
		Err(LoadError::Fetch { url: failed, message }) => {
			assert_eq!(failed, url);
			assert!(!message.is_empty());
		}
		other => panic!("expected a fetch error, got {:?}", other),
	}
}

#[tokio::test]
async fn served_edge_list_builds_a_graph() {
	let addr = serve_once(
		"HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 36\r\nConnection: close\r\n\r\nsource,target,type\nA,B,x\nB,C,y\n,C,x\n",
	);
	let out = load_graph(&format!("http://{}/liens.csv", addr)).await.unwrap();

	assert_eq!(out.graph.nodes.len(), 3);
	assert_eq!(out.graph.edges.len(), 2);
	assert_eq!(out.dropped, 1);
}

#[tokio::test]
async fn served_file_without_target_column_is_rejected() {
	let addr = serve_once(
		"HTTP/1.1 200 OK\r\nContent-Length: 16\r\nConnection: close\r\n\r\nsource,type\nA,x\n",
	);
	let err = load_graph(&format!("http://{}/liens.csv", addr)).await.unwrap_err();
	assert_eq!(err, LoadError::MissingColumn("target"));
}
