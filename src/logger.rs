use std::net::SocketAddr;

use chrono::Local;

use crate::error::StartError;
use crate::serving::ServingConfig;

pub fn log_server_start(addr: &SocketAddr, serving: &ServingConfig) {
    println!("======================================");
    println!("Single-file server started");
    println!("Listening on: http://{addr}");
    println!(
        "Serving {} as \"{}\" ({})",
        serving.file_path.display(),
        serving.served_name,
        serving.mime_type
    );
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[Error] Failed to serve connection: {err:?}");
}

pub fn log_accept_error(err: &std::io::Error) {
    eprintln!("[Error] Failed to accept connection: {err}");
}

pub fn log_access(method: &str, path: &str, status: u16, bytes: u64) {
    println!(
        "[{}] {} {} - {} ({} bytes)",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        method,
        path,
        status,
        bytes
    );
}

pub fn log_config_updated(serving: &ServingConfig) {
    println!(
        "[Config] Now serving {} as \"{}\" ({})",
        serving.file_path.display(),
        serving.served_name,
        serving.mime_type
    );
}

pub fn log_already_running() {
    println!("[Server] Already running, start request ignored");
}

pub fn log_start_failed(port: u16, err: &StartError) {
    eprintln!("[Error] Could not start server on port {port}: {err}");
}

pub fn log_server_stopped() {
    println!("[Server] Stopped, port released");
}

pub fn log_listener_closed(addr: &SocketAddr) {
    println!("[Server] Listener on {addr} closed");
}

pub fn log_external_url(url: &str) {
    println!("[Code] External URL: {url}");
}
