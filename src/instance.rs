//! # Single-Instance Guard
//!
//! Holds a loopback TCP listener as a system-wide named lock. Only one process
//! can bind the port; the OS releases it when the holder exits, so a crash
//! never leaves a stale lock behind.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::{Context, Result};
use log::{debug, info};
use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener};

/// Lock is held for as long as this value lives.
#[derive(Debug)]
pub struct InstanceGuard {
    listener: TcpListener,
}

impl InstanceGuard {
    /// Acquire the lock on `127.0.0.1:port`.
    pub fn acquire(port: u16) -> Result<Option<Self>> {
        Self::acquire_addr(SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, port)))
    }

    /// `Ok(None)` when another process already holds the lock.
    pub fn acquire_addr(addr: SocketAddr) -> Result<Option<Self>> {
        match TcpListener::bind(addr) {
            Ok(listener) => {
                info!("🔒 Instance lock acquired on {addr}");
                Ok(Some(InstanceGuard { listener }))
            }
            Err(e) if e.kind() == ErrorKind::AddrInUse => {
                debug!("Instance lock on {addr} is held by another process");
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| format!("Failed to bind instance lock on {addr}")),
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}
