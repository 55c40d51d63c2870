// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2024.

//! Tuning constants consumed by the uIP TCP/IP engine and its ARP layer.
//!
//! These are pass-through configuration for the external network stack;
//! nothing here feeds the GPIO logic. Frame sizing is bounded by the
//! ENC28J60 receive buffer carved out for this module.

/// Byte order of multi-byte header fields on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

/// Network byte order; uIP stores headers in wire order.
pub const BYTE_ORDER: ByteOrder = ByteOrder::BigEndian;

/// Maximum simultaneously open TCP connections.
pub const MAX_CONNECTIONS: usize = 6;

/// Maximum simultaneously listening TCP ports.
pub const MAX_LISTEN_PORTS: usize = 5;

/// Retransmission timeout, in periodic-timer pulses.
pub const RTO: u8 = 3;

/// Retransmission attempts before a connection is aborted.
pub const MAX_RETRANSMISSIONS: u8 = 8;

/// SYN retransmission attempts before a connection attempt is abandoned.
pub const MAX_SYN_RETRANSMISSIONS: u8 = 5;

/// IP time-to-live of originated packets.
pub const TTL: u8 = 64;

/// Seconds a closed connection lingers in TIME_WAIT.
pub const TIME_WAIT_TIMEOUT_SECONDS: u16 = 120;

/// ARP table entries.
pub const ARP_TABLE_SIZE: usize = 8;

/// Maximum ARP entry age, in tens of seconds (20 minutes).
pub const ARP_MAX_AGE: u16 = 120;

/// Largest Ethernet frame the ENC28J60 buffer allocation accepts.
pub const ENC28J60_MAX_FRAME: usize = 900;

/// uIP packet buffer size; one frame.
pub const BUFFER_SIZE: usize = ENC28J60_MAX_FRAME;

/// Ethernet link-level header length.
pub const LINK_HEADER_LEN: usize = 14;

/// Combined IP + TCP header length.
pub const TCPIP_HEADER_LEN: usize = 40;

/// TCP maximum segment size: whatever the buffer holds beyond the headers.
pub const TCP_MSS: usize = BUFFER_SIZE - LINK_HEADER_LEN - TCPIP_HEADER_LEN;

/// Advertised receive window; one segment, since there is one buffer.
pub const RECEIVE_WINDOW: usize = TCP_MSS;
