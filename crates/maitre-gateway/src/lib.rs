// SPDX-FileCopyrightText: 2026 Maitre Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Maitre chatbot.
//!
//! Exposes the orchestrator over a small JSON API:
//! - `POST /api/chat` answers a business-data question
//! - `GET /health` reports liveness, version and uptime

pub mod handlers;
pub mod server;

pub use handlers::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, client_identifier};
pub use server::{GatewayState, ServerConfig, build_router, start_server};
