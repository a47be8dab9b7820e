/*
 * Responsibility
 * - router-level middleware (transport concerns only; auth is not a layer)
 */
pub mod cors;
pub mod http;
