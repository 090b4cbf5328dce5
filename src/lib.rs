//! A small Kanban task board: a REST backend over an in-memory task list and
//! a terminal client rendering the three status columns.

pub mod board;
pub mod client;
pub mod routes;
pub mod server;
pub mod store;
pub mod task;
pub mod ui;
